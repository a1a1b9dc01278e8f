//! Post-submission confirmation.
//!
//! A [`Settlement`] decides how long to wait after a bind is accepted before
//! reading the binding back. Neither strategy guarantees finality: whatever
//! is observed when the strategy gives up is what gets reported.

use std::future::Future;
use std::time::Duration;

use alloy_primitives::Address;
use tokio::time::{Instant, sleep};

use crate::chain::{BindCall, BindingResult, BridgeClient};
use crate::error::Error;

/// Wait-then-verify policy.
pub trait Settlement {
    /// Wait for `call` to settle and return the read-back result.
    ///
    /// # Errors
    ///
    /// Propagates the first failed query.
    fn verify<C: BridgeClient>(
        &self,
        client: &C,
        proxy: Address,
        call: &BindCall,
    ) -> impl Future<Output = Result<BindingResult, Error>> + Send;
}

/// Sleep once, then query once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    /// Strategy that waits `delay` before reading back.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Settlement for FixedDelay {
    async fn verify<C: BridgeClient>(
        &self,
        client: &C,
        proxy: Address,
        call: &BindCall,
    ) -> Result<BindingResult, Error> {
        tracing::info!(delay = ?self.delay, "waiting before read-back");
        sleep(self.delay).await;
        client.query(proxy, &call.verification()).await
    }
}

/// Floor for the first gap between reads.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Query until the expected payload appears or the deadline passes.
///
/// The gap between reads starts at `interval` (at least
/// [`MIN_POLL_INTERVAL`]) and doubles after each miss, never sleeping past
/// the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedPoll {
    interval: Duration,
    timeout: Duration,
}

impl BoundedPoll {
    /// Strategy that polls from `interval` up to `timeout` in total.
    #[must_use]
    pub const fn new(interval: Duration, timeout: Duration) -> Self {
        let interval = if interval.as_nanos() < MIN_POLL_INTERVAL.as_nanos() {
            MIN_POLL_INTERVAL
        } else {
            interval
        };
        Self { interval, timeout }
    }
}

impl Settlement for BoundedPoll {
    async fn verify<C: BridgeClient>(
        &self,
        client: &C,
        proxy: Address,
        call: &BindCall,
    ) -> Result<BindingResult, Error> {
        let query = call.verification();
        let deadline = Instant::now() + self.timeout;
        let mut interval = self.interval;
        loop {
            let result = client.query(proxy, &query).await?;
            if result.payload == *call.expected() {
                return Ok(result);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "binding not observed before timeout, reporting last read"
                );
                return Ok(result);
            }
            let wait = interval.min(remaining);
            tracing::info!("binding not observed yet, checking again in {wait:?}");
            sleep(wait).await;
            interval = interval.saturating_mul(2);
        }
    }
}

/// Strategy chosen by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// See [`FixedDelay`].
    Fixed(FixedDelay),
    /// See [`BoundedPoll`].
    Poll(BoundedPoll),
}

impl Settlement for Strategy {
    async fn verify<C: BridgeClient>(
        &self,
        client: &C,
        proxy: Address,
        call: &BindCall,
    ) -> Result<BindingResult, Error> {
        match self {
            Self::Fixed(fixed) => fixed.verify(client, proxy, call).await,
            Self::Poll(poll) => poll.verify(client, proxy, call).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeClient, PROXY};
    use alloy_primitives::bytes;

    fn bind_proxy() -> BindCall {
        BindCall::ProxyHash {
            to_chain_id: 7,
            to_proxy: bytes!("1234"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fixed_delay_waits_then_reads_once() {
        let client = FakeClient::default();
        client.bind_now(&bind_proxy());
        let started = Instant::now();

        let result = FixedDelay::new(Duration::from_secs(10))
            .verify(&client, PROXY, &bind_proxy())
            .await
            .unwrap();

        assert_eq!(started.elapsed(), Duration::from_secs(10));
        assert_eq!(result.payload, bytes!("1234"));
        assert_eq!(client.queries(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn fixed_delay_reports_stale_state() {
        let client = FakeClient::default();
        let result = FixedDelay::new(Duration::from_secs(10))
            .verify(&client, PROXY, &bind_proxy())
            .await
            .unwrap();
        assert!(!result.is_bound());
        assert_eq!(client.queries(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_returns_as_soon_as_binding_appears() {
        let client = FakeClient::default().settling_after(3);
        client.bind_now(&bind_proxy());

        let result = BoundedPoll::new(Duration::from_secs(1), Duration::from_secs(60))
            .verify(&client, PROXY, &bind_proxy())
            .await
            .unwrap();

        assert_eq!(result.payload, bytes!("1234"));
        assert_eq!(client.queries(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_gives_up_at_deadline_with_last_read() {
        let client = FakeClient::default();
        let started = Instant::now();

        let result = BoundedPoll::new(Duration::from_secs(1), Duration::from_secs(10))
            .verify(&client, PROXY, &bind_proxy())
            .await
            .unwrap();

        assert!(!result.is_bound());
        assert_eq!(started.elapsed(), Duration::from_secs(10));
        // reads at 0, 1, 3, 7 and the clamped 10
        assert_eq!(client.queries(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_still_backs_off() {
        let client = FakeClient::default();
        let started = Instant::now();

        let result = BoundedPoll::new(Duration::ZERO, Duration::from_secs(10))
            .verify(&client, PROXY, &bind_proxy())
            .await
            .unwrap();

        assert!(!result.is_bound());
        assert_eq!(started.elapsed(), Duration::from_secs(10));
        assert_eq!(client.queries(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_propagates_query_errors() {
        let client = FakeClient::default().failing_queries();
        let err = BoundedPoll::new(Duration::from_secs(1), Duration::from_secs(10))
            .verify(&client, PROXY, &bind_proxy())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert_eq!(client.queries(), 1);
    }
}
