//! Query and bind-then-verify operations.
//!
//! Both are generic over [`BridgeClient`] and, for binds, over the
//! [`Settlement`] strategy, so they run unchanged against a live node or an
//! in-memory fake.

use alloy_primitives::Address;

use crate::chain::{
    BindCall, BindingResult, BridgeClient, GasSettings, QueryCall, SubmissionReceipt,
};
use crate::error::Error;
use crate::settle::Settlement;

/// Result of a bind followed by its verification read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindOutcome {
    /// Accepted submission.
    pub receipt: SubmissionReceipt,
    /// What the verification read observed.
    pub result: BindingResult,
}

/// Read the currently bound counterpart.
///
/// # Errors
///
/// Propagates [`Error::Decode`] / [`Error::Connection`] from the client.
pub async fn query<C: BridgeClient>(
    client: &C,
    proxy: Address,
    call: &QueryCall,
) -> Result<BindingResult, Error> {
    let result = client.query(proxy, call).await?;
    tracing::info!(
        selector = call.selector(),
        %proxy,
        bound = result.is_bound(),
        payload = %result.payload,
        "query"
    );
    Ok(result)
}

/// Submit a binding, wait per `settlement`, then read it back.
///
/// A rejected submission returns immediately; no verification read is made.
/// An accepted submission is never rolled back, even if the read-back fails.
///
/// # Errors
///
/// [`Error::Submission`] if the call is rejected, otherwise whatever the
/// verification read returns.
pub async fn bind<C: BridgeClient, S: Settlement>(
    client: &C,
    settlement: &S,
    proxy: Address,
    call: &BindCall,
    gas: GasSettings,
) -> Result<BindOutcome, Error> {
    let receipt = client
        .submit(proxy, call, gas)
        .await
        .inspect_err(|e| tracing::error!(selector = call.selector(), error = %e, "submit failed"))?;
    tracing::info!(selector = call.selector(), hash = %receipt, "submitted");

    let result = settlement.verify(client, proxy, call).await?;
    if result.payload != *call.expected() {
        tracing::warn!(
            selector = call.selector(),
            hash = %receipt,
            "binding not yet visible; re-run the check command later"
        );
    }
    tracing::info!(
        selector = call.verification().selector(),
        %proxy,
        bound = result.is_bound(),
        payload = %result.payload,
        "verification"
    );
    Ok(BindOutcome { receipt, result })
}
