//! Configuration loading and default template generation.
//!
//! This module provides:
//!
//! - [`Config`]: RPC client budget, transaction fees, and settlement strategy.
//! - [`load_config`]: Reads and parses a TOML configuration file.
//! - [`generate_default_config`]: Produces a commented TOML template.
//!
//! Every section is optional; missing values fall back to the defaults shown
//! in the template.
//!
//! # Configuration File Format
//!
//! ```toml
//! [rpc]
//! pool_max_idle = 3
//! timeout_secs = 60
//! max_retries = 10
//!
//! [transaction]
//! gas_price = 2500
//! gas_limit = 200000
//!
//! [settlement]
//! strategy = "fixed"
//! delay_secs = 10
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::chain::GasSettings;
use crate::error::Error;
use crate::settle::{BoundedPoll, FixedDelay, Strategy};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// RPC client budget.
    pub rpc: RpcConfig,
    /// Fee parameters for bind commands.
    pub transaction: TransactionConfig,
    /// How a submitted binding is confirmed.
    pub settlement: SettlementConfig,
}

impl Config {
    /// Reject values that parse but cannot drive a session.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending key.
    pub fn validate(&self) -> Result<(), String> {
        if self.rpc.timeout_secs == 0 {
            return Err("rpc.timeout_secs must be at least 1".to_owned());
        }
        match self.settlement {
            SettlementConfig::Poll {
                interval_secs: 0, ..
            } => Err("settlement.interval_secs must be at least 1".to_owned()),
            SettlementConfig::Poll { timeout_secs: 0, .. } => {
                Err("settlement.timeout_secs must be at least 1".to_owned())
            }
            _ => Ok(()),
        }
    }
}

/// RPC client construction parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RpcConfig {
    /// Maximum idle connections kept per host.
    pub pool_max_idle: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries on rate-limited or transiently failing requests.
    pub max_retries: u32,
    /// Initial retry backoff in milliseconds.
    pub initial_backoff_ms: u64,
    /// Compute-unit budget used to pace retries.
    pub compute_units_per_second: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            pool_max_idle: 3,
            timeout_secs: 60,
            max_retries: 10,
            initial_backoff_ms: 1_000,
            compute_units_per_second: 330,
        }
    }
}

impl RpcConfig {
    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Fee parameters for state-changing calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransactionConfig {
    /// Legacy gas price in wei.
    pub gas_price: u64,
    /// Gas limit.
    pub gas_limit: u64,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            gas_price: 2_500,
            gas_limit: 200_000,
        }
    }
}

impl TransactionConfig {
    /// Resolve fee parameters, preferring explicit overrides.
    #[must_use]
    pub fn gas(&self, price: Option<u64>, limit: Option<u64>) -> GasSettings {
        GasSettings {
            price: u128::from(price.unwrap_or(self.gas_price)),
            limit: limit.unwrap_or(self.gas_limit),
        }
    }
}

/// Settlement strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SettlementConfig {
    /// Sleep once, then read back once.
    Fixed {
        /// Seconds to wait before reading back.
        delay_secs: u64,
    },
    /// Read back repeatedly until the binding is observed or time runs out.
    Poll {
        /// Initial seconds between reads; doubles after each miss.
        interval_secs: u64,
        /// Upper bound on total waiting, in seconds.
        timeout_secs: u64,
    },
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self::Fixed { delay_secs: 10 }
    }
}

impl SettlementConfig {
    /// Build the configured strategy.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match *self {
            Self::Fixed { delay_secs } => {
                Strategy::Fixed(FixedDelay::new(Duration::from_secs(delay_secs)))
            }
            Self::Poll {
                interval_secs,
                timeout_secs,
            } => Strategy::Poll(BoundedPoll::new(
                Duration::from_secs(interval_secs),
                Duration::from_secs(timeout_secs),
            )),
        }
    }
}

/// Load configuration from a TOML file at the given path.
///
/// # Errors
///
/// Returns an error if the file cannot be resolved, read, or parsed.
pub fn load_config(path: &Path) -> Result<Config, Error> {
    let config_path = path.canonicalize().map_err(|e| {
        Error::config_with(
            format!("failed to resolve config path '{}'", path.display()),
            e,
        )
    })?;
    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        Error::config_with(
            format!("failed to read config file '{}'", config_path.display()),
            e,
        )
    })?;
    let config: Config = toml::from_str(&content).map_err(|e| {
        Error::config_with(
            format!("failed to parse TOML config '{}'", config_path.display()),
            e,
        )
    })?;
    config.validate().map_err(|e| {
        Error::config_with(format!("invalid config '{}'", config_path.display()), e)
    })?;
    Ok(config)
}

/// Generate a default TOML configuration template.
#[must_use]
pub fn generate_default_config() -> String {
    String::from(
        r#"# binder configuration
# Every value below is the built-in default; delete what you don't change.

# ── RPC client ──────────────────────────────────────────────────────
[rpc]
pool_max_idle = 3
timeout_secs = 60
max_retries = 10
initial_backoff_ms = 1000
compute_units_per_second = 330

# ── Bind transactions ───────────────────────────────────────────────
# Overridable per command with --gas-price / --gas-limit.
[transaction]
gas_price = 2500
gas_limit = 200000

# ── Settlement ──────────────────────────────────────────────────────
# "fixed": wait delay_secs once, then read the binding back.
# "poll":  read back every interval_secs (doubling) until it matches
#          or timeout_secs elapses.
[settlement]
strategy = "fixed"
delay_secs = 10

# [settlement]
# strategy = "poll"
# interval_secs = 2
# timeout_secs = 60
"#,
    )
}
