//! Unified error types for the binder.

use std::fmt::Display;

use thiserror::Error;

/// Top-level error type for every binder command.
///
/// Each variant aborts the current command. No variant is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// Operator input was malformed. Raised before any network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration file could not be resolved, read, parsed, or written.
    #[error("config: {0}")]
    Config(String),

    /// RPC endpoint unreachable or the client could not be initialised.
    #[error("connection: {0}")]
    Connection(String),

    /// Wallet password was wrong or the wallet file is unreadable.
    #[error("decryption: {0}")]
    Decryption(String),

    /// The state-changing call was rejected or failed to broadcast.
    #[error("submission: {0}")]
    Submission(String),

    /// A query result could not be interpreted.
    #[error("decode: {0}")]
    Decode(String),
}

impl Error {
    /// Configuration error with a plain message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Configuration error carrying an underlying cause.
    pub fn config_with(context: impl Display, cause: impl Display) -> Self {
        Self::Config(format!("{context}: {cause}"))
    }

    /// Connection error carrying an underlying cause.
    pub fn connection_with(context: impl Display, cause: impl Display) -> Self {
        Self::Connection(format!("{context}: {cause}"))
    }

    /// Decryption error carrying an underlying cause.
    pub fn decryption_with(context: impl Display, cause: impl Display) -> Self {
        Self::Decryption(format!("{context}: {cause}"))
    }

    /// Submission error carrying an underlying cause.
    pub fn submission_with(context: impl Display, cause: impl Display) -> Self {
        Self::Submission(format!("{context}: {cause}"))
    }

    /// Decode error carrying an underlying cause.
    pub fn decode_with(context: impl Display, cause: impl Display) -> Self {
        Self::Decode(format!("{context}: {cause}"))
    }
}

/// Malformed operator input, reported with the offending flag and raw value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Not a hex-encoded 20-byte address.
    #[error("invalid {field} address '{raw}'")]
    InvalidAddress {
        /// Flag name.
        field: &'static str,
        /// Value as supplied.
        raw: String,
    },

    /// Non-hex characters or odd length.
    #[error("invalid {field} hex payload '{raw}'")]
    InvalidHexPayload {
        /// Flag name.
        field: &'static str,
        /// Value as supplied.
        raw: String,
    },

    /// Zero is the "unset" sentinel and never a valid chain.
    #[error("invalid to chain id {value}")]
    InvalidChainId {
        /// Value as supplied.
        value: u64,
    },
}
