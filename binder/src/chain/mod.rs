//! Chain access: contract ABI, sessions, and wallet decryption.
//!
//! - `contract`: `sol!` bindings and the typed [`BindCall`] / [`QueryCall`] unions.
//! - `session`: [`Session`] construction and the alloy-backed [`BridgeClient`].
//! - `wallet`: Password prompting and keystore decryption.

mod contract;
mod session;
mod wallet;

use std::future::Future;

use alloy_primitives::Address;

pub use self::contract::*;
pub use self::session::*;
pub use self::wallet::*;
use crate::error::Error;

/// The two contract calls a binding workflow needs.
///
/// Implemented by [`Session`] against a live node and by in-memory fakes in
/// tests.
pub trait BridgeClient: Sync {
    /// Read-only call; consumes no gas and needs no signer.
    ///
    /// # Errors
    ///
    /// [`Error::Decode`] if execution fails or the output is malformed,
    /// [`Error::Connection`] on transport failure.
    fn query(
        &self,
        proxy: Address,
        call: &QueryCall,
    ) -> impl Future<Output = Result<BindingResult, Error>> + Send;

    /// State-changing call paid for and authorised by the session signer.
    ///
    /// # Errors
    ///
    /// [`Error::Submission`] if the call cannot be signed or broadcast.
    fn submit(
        &self,
        proxy: Address,
        call: &BindCall,
        gas: GasSettings,
    ) -> impl Future<Output = Result<SubmissionReceipt, Error>> + Send;
}
