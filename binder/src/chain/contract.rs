//! Lock-proxy contract ABI and typed call arguments.
//!
//! Each selector gets its own variant so argument arity and ordering are
//! fixed by the type rather than by convention.

use std::fmt;

use alloy_primitives::{B256, Bytes};
use alloy_sol_types::{SolCall, SolType, sol, sol_data};

use crate::error::Error;

sol! {
    /// Bridge lock-proxy binding surface.
    interface ILockProxy {
        function bindProxyHash(uint64 toChainId, bytes targetProxyHash) external returns (bool);
        function getProxyHash(uint64 toChainId) external view returns (bytes);
        function bindAssetHash(bytes fromAssetHash, uint64 toChainId, bytes toAssetHash) external returns (bool);
        function getAssetHash(bytes fromAssetHash, uint64 toChainId) external view returns (bytes);
    }
}

/// Read-only lookup of the counterpart bound for a remote chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryCall {
    /// `getProxyHash(toChainId)`
    ProxyHash {
        /// Remote chain id.
        to_chain_id: u64,
    },
    /// `getAssetHash(fromAssetHash, toChainId)`
    AssetHash {
        /// Local asset identifier.
        from_asset: Bytes,
        /// Remote chain id.
        to_chain_id: u64,
    },
}

impl QueryCall {
    /// Contract method name.
    #[must_use]
    pub const fn selector(&self) -> &'static str {
        match self {
            Self::ProxyHash { .. } => "getProxyHash",
            Self::AssetHash { .. } => "getAssetHash",
        }
    }

    /// ABI-encoded calldata.
    #[must_use]
    pub fn calldata(&self) -> Bytes {
        match self {
            Self::ProxyHash { to_chain_id } => ILockProxy::getProxyHashCall {
                toChainId: *to_chain_id,
            }
            .abi_encode(),
            Self::AssetHash {
                from_asset,
                to_chain_id,
            } => ILockProxy::getAssetHashCall {
                fromAssetHash: from_asset.clone(),
                toChainId: *to_chain_id,
            }
            .abi_encode(),
        }
        .into()
    }

    /// Interpret raw `eth_call` output as the bound counterpart.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the output is not an ABI-encoded `bytes`.
    pub fn decode_output(&self, output: &[u8]) -> Result<BindingResult, Error> {
        let (payload,) = <(sol_data::Bytes,)>::abi_decode_params(output)
            .map_err(|e| Error::decode_with(format!("{} returned malformed data", self.selector()), e))?;
        Ok(BindingResult { payload })
    }
}

/// State-changing registration of a counterpart for a remote chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindCall {
    /// `bindProxyHash(toChainId, targetProxyHash)`
    ProxyHash {
        /// Remote chain id.
        to_chain_id: u64,
        /// Counterpart proxy on the remote chain.
        to_proxy: Bytes,
    },
    /// `bindAssetHash(fromAssetHash, toChainId, toAssetHash)`
    AssetHash {
        /// Local asset identifier.
        from_asset: Bytes,
        /// Remote chain id.
        to_chain_id: u64,
        /// Counterpart asset on the remote chain.
        to_asset: Bytes,
    },
}

impl BindCall {
    /// Contract method name.
    #[must_use]
    pub const fn selector(&self) -> &'static str {
        match self {
            Self::ProxyHash { .. } => "bindProxyHash",
            Self::AssetHash { .. } => "bindAssetHash",
        }
    }

    /// ABI-encoded calldata.
    #[must_use]
    pub fn calldata(&self) -> Bytes {
        match self {
            Self::ProxyHash {
                to_chain_id,
                to_proxy,
            } => ILockProxy::bindProxyHashCall {
                toChainId: *to_chain_id,
                targetProxyHash: to_proxy.clone(),
            }
            .abi_encode(),
            Self::AssetHash {
                from_asset,
                to_chain_id,
                to_asset,
            } => ILockProxy::bindAssetHashCall {
                fromAssetHash: from_asset.clone(),
                toChainId: *to_chain_id,
                toAssetHash: to_asset.clone(),
            }
            .abi_encode(),
        }
        .into()
    }

    /// The query that reads back what this call binds.
    #[must_use]
    pub fn verification(&self) -> QueryCall {
        match self {
            Self::ProxyHash { to_chain_id, .. } => QueryCall::ProxyHash {
                to_chain_id: *to_chain_id,
            },
            Self::AssetHash {
                from_asset,
                to_chain_id,
                ..
            } => QueryCall::AssetHash {
                from_asset: from_asset.clone(),
                to_chain_id: *to_chain_id,
            },
        }
    }

    /// Payload the verification query returns once the call has settled.
    #[must_use]
    pub const fn expected(&self) -> &Bytes {
        match self {
            Self::ProxyHash { to_proxy, .. } => to_proxy,
            Self::AssetHash { to_asset, .. } => to_asset,
        }
    }
}

/// Outcome of a successful query: the currently bound counterpart.
///
/// An empty payload means "not yet bound" and is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingResult {
    /// Raw bytes returned by the contract.
    pub payload: Bytes,
}

impl BindingResult {
    /// Whether a counterpart is registered.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        !self.payload.is_empty()
    }
}

/// Outcome of an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Transaction hash.
    pub tx_hash: B256,
}

impl fmt::Display for SubmissionReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tx_hash)
    }
}

/// Fee parameters for a state-changing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasSettings {
    /// Legacy gas price, in wei.
    pub price: u128,
    /// Gas limit.
    pub limit: u64,
}
