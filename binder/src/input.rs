//! Operator input normalisation.
//!
//! Everything here is pure: flags go in, a [`BindingRequest`] or a
//! [`ValidationError`] comes out, and nothing touches the network or disk.

use alloy_primitives::{Address, Bytes};

use crate::chain::{BindCall, QueryCall};
use crate::error::ValidationError;

/// Validated intent of a single command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingRequest<C> {
    /// RPC endpoint as supplied.
    pub endpoint: String,
    /// Local proxy contract.
    pub proxy: Address,
    /// Contract call to perform.
    pub call: C,
}

/// Strip an optional `0x`/`0X` prefix.
fn strip_prefix(raw: &str) -> &str {
    raw.strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw)
}

/// Decode a hex-encoded 20-byte address, with or without prefix.
///
/// # Errors
///
/// [`ValidationError::InvalidAddress`] on bad hex or wrong length.
pub fn parse_address(field: &'static str, raw: &str) -> Result<Address, ValidationError> {
    let invalid = || ValidationError::InvalidAddress {
        field,
        raw: raw.to_owned(),
    };
    let bytes = hex::decode(strip_prefix(raw)).map_err(|_| invalid())?;
    let bytes: [u8; 20] = bytes.as_slice().try_into().map_err(|_| invalid())?;
    Ok(Address::from(bytes))
}

/// Decode an arbitrary-length hex payload. The empty string is valid.
///
/// # Errors
///
/// [`ValidationError::InvalidHexPayload`] on non-hex characters or odd length.
pub fn parse_payload(field: &'static str, raw: &str) -> Result<Bytes, ValidationError> {
    hex::decode(strip_prefix(raw))
        .map(Bytes::from)
        .map_err(|_| ValidationError::InvalidHexPayload {
            field,
            raw: raw.to_owned(),
        })
}

/// Reject the zero chain id.
///
/// # Errors
///
/// [`ValidationError::InvalidChainId`] when `value` is zero.
pub const fn parse_chain_id(value: u64) -> Result<u64, ValidationError> {
    if value == 0 {
        return Err(ValidationError::InvalidChainId { value });
    }
    Ok(value)
}

/// `bind-proxy`: `toChain`, `proxy`, `toProxy`.
///
/// # Errors
///
/// Returns the first malformed field.
pub fn proxy_binding(
    endpoint: &str,
    to_chain: u64,
    proxy: &str,
    to_proxy: &str,
) -> Result<BindingRequest<BindCall>, ValidationError> {
    let proxy = parse_address("proxy", proxy)?;
    let to_proxy = parse_payload("toproxy", to_proxy)?;
    let to_chain_id = parse_chain_id(to_chain)?;
    Ok(BindingRequest {
        endpoint: endpoint.to_owned(),
        proxy,
        call: BindCall::ProxyHash {
            to_chain_id,
            to_proxy,
        },
    })
}

/// `bind-proxy-check`: `toChain`, `proxy`.
///
/// # Errors
///
/// Returns the first malformed field.
pub fn proxy_lookup(
    endpoint: &str,
    to_chain: u64,
    proxy: &str,
) -> Result<BindingRequest<QueryCall>, ValidationError> {
    let proxy = parse_address("proxy", proxy)?;
    let to_chain_id = parse_chain_id(to_chain)?;
    Ok(BindingRequest {
        endpoint: endpoint.to_owned(),
        proxy,
        call: QueryCall::ProxyHash { to_chain_id },
    })
}

/// `bind-asset`: `toChain`, `proxy`, `fromAsset`, `toAsset`.
///
/// # Errors
///
/// Returns the first malformed field.
pub fn asset_binding(
    endpoint: &str,
    to_chain: u64,
    proxy: &str,
    from_asset: &str,
    to_asset: &str,
) -> Result<BindingRequest<BindCall>, ValidationError> {
    let proxy = parse_address("proxy", proxy)?;
    let from_asset = parse_payload("fromasset", from_asset)?;
    let to_asset = parse_payload("toasset", to_asset)?;
    let to_chain_id = parse_chain_id(to_chain)?;
    Ok(BindingRequest {
        endpoint: endpoint.to_owned(),
        proxy,
        call: BindCall::AssetHash {
            from_asset,
            to_chain_id,
            to_asset,
        },
    })
}

/// `bind-asset-check`: `toChain`, `proxy`, `fromAsset`.
///
/// # Errors
///
/// Returns the first malformed field.
pub fn asset_lookup(
    endpoint: &str,
    to_chain: u64,
    proxy: &str,
    from_asset: &str,
) -> Result<BindingRequest<QueryCall>, ValidationError> {
    let proxy = parse_address("proxy", proxy)?;
    let from_asset = parse_payload("fromasset", from_asset)?;
    let to_chain_id = parse_chain_id(to_chain)?;
    Ok(BindingRequest {
        endpoint: endpoint.to_owned(),
        proxy,
        call: QueryCall::AssetHash {
            from_asset,
            to_chain_id,
        },
    })
}
