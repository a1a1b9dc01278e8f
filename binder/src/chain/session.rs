//! Session construction and the alloy-backed [`BridgeClient`].

use std::path::Path;

use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_client::ClientBuilder;
use alloy_rpc_types_eth::TransactionRequest;
use alloy_transport::layers::RetryBackoffLayer;
use alloy_transport::utils::guess_local_url;
use alloy_transport::{RpcError, TransportError};
use alloy_transport_http::{Http, reqwest};
use url::Url;

use super::wallet::{PasswordPrompt, unlock_wallet};
use super::{BindCall, BindingResult, BridgeClient, GasSettings, QueryCall, SubmissionReceipt};
use crate::config::RpcConfig;
use crate::error::Error;

/// A connected, optionally authenticated handle to the target chain.
///
/// Owns the RPC client and, for mutating commands, the decrypted signer. Both
/// live until the process exits.
#[allow(missing_debug_implementations)]
pub struct Session {
    provider: DynProvider,
    signer: Option<Address>,
}

impl Session {
    /// Address of the signing identity, if any.
    #[must_use]
    pub const fn signer(&self) -> Option<Address> {
        self.signer
    }
}

/// Open an RPC client with the configured pool, timeout, and retry budget.
fn rpc_client(endpoint: &str, rpc: &RpcConfig) -> Result<alloy_rpc_client::RpcClient, Error> {
    let url = Url::parse(endpoint)
        .map_err(|e| Error::connection_with(format!("invalid rpc url '{endpoint}'"), e))?;
    let http = reqwest::Client::builder()
        .pool_max_idle_per_host(rpc.pool_max_idle)
        .timeout(rpc.timeout())
        .build()
        .map_err(|e| Error::connection_with("failed to build http client", e))?;
    let is_local = guess_local_url(&url);
    let retry = RetryBackoffLayer::new(
        rpc.max_retries,
        rpc.initial_backoff_ms,
        rpc.compute_units_per_second,
    );
    Ok(ClientBuilder::default()
        .layer(retry)
        .transport(Http::with_client(http, url), is_local))
}

/// Verify the endpoint answers before handing the session out.
async fn handshake(
    provider: DynProvider,
    endpoint: &str,
    signer: Option<Address>,
) -> Result<Session, Error> {
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| Error::connection_with(format!("endpoint '{endpoint}' unreachable"), e))?;
    tracing::info!(endpoint, chain_id, "connected");
    Ok(Session { provider, signer })
}

/// Build a read-only session.
///
/// # Errors
///
/// [`Error::Connection`] if the URL is invalid or the endpoint does not answer.
pub async fn build_read_session(endpoint: &str, rpc: &RpcConfig) -> Result<Session, Error> {
    let client = rpc_client(endpoint, rpc)?;
    let provider = ProviderBuilder::new().connect_client(client).erased();
    handshake(provider, endpoint, None).await
}

/// Build a session that can sign.
///
/// The wallet is unlocked before any network traffic, so a wrong password
/// aborts without touching the endpoint.
///
/// # Errors
///
/// [`Error::Decryption`] if the wallet cannot be unlocked,
/// [`Error::Connection`] if the endpoint does not answer.
pub async fn build_authenticated_session(
    endpoint: &str,
    wallet: &Path,
    rpc: &RpcConfig,
    prompt: &dyn PasswordPrompt,
) -> Result<Session, Error> {
    let signer = unlock_wallet(wallet, prompt)?;
    let address = signer.address();
    let client = rpc_client(endpoint, rpc)?;
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_client(client)
        .erased();
    handshake(provider, endpoint, Some(address)).await
}

/// Node-side errors mean the call executed and failed; anything else is
/// the transport.
fn classify_query_error(selector: &str, err: TransportError) -> Error {
    match err {
        RpcError::ErrorResp(payload) => {
            Error::decode_with(format!("{selector} execution failed"), payload.message)
        }
        other => Error::connection_with(format!("{selector} call failed"), other),
    }
}

/// Legacy-priced transaction carrying `call` from `from` to `proxy`.
fn submission_request(
    from: Address,
    proxy: Address,
    call: &BindCall,
    gas: GasSettings,
) -> TransactionRequest {
    TransactionRequest::default()
        .with_from(from)
        .with_to(proxy)
        .with_input(call.calldata())
        .with_gas_price(gas.price)
        .with_gas_limit(gas.limit)
}

impl BridgeClient for Session {
    async fn query(&self, proxy: Address, call: &QueryCall) -> Result<BindingResult, Error> {
        let tx = TransactionRequest::default()
            .with_to(proxy)
            .with_input(call.calldata());
        let output = self
            .provider
            .call(tx)
            .await
            .map_err(|e| classify_query_error(call.selector(), e))?;
        let result = call.decode_output(&output)?;
        tracing::debug!(
            selector = call.selector(),
            payload = %result.payload,
            "query returned"
        );
        Ok(result)
    }

    async fn submit(
        &self,
        proxy: Address,
        call: &BindCall,
        gas: GasSettings,
    ) -> Result<SubmissionReceipt, Error> {
        let from = self
            .signer
            .ok_or_else(|| Error::Submission("session has no signing identity".to_owned()))?;
        let tx = submission_request(from, proxy, call, gas);
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| Error::submission_with(format!("{} rejected", call.selector()), e))?;
        Ok(SubmissionReceipt {
            tx_hash: *pending.tx_hash(),
        })
    }
}
