//! `bind-proxy` / `bind-asset`: submit a binding, wait, and read it back.

use crate::binding;
use crate::chain::{BindCall, build_authenticated_session};
use crate::cli::SignerArgs;
use crate::context::Context;
use crate::error::Error;
use crate::input::BindingRequest;

/// Execute a bind command.
///
/// The wallet password is read from the operator before the endpoint is
/// contacted.
///
/// # Errors
///
/// Returns an error if the wallet cannot be unlocked, the endpoint is
/// unreachable, the submission is rejected, or the read-back fails.
#[allow(clippy::print_stdout)]
pub async fn run(
    ctx: &Context,
    request: &BindingRequest<BindCall>,
    signer: &SignerArgs,
) -> Result<(), Error> {
    let config = ctx.config();
    let session = build_authenticated_session(
        &request.endpoint,
        &signer.wallet,
        &config.rpc,
        ctx.prompt(),
    )
    .await?;
    let gas = config.transaction.gas(signer.gas_price, signer.gas_limit);
    tracing::debug!(
        signer = ?session.signer(),
        selector = request.call.selector(),
        gas_price = gas.price,
        gas_limit = gas.limit,
        "submitting binding"
    );

    let outcome = binding::bind(
        &session,
        &ctx.settlement(),
        request.proxy,
        &request.call,
        gas,
    )
    .await?;
    println!("hash: {}", outcome.receipt);
    super::render(&outcome.result);
    Ok(())
}
