//! `bind-proxy-check` / `bind-asset-check`: read a binding.

use crate::binding;
use crate::chain::{QueryCall, build_read_session};
use crate::context::Context;
use crate::error::Error;
use crate::input::BindingRequest;

/// Execute a check command.
///
/// # Errors
///
/// Returns an error if the endpoint is unreachable or the query fails.
pub async fn run(ctx: &Context, request: &BindingRequest<QueryCall>) -> Result<(), Error> {
    let session = build_read_session(&request.endpoint, &ctx.config().rpc).await?;
    let result = binding::query(&session, request.proxy, &request.call).await?;
    super::render(&result);
    Ok(())
}
