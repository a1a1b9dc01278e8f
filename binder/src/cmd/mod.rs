//! Command implementations.
//!
//! | command            | session       | operations                       |
//! |--------------------|---------------|----------------------------------|
//! | `bind-proxy`       | authenticated | bind → settle → `getProxyHash`   |
//! | `bind-proxy-check` | read-only     | `getProxyHash`                   |
//! | `bind-asset`       | authenticated | bind → settle → `getAssetHash`   |
//! | `bind-asset-check` | read-only     | `getAssetHash`                   |
//!
//! Every command validates all of its input before opening a session.

pub mod bind;
pub mod check;
pub mod init;

use crate::chain::BindingResult;
use crate::cli::BindingCommand;
use crate::context::Context;
use crate::error::Error;
use crate::input;

/// Run one binding command to completion.
///
/// # Errors
///
/// Returns the first failure; nothing is retried.
pub async fn dispatch(ctx: &Context, command: BindingCommand) -> Result<(), Error> {
    match command {
        BindingCommand::BindProxy(args) => {
            let request = input::proxy_binding(
                &args.target.url,
                args.target.to_chain,
                &args.target.proxy,
                &args.to_proxy,
            )?;
            bind::run(ctx, &request, &args.signer).await
        }
        BindingCommand::BindProxyCheck(args) => {
            let request =
                input::proxy_lookup(&args.target.url, args.target.to_chain, &args.target.proxy)?;
            check::run(ctx, &request).await
        }
        BindingCommand::BindAsset(args) => {
            let request = input::asset_binding(
                &args.target.url,
                args.target.to_chain,
                &args.target.proxy,
                &args.from_asset,
                &args.to_asset,
            )?;
            bind::run(ctx, &request, &args.signer).await
        }
        BindingCommand::BindAssetCheck(args) => {
            let target = &args.check.target;
            let request =
                input::asset_lookup(&target.url, target.to_chain, &target.proxy, &args.from_asset)?;
            check::run(ctx, &request).await
        }
    }
}

/// Operator-facing rendering of a query result.
fn format_result(result: &BindingResult) -> String {
    format!("state: success\n{}", hex::encode(&result.payload))
}

#[allow(clippy::print_stdout)]
fn render(result: &BindingResult) {
    println!("{}", format_result(result));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{BindProxyArgs, CheckArgs, SignerArgs, TargetArgs};
    use crate::config::{Config, RpcConfig};
    use crate::error::ValidationError;
    use crate::testing::{FixedPrompt, keystore_file};
    use alloy_primitives::bytes;

    const PROXY: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const DEAD_ENDPOINT: &str = "http://127.0.0.1:1";

    fn context(password: &'static str) -> Context {
        let config = Config {
            rpc: RpcConfig {
                max_retries: 0,
                timeout_secs: 2,
                ..RpcConfig::default()
            },
            ..Config::default()
        };
        Context::new(config, Box::new(FixedPrompt(password)))
    }

    fn target(to_chain: u64) -> TargetArgs {
        TargetArgs {
            to_chain,
            url: DEAD_ENDPOINT.to_owned(),
            proxy: PROXY.to_owned(),
        }
    }

    fn bind_proxy(to_chain: u64, wallet: std::path::PathBuf) -> BindingCommand {
        BindingCommand::BindProxy(BindProxyArgs {
            target: target(to_chain),
            signer: SignerArgs {
                wallet,
                gas_price: None,
                gas_limit: None,
            },
            to_proxy: "1234".to_owned(),
        })
    }

    #[test]
    fn renders_state_and_hex() {
        let bound = BindingResult {
            payload: bytes!("1234"),
        };
        assert_eq!(format_result(&bound), "state: success\n1234");
        assert_eq!(
            format_result(&BindingResult::default()),
            "state: success\n"
        );
    }

    #[tokio::test]
    async fn zero_chain_fails_before_session() {
        let ctx = context("testpassword");
        let check = BindingCommand::BindProxyCheck(CheckArgs {
            target: target(0),
            wallet: None,
        });
        let err = dispatch(&ctx, check).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidChainId { value: 0 })
        ));

        // the wallet path does not exist; validation must fail first
        let err = dispatch(&ctx, bind_proxy(0, "absent.json".into()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidChainId { value: 0 })
        ));
    }

    #[tokio::test]
    async fn malformed_payload_fails_before_session() {
        let ctx = context("testpassword");
        let command = BindingCommand::BindProxy(BindProxyArgs {
            target: target(7),
            signer: SignerArgs {
                wallet: "absent.json".into(),
                gas_price: None,
                gas_limit: None,
            },
            to_proxy: "123".to_owned(),
        });
        let err = dispatch(&ctx, command).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidHexPayload { field: "toproxy", .. })
        ));
    }

    #[tokio::test]
    async fn wrong_password_stops_before_network() {
        let dir = tempfile::tempdir().unwrap();
        let wallet = keystore_file(dir.path());
        let ctx = context("wrong password");
        let err = dispatch(&ctx, bind_proxy(7, wallet)).await.unwrap_err();
        assert!(matches!(err, Error::Decryption(_)), "{err}");
    }

    #[tokio::test]
    async fn check_ignores_wallet_and_needs_endpoint() {
        let ctx = context("unused");
        let check = BindingCommand::BindProxyCheck(CheckArgs {
            target: target(7),
            wallet: Some("absent.json".into()),
        });
        let err = dispatch(&ctx, check).await.unwrap_err();
        assert!(matches!(err, Error::Connection(_)), "{err}");
    }
}
