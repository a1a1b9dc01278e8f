//! Cross-chain binding tool
//!
//! Registers and verifies the proxy and asset bindings a lock-proxy contract
//! keeps for each remote chain.
//!
//! ```sh
//! binder init                                  # Generate default binder.toml
//! binder bind-proxy --wallet w.json --tochain 2 --url http://... --proxy 0x.. --toproxy ab12
//! binder bind-proxy-check --tochain 2 --url http://... --proxy 0x..
//! ```

mod binding;
mod chain;
mod cli;
mod cmd;
mod config;
mod context;
mod error;
mod input;
mod settle;
mod telemetry;
#[cfg(test)]
mod testing;

use clap::Parser;
use dotenvy::dotenv;

use cli::{Cli, Commands};
use context::Context;
use telemetry::Telemetry;

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    let telemetry = Telemetry::new()
        .with_name(env!("CARGO_PKG_NAME"))
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_log_level(cli.log_level)
        .register();

    let result = match cli.command {
        Commands::Init { output, force } => cmd::init::run(&output, force),
        Commands::Binding(command) => match Context::load(cli.config.as_deref()) {
            Ok(ctx) => cmd::dispatch(&ctx, command).await,
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        drop(telemetry);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
