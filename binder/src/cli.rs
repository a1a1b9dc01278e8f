//! Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Register and verify cross-chain proxy and asset bindings.
#[derive(Debug, Parser)]
#[command(name = "binder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file. Built-in defaults apply when absent.
    #[arg(long, global = true, env = "BINDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a default TOML configuration file.
    Init {
        /// Output path for the configuration file.
        #[arg(short, long, default_value = "binder.toml")]
        output: PathBuf,

        /// Overwrite the file if it already exists.
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Binding and check commands.
    #[command(flatten)]
    Binding(BindingCommand),
}

/// Commands that talk to the proxy contract.
#[derive(Debug, Subcommand)]
pub enum BindingCommand {
    /// Bind a remote proxy, then read it back.
    #[command(alias = "bindproxy")]
    BindProxy(BindProxyArgs),

    /// Read the proxy bound for a remote chain.
    #[command(alias = "bindproxycheck")]
    BindProxyCheck(CheckArgs),

    /// Bind a remote asset, then read it back.
    #[command(alias = "bindasset")]
    BindAsset(BindAssetArgs),

    /// Read the asset bound for a local asset and remote chain.
    #[command(alias = "bindassetcheck")]
    BindAssetCheck(AssetCheckArgs),
}

/// Flags every binding command takes.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Target side chain id.
    #[arg(long = "tochain")]
    pub to_chain: u64,

    /// RPC endpoint URL.
    #[arg(long)]
    pub url: String,

    /// Proxy contract address (hex).
    #[arg(long)]
    pub proxy: String,
}

/// Flags for commands that sign.
#[derive(Debug, Args)]
pub struct SignerArgs {
    /// Keystore (V3 JSON) wallet file.
    #[arg(long)]
    pub wallet: PathBuf,

    /// Gas price override, in wei.
    #[arg(long)]
    pub gas_price: Option<u64>,

    /// Gas limit override.
    #[arg(long)]
    pub gas_limit: Option<u64>,
}

/// `bind-proxy` flags.
#[derive(Debug, Args)]
pub struct BindProxyArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub signer: SignerArgs,

    /// Counterpart proxy on the target chain (hex).
    #[arg(long = "toproxy")]
    pub to_proxy: String,
}

/// `bind-proxy-check` flags.
#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Accepted for compatibility; reads need no wallet.
    #[arg(long)]
    pub wallet: Option<PathBuf>,
}

/// `bind-asset` flags.
#[derive(Debug, Args)]
pub struct BindAssetArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub signer: SignerArgs,

    /// Local asset identifier (hex).
    #[arg(long = "fromasset")]
    pub from_asset: String,

    /// Counterpart asset on the target chain (hex).
    #[arg(long = "toasset")]
    pub to_asset: String,
}

/// `bind-asset-check` flags.
#[derive(Debug, Args)]
pub struct AssetCheckArgs {
    #[command(flatten)]
    pub check: CheckArgs,

    /// Local asset identifier (hex).
    #[arg(long = "fromasset")]
    pub from_asset: String,
}
