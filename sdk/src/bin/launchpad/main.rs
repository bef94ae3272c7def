// CLI shell for the token launchpad
//
// Connects to a cluster, opens a wallet session from a keypair file and
// mounts the launch form.

mod commands;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use launchpad_sdk::{KeypairWallet, LaunchConfig, Shell, DEVNET_RPC_URL};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "launchpad")]
#[command(about = "Create a Solana token with metadata", long_about = None)]
#[command(version)]
struct Cli {
    /// RPC URL to connect to
    #[arg(long, default_value = DEVNET_RPC_URL)]
    rpc_url: String,

    /// Path to wallet keypair file
    #[arg(long, default_value = "~/.config/solana/id.json")]
    keypair: String,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the connected wallet and its balance
    Wallet,

    /// Fill the launch form and submit it
    Launch(commands::launch::LaunchCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = LaunchConfig::devnet().with_rpc_url(cli.rpc_url);
    let mut shell = Shell::new(config);

    // A missing keypair leaves the shell disconnected; the form reports it
    match KeypairWallet::from_file(&cli.keypair) {
        Ok(wallet) => shell.connect(Arc::new(wallet)),
        Err(e) => warn!("{}", e),
    }

    match cli.command {
        Commands::Wallet => commands::wallet::execute(&shell).await,
        Commands::Launch(cmd) => commands::launch::execute(cmd, &shell).await,
    }
}

fn init_logging(log_level: &str) {
    let log_level = log_level.parse().unwrap_or(tracing::Level::INFO);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("launchpad_sdk={},launchpad={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
