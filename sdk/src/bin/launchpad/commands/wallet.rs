// Wallet status: the shell's connect/disconnect bar

use anyhow::{Context, Result};
use launchpad_sdk::{Shell, MIN_BALANCE_LAMPORTS};

use super::utils::{format_sol, info, success, warn};

pub async fn execute(shell: &Shell) -> Result<()> {
    info(&format!("Network: {}", shell.network().endpoint()));

    let Some(address) = shell.wallet_address() else {
        warn("Wallet not connected. Pass --keypair with a valid keypair file.");
        return Ok(());
    };
    success(&format!("Wallet connected: {}", address));

    let balance = shell
        .wallet_balance()
        .await
        .context("Failed to fetch wallet balance")?
        .unwrap_or_default();
    info(&format!("Balance: {}", format_sol(balance)));

    if balance <= MIN_BALANCE_LAMPORTS {
        warn(&format!(
            "Launching requires more than {}",
            format_sol(MIN_BALANCE_LAMPORTS)
        ));
    }
    Ok(())
}
