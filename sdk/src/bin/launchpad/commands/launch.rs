// Launch command: fills the form and submits it

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use launchpad_sdk::{FormInput, LaunchForm, Shell, SubmissionStatus};

use super::utils::{error, info, progress, success, warn};

#[derive(Args)]
pub struct LaunchCmd {
    /// Token name
    #[arg(long)]
    name: Option<String>,

    /// Token symbol
    #[arg(long)]
    symbol: Option<String>,

    /// Image URL stored as the metadata URI
    #[arg(long)]
    image_url: Option<String>,

    /// Initial supply in whole tokens
    #[arg(long)]
    supply: Option<String>,

    /// JSON file with tokenName, tokenSymbol, imageUrl and initialSupply.
    /// Flags override values from the file.
    #[arg(long)]
    form: Option<PathBuf>,

    /// Print the launch receipt as JSON
    #[arg(long)]
    json: bool,
}

pub async fn execute(cmd: LaunchCmd, shell: &Shell) -> Result<()> {
    let input = match &cmd.form {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read form file {}", path.display()))?;
            serde_json::from_str::<FormInput>(&raw)
                .with_context(|| format!("Invalid form file {}", path.display()))?
        }
        None => FormInput::default(),
    };

    let mut form = LaunchForm::with_input(input);
    if let Some(name) = cmd.name {
        form.set_token_name(name);
    }
    if let Some(symbol) = cmd.symbol {
        form.set_token_symbol(symbol);
    }
    if let Some(image_url) = cmd.image_url {
        form.set_image_url(image_url);
    }
    if let Some(supply) = cmd.supply {
        form.set_initial_supply(supply);
    }

    info("Launching token...");
    let receipt = form
        .submit_with(&shell.launchpad(), |status| {
            if let SubmissionStatus::Progress(message) = status {
                progress(message);
            }
        })
        .await;

    if !form.errors().is_empty() {
        for (field, message) in form.errors().iter() {
            error(&format!("{}: {}", field, message));
        }
        anyhow::bail!("Token details are invalid");
    }

    match (form.status(), receipt) {
        (SubmissionStatus::Success { mint, message }, Some(receipt)) => {
            success(message);
            info(&format!("Explorer: {}", shell.explorer_url(mint)));
            info(&format!("Holder account: {}", receipt.holder_account));
            info(&format!("Mint signature: {}", receipt.mint_signature));
            info(&format!("Supply signature: {}", receipt.supply_signature));
            if !receipt.holder_account_created {
                warn("Holder account already existed; only minted the supply");
            }
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&receipt.to_json())?);
            }
            Ok(())
        }
        (status, _) => {
            error(status.message());
            anyhow::bail!("Token launch failed")
        }
    }
}
