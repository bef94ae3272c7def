//! Basic usage example for the launchpad SDK
//!
//! Validates a form offline, then launches against a local validator using a
//! freshly generated (and airdropped) payer.

use std::sync::Arc;

use launchpad_sdk::{validate, FormInput, KeypairWallet, LaunchConfig, LaunchForm, Shell};
use solana_sdk::{native_token::LAMPORTS_PER_SOL, signature::Keypair, signer::Signer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("=== Launchpad SDK Basic Usage ===\n");

    // 1. Offline validation
    let bad = FormInput::new("", "FOO", "not-a-url", "12.5");
    if let Err(errors) = validate(&bad) {
        println!("Rejected input:");
        for (field, message) in errors.iter() {
            println!("  {}: {}", field, message);
        }
    }

    // 2. Shell connected to a local validator
    let config = LaunchConfig::localnet();
    let payer = Keypair::new();
    let payer_address = payer.pubkey();

    let network = launchpad_sdk::RpcNetwork::new(&config);
    let airdrop = network.rpc().request_airdrop(&payer_address, LAMPORTS_PER_SOL).await?;
    network.rpc().poll_for_signature(&airdrop).await?;

    let mut shell = Shell::with_network(config, Arc::new(network));
    shell.connect(Arc::new(KeypairWallet::new(payer)));

    // 3. Fill and submit the form
    let mut form = LaunchForm::new();
    form.set_token_name("Foo");
    form.set_token_symbol("FOO");
    form.set_image_url("https://x.test/i.png");
    form.set_initial_supply("1000");

    match form.submit(&shell.launchpad()).await {
        Some(receipt) => {
            println!("\n{}", form.status().message());
            println!("Explorer: {}", shell.explorer_url(&receipt.mint));
        }
        None => println!("\nLaunch failed: {}", form.status().message()),
    }

    Ok(())
}
