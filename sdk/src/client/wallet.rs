use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use tracing::debug;

use super::Network;
use crate::core::{LaunchError, LaunchResult};

/// A connected wallet session
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Connected account, `None` while the session has no address
    fn address(&self) -> Option<Pubkey>;

    /// Add the wallet signature to `transaction` and submit it through
    /// `network`. Signatures already present are kept.
    async fn sign_and_send(
        &self,
        transaction: Transaction,
        network: &dyn Network,
    ) -> LaunchResult<Signature>;
}

/// Wallet backed by a local keypair
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    /// Load a Solana CLI keypair file, expanding a leading `~`
    pub fn from_file(path: &str) -> LaunchResult<Self> {
        let expanded_path = if path.starts_with('~') {
            let home = std::env::var("HOME")
                .map_err(|_| LaunchError::Keypair("HOME environment variable not set".into()))?;
            path.replacen('~', &home, 1)
        } else {
            path.to_string()
        };

        let keypair = read_keypair_file(&expanded_path)
            .map_err(|e| LaunchError::Keypair(format!("{}: {}", expanded_path, e)))?;
        Ok(Self::new(keypair))
    }
}

#[async_trait]
impl Wallet for KeypairWallet {
    fn address(&self) -> Option<Pubkey> {
        Some(self.keypair.pubkey())
    }

    async fn sign_and_send(
        &self,
        mut transaction: Transaction,
        network: &dyn Network,
    ) -> LaunchResult<Signature> {
        let blockhash = transaction.message.recent_blockhash;
        transaction.try_partial_sign(&[&self.keypair], blockhash)?;
        debug!(payer = %self.keypair.pubkey(), "transaction signed");
        network.send_transaction(&transaction).await
    }
}
