//! Application shell: network connection and wallet session
//!
//! Holds the handles the launch form needs and hands them to the sequencer
//! explicitly.

use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use tracing::info;

use crate::{
    client::{Network, RpcNetwork, Wallet},
    config::LaunchConfig,
    core::LaunchResult,
    sequencer::Launchpad,
};

pub struct Shell {
    config: LaunchConfig,
    network: Arc<dyn Network>,
    wallet: Option<Arc<dyn Wallet>>,
}

impl Shell {
    /// Shell connected to the RPC endpoint in `config`, with no wallet
    pub fn new(config: LaunchConfig) -> Self {
        let network = Arc::new(RpcNetwork::new(&config));
        Self::with_network(config, network)
    }

    pub fn with_network(config: LaunchConfig, network: Arc<dyn Network>) -> Self {
        info!(endpoint = %network.endpoint(), "network connection established");
        Self {
            config,
            network,
            wallet: None,
        }
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    pub fn network(&self) -> &Arc<dyn Network> {
        &self.network
    }

    /// Start a wallet session, replacing any previous one
    pub fn connect(&mut self, wallet: Arc<dyn Wallet>) {
        match wallet.address() {
            Some(address) => info!(%address, "wallet connected"),
            None => info!("wallet connected without an address"),
        }
        self.wallet = Some(wallet);
    }

    pub fn disconnect(&mut self) {
        if self.wallet.take().is_some() {
            info!("wallet disconnected");
        }
    }

    pub fn wallet_address(&self) -> Option<Pubkey> {
        self.wallet.as_ref().and_then(|wallet| wallet.address())
    }

    /// Balance of the connected account, `None` without a wallet address
    pub async fn wallet_balance(&self) -> LaunchResult<Option<u64>> {
        match self.wallet_address() {
            Some(address) => Ok(Some(self.network.balance(&address).await?)),
            None => Ok(None),
        }
    }

    /// Sequencer bound to the current network and wallet session
    pub fn launchpad(&self) -> Launchpad {
        Launchpad::new(self.network.clone(), self.wallet.clone())
    }

    pub fn explorer_url(&self, address: &Pubkey) -> String {
        self.config.explorer_address_url(address)
    }
}
