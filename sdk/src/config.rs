use std::time::Duration;

use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use url::Url;

use crate::core::{DEVNET_RPC_URL, EXPLORER_URL, LOCALNET_RPC_URL};

/// Connection settings for a launch session
#[derive(Clone, Debug)]
pub struct LaunchConfig {
    /// RPC endpoint URL
    pub rpc_url: String,

    /// Cluster name passed to the explorer (`devnet`, `custom`, ...)
    pub cluster: String,

    /// Commitment used for reads, simulation and confirmation
    pub commitment: CommitmentConfig,

    /// Delay between signature status polls
    pub confirm_poll_interval: Duration,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self::devnet()
    }
}

impl LaunchConfig {
    pub fn devnet() -> Self {
        Self {
            rpc_url: DEVNET_RPC_URL.to_string(),
            cluster: "devnet".to_string(),
            commitment: CommitmentConfig::confirmed(),
            confirm_poll_interval: Duration::from_millis(500),
        }
    }

    pub fn localnet() -> Self {
        Self {
            rpc_url: LOCALNET_RPC_URL.to_string(),
            cluster: "custom".to_string(),
            commitment: CommitmentConfig::confirmed(),
            confirm_poll_interval: Duration::from_millis(250),
        }
    }

    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self.cluster = if self.rpc_url == DEVNET_RPC_URL {
            "devnet".to_string()
        } else {
            "custom".to_string()
        };
        self
    }

    pub fn with_commitment(mut self, commitment: CommitmentConfig) -> Self {
        self.commitment = commitment;
        self
    }

    pub fn with_confirm_poll_interval(mut self, interval: Duration) -> Self {
        self.confirm_poll_interval = interval;
        self
    }

    /// Explorer page for an account on this cluster
    pub fn explorer_address_url(&self, address: &Pubkey) -> String {
        let base = format!("{}/address/{}", EXPLORER_URL, address);
        let mut params = vec![("cluster", self.cluster.as_str())];
        if self.cluster == "custom" {
            params.push(("customUrl", self.rpc_url.as_str()));
        }
        Url::parse_with_params(&base, &params)
            .map(String::from)
            .unwrap_or(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_devnet() {
        let config = LaunchConfig::default();
        assert_eq!(config.rpc_url, DEVNET_RPC_URL);
        assert_eq!(config.cluster, "devnet");
    }

    #[test]
    fn test_explorer_url_devnet() {
        let address = Pubkey::new_unique();
        let url = LaunchConfig::devnet().explorer_address_url(&address);
        assert_eq!(
            url,
            format!("https://explorer.solana.com/address/{}?cluster=devnet", address)
        );
    }

    #[test]
    fn test_explorer_url_custom_endpoint_is_encoded() {
        let address = Pubkey::new_unique();
        let url = LaunchConfig::localnet().explorer_address_url(&address);
        assert!(url.ends_with("?cluster=custom&customUrl=http%3A%2F%2Flocalhost%3A8899"));
    }

    #[test]
    fn test_with_rpc_url_switches_cluster() {
        let config = LaunchConfig::devnet().with_rpc_url("http://127.0.0.1:8899");
        assert_eq!(config.cluster, "custom");
        let config = config.with_rpc_url(DEVNET_RPC_URL);
        assert_eq!(config.cluster, "devnet");
    }
}
