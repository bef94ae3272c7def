use async_trait::async_trait;
use solana_client::{nonblocking::rpc_client::RpcClient, rpc_config::RpcSimulateTransactionConfig};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{self, Transaction, TransactionError},
};
use std::time::Duration;
use tracing::debug;

use crate::{
    config::LaunchConfig,
    core::{LaunchError, LaunchResult},
};

/// Outcome of a successful pre-flight simulation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimulationReport {
    pub logs: Vec<String>,
    pub units_consumed: Option<u64>,
}

/// Cluster operations the launch sequence depends on
#[async_trait]
pub trait Network: Send + Sync {
    /// Endpoint this handle talks to
    fn endpoint(&self) -> String;

    /// Lamport balance of an account
    async fn balance(&self, address: &Pubkey) -> LaunchResult<u64>;

    async fn latest_blockhash(&self) -> LaunchResult<Hash>;

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> LaunchResult<u64>;

    /// Dry-run a transaction without signature verification. A rejected
    /// transaction is reported as `LaunchError::Simulation`.
    async fn simulate(&self, transaction: &Transaction) -> LaunchResult<SimulationReport>;

    async fn send_transaction(&self, transaction: &Transaction) -> LaunchResult<Signature>;

    /// Wait until `signature` reaches the configured commitment, or until
    /// `blockhash` expires
    async fn confirm_transaction(&self, signature: &Signature, blockhash: &Hash) -> LaunchResult<()>;

    async fn account_exists(&self, address: &Pubkey) -> LaunchResult<bool>;
}

/// `Network` over the Solana JSON-RPC client
pub struct RpcNetwork {
    rpc: RpcClient,
    commitment: CommitmentConfig,
    poll_interval: Duration,
}

impl RpcNetwork {
    pub fn new(config: &LaunchConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(config.rpc_url.clone(), config.commitment),
            commitment: config.commitment,
            poll_interval: config.confirm_poll_interval,
        }
    }

    /// Get the RPC client
    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    async fn signature_status(
        &self,
        signature: &Signature,
    ) -> LaunchResult<Option<transaction::Result<()>>> {
        Ok(self
            .rpc
            .get_signature_status_with_commitment(signature, self.commitment)
            .await?)
    }
}

/// Rejected simulation, with the last program log line when there is one
fn simulation_error(err: &TransactionError, logs: &[String]) -> LaunchError {
    let detail = match logs.last() {
        Some(last) => format!("{:?} ({})", err, last),
        None => format!("{:?}", err),
    };
    LaunchError::Simulation(detail)
}

/// Final outcome for a polled signature status, `None` while still pending
fn settle(status: Option<transaction::Result<()>>) -> Option<LaunchResult<()>> {
    match status? {
        Ok(()) => Some(Ok(())),
        Err(err) => Some(Err(LaunchError::Confirm(err.to_string()))),
    }
}

#[async_trait]
impl Network for RpcNetwork {
    fn endpoint(&self) -> String {
        self.rpc.url()
    }

    async fn balance(&self, address: &Pubkey) -> LaunchResult<u64> {
        Ok(self.rpc.get_balance(address).await?)
    }

    async fn latest_blockhash(&self) -> LaunchResult<Hash> {
        Ok(self.rpc.get_latest_blockhash().await?)
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> LaunchResult<u64> {
        Ok(self.rpc.get_minimum_balance_for_rent_exemption(data_len).await?)
    }

    async fn simulate(&self, transaction: &Transaction) -> LaunchResult<SimulationReport> {
        let config = RpcSimulateTransactionConfig {
            sig_verify: false,
            commitment: Some(self.commitment),
            ..Default::default()
        };
        let result = self
            .rpc
            .simulate_transaction_with_config(transaction, config)
            .await
            .map_err(|e| LaunchError::Simulation(e.to_string()))?;

        let logs = result.value.logs.unwrap_or_default();
        if let Some(err) = result.value.err {
            return Err(simulation_error(&err, &logs));
        }

        Ok(SimulationReport {
            logs,
            units_consumed: result.value.units_consumed,
        })
    }

    async fn send_transaction(&self, transaction: &Transaction) -> LaunchResult<Signature> {
        self.rpc
            .send_transaction(transaction)
            .await
            .map_err(|e| LaunchError::Send(e.to_string()))
    }

    async fn confirm_transaction(&self, signature: &Signature, blockhash: &Hash) -> LaunchResult<()> {
        loop {
            let status = self.signature_status(signature).await?;
            if let Some(settled) = settle(status) {
                return settled;
            }

            if !self.rpc.is_blockhash_valid(blockhash, self.commitment).await? {
                // It may have landed in the last valid slot
                let status = self.signature_status(signature).await?;
                return settle(status).unwrap_or(Err(LaunchError::BlockhashExpired));
            }
            debug!(%signature, "awaiting confirmation");
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn account_exists(&self, address: &Pubkey) -> LaunchResult<bool> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.commitment)
            .await?;
        Ok(response.value.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::instruction::InstructionError;

    #[test]
    fn test_simulation_error_includes_last_log() {
        let logs = vec![
            "Program log: Instruction: InitializeMint".to_string(),
            "Program log: Error: account already in use".to_string(),
        ];
        match simulation_error(&TransactionError::AccountInUse, &logs) {
            LaunchError::Simulation(detail) => {
                assert!(detail.starts_with("AccountInUse"));
                assert!(detail.ends_with("(Program log: Error: account already in use)"));
                assert!(!detail.contains("InitializeMint"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_simulation_error_without_logs() {
        let err = simulation_error(&TransactionError::InsufficientFundsForFee, &[]);
        assert!(matches!(err, LaunchError::Simulation(ref detail) if detail == "InsufficientFundsForFee"));
    }

    #[test]
    fn test_settle_pending_status() {
        assert!(settle(None).is_none());
    }

    #[test]
    fn test_settle_confirmed_status() {
        assert!(matches!(settle(Some(Ok(()))), Some(Ok(()))));
    }

    #[test]
    fn test_settle_failed_status() {
        let failed = TransactionError::InstructionError(0, InstructionError::Custom(1));
        match settle(Some(Err(failed))) {
            Some(Err(LaunchError::Confirm(message))) => assert!(!message.is_empty()),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
