//! Testing utilities for the launch sequence
//!
//! In-memory `Network` and `Wallet` implementations that record every call
//! and can be told to fail at a given point.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex, MutexGuard,
};

use async_trait::async_trait;
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};

use crate::{
    client::{Network, SimulationReport, Wallet},
    core::{LaunchError, LaunchResult, MIN_BALANCE_LAMPORTS},
};

/// A call made against `MockNetwork`
#[derive(Clone, Debug, PartialEq)]
pub enum NetworkCall {
    Balance(Pubkey),
    LatestBlockhash,
    RentExemption(usize),
    Simulate(Transaction),
    Send(Transaction),
    Confirm(Signature),
    AccountExists(Pubkey),
}

#[derive(Default)]
struct MockState {
    calls: Vec<NetworkCall>,
    simulate_count: usize,
    send_count: usize,
    blockhash_count: u8,
}

/// Scriptable in-memory cluster
pub struct MockNetwork {
    balance: u64,
    accounts_exist: bool,
    fail_simulation: Option<(usize, String)>,
    fail_send: Option<(usize, String)>,
    fail_confirm: Option<LaunchError>,
    state: Mutex<MockState>,
}

impl Default for MockNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNetwork {
    /// Cluster where the payer is well funded and every step succeeds
    pub fn new() -> Self {
        Self {
            balance: MIN_BALANCE_LAMPORTS * 20,
            accounts_exist: false,
            fail_simulation: None,
            fail_send: None,
            fail_confirm: None,
            state: Mutex::new(MockState::default()),
        }
    }

    pub fn with_balance(mut self, lamports: u64) -> Self {
        self.balance = lamports;
        self
    }

    /// Report every account lookup as existing
    pub fn with_existing_accounts(mut self) -> Self {
        self.accounts_exist = true;
        self
    }

    /// Reject the `index`-th simulation (zero based)
    pub fn fail_simulation_at(mut self, index: usize, message: impl Into<String>) -> Self {
        self.fail_simulation = Some((index, message.into()));
        self
    }

    /// Reject the `index`-th send (zero based)
    pub fn fail_send_at(mut self, index: usize, message: impl Into<String>) -> Self {
        self.fail_send = Some((index, message.into()));
        self
    }

    /// Fail every confirmation with `error`
    pub fn fail_confirm_with(mut self, error: LaunchError) -> Self {
        self.fail_confirm = Some(error);
        self
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: NetworkCall) {
        self.state().calls.push(call);
    }

    /// Every call in order
    pub fn calls(&self) -> Vec<NetworkCall> {
        self.state().calls.clone()
    }

    /// Transactions passed to `simulate`
    pub fn simulated(&self) -> Vec<Transaction> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                NetworkCall::Simulate(tx) => Some(tx),
                _ => None,
            })
            .collect()
    }

    /// Transactions passed to `send_transaction`
    pub fn sent(&self) -> Vec<Transaction> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                NetworkCall::Send(tx) => Some(tx),
                _ => None,
            })
            .collect()
    }
}

fn clone_error(error: &LaunchError) -> LaunchError {
    match error {
        LaunchError::BlockhashExpired => LaunchError::BlockhashExpired,
        LaunchError::Confirm(message) => LaunchError::Confirm(message.clone()),
        other => LaunchError::Rpc(other.to_string()),
    }
}

#[async_trait]
impl Network for MockNetwork {
    fn endpoint(&self) -> String {
        "mock://network".to_string()
    }

    async fn balance(&self, address: &Pubkey) -> LaunchResult<u64> {
        self.record(NetworkCall::Balance(*address));
        Ok(self.balance)
    }

    async fn latest_blockhash(&self) -> LaunchResult<Hash> {
        let mut state = self.state();
        state.calls.push(NetworkCall::LatestBlockhash);
        state.blockhash_count = state.blockhash_count.wrapping_add(1);
        Ok(Hash::new_from_array([state.blockhash_count; 32]))
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> LaunchResult<u64> {
        self.record(NetworkCall::RentExemption(data_len));
        // Roughly the cluster's rate: (128 + len) * 3480 * 2
        Ok((128 + data_len as u64) * 6_960)
    }

    async fn simulate(&self, transaction: &Transaction) -> LaunchResult<SimulationReport> {
        let mut state = self.state();
        state.calls.push(NetworkCall::Simulate(transaction.clone()));
        let index = state.simulate_count;
        state.simulate_count += 1;

        match &self.fail_simulation {
            Some((at, message)) if *at == index => Err(LaunchError::Simulation(message.clone())),
            _ => Ok(SimulationReport {
                logs: vec!["Program log: mock".to_string()],
                units_consumed: Some(5_000),
            }),
        }
    }

    async fn send_transaction(&self, transaction: &Transaction) -> LaunchResult<Signature> {
        let mut state = self.state();
        state.calls.push(NetworkCall::Send(transaction.clone()));
        let index = state.send_count;
        state.send_count += 1;

        match &self.fail_send {
            Some((at, message)) if *at == index => Err(LaunchError::Send(message.clone())),
            _ => Ok(transaction.signatures.first().copied().unwrap_or_default()),
        }
    }

    async fn confirm_transaction(&self, signature: &Signature, _blockhash: &Hash) -> LaunchResult<()> {
        self.record(NetworkCall::Confirm(*signature));
        match &self.fail_confirm {
            Some(error) => Err(clone_error(error)),
            None => Ok(()),
        }
    }

    async fn account_exists(&self, address: &Pubkey) -> LaunchResult<bool> {
        self.record(NetworkCall::AccountExists(*address));
        Ok(self.accounts_exist)
    }
}

/// Wallet that signs locally and counts signature requests
pub struct MockWallet {
    keypair: Keypair,
    connected: bool,
    sign_requests: AtomicUsize,
}

impl MockWallet {
    pub fn connected() -> Self {
        Self {
            keypair: Keypair::new(),
            connected: true,
            sign_requests: AtomicUsize::new(0),
        }
    }

    /// Session present but exposing no address
    pub fn without_address() -> Self {
        Self {
            connected: false,
            ..Self::connected()
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// Number of `sign_and_send` calls so far
    pub fn sign_requests(&self) -> usize {
        self.sign_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Wallet for MockWallet {
    fn address(&self) -> Option<Pubkey> {
        self.connected.then(|| self.keypair.pubkey())
    }

    async fn sign_and_send(
        &self,
        mut transaction: Transaction,
        network: &dyn Network,
    ) -> LaunchResult<Signature> {
        self.sign_requests.fetch_add(1, Ordering::SeqCst);
        let blockhash = transaction.message.recent_blockhash;
        transaction.try_partial_sign(&[&self.keypair], blockhash)?;
        network.send_transaction(&transaction).await
    }
}
