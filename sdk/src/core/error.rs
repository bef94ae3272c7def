//! Launch error types

use thiserror::Error;

use super::types::FieldErrors;

/// Label shown when the payer cannot cover rent or fees
pub const INSUFFICIENT_FUNDS_LABEL: &str =
    "Insufficient SOL balance to cover rent and transaction fees. Fund the wallet and try again.";

/// Label shown when a transaction outlived its blockhash
pub const EXPIRED_BLOCKHASH_LABEL: &str =
    "Transaction expired before it was confirmed (blockhash no longer valid). Please try again.";

/// Label shown when a pre-flight simulation rejected a transaction
pub const SIMULATION_FAILED_LABEL: &str =
    "Transaction simulation failed, nothing was signed. Check the token details and try again.";

/// Launch error type
#[derive(Error, Debug)]
pub enum LaunchError {
    /// One or more form fields failed validation
    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    /// No wallet session, or the wallet exposes no address
    #[error("Wallet not connected. Please connect your wallet first.")]
    WalletNotConnected,

    /// Payer balance does not exceed the fixed threshold
    #[error("Insufficient balance: need more than {required} lamports, wallet has {available}")]
    InsufficientBalance { required: u64, available: u64 },

    /// Pre-flight simulation rejected the transaction
    #[error("Transaction simulation failed: {0}")]
    Simulation(String),

    /// Submission to the cluster failed
    #[error("Failed to send transaction: {0}")]
    Send(String),

    /// Transaction landed with an error
    #[error("Transaction failed to confirm: {0}")]
    Confirm(String),

    /// Blockhash expired before the signature was confirmed
    #[error("Transaction expired: blockhash is no longer valid")]
    BlockhashExpired,

    /// Any other RPC failure
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Instruction or transaction construction failed
    #[error("Failed to build transaction: {0}")]
    Build(String),

    /// A signer refused or failed to sign
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Keypair file could not be read
    #[error("Failed to load keypair: {0}")]
    Keypair(String),
}

impl LaunchError {
    /// Status-banner text for this error
    pub fn user_message(&self) -> String {
        classify_error(&self.to_string())
    }
}

impl From<solana_client::client_error::ClientError> for LaunchError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        LaunchError::Rpc(err.to_string())
    }
}

impl From<solana_sdk::program_error::ProgramError> for LaunchError {
    fn from(err: solana_sdk::program_error::ProgramError) -> Self {
        LaunchError::Build(err.to_string())
    }
}

impl From<solana_sdk::signer::SignerError> for LaunchError {
    fn from(err: solana_sdk::signer::SignerError) -> Self {
        LaunchError::Signing(err.to_string())
    }
}

/// Map a raw error message to a friendlier category label.
///
/// Matching is a case-insensitive substring search; messages that match no
/// category are returned verbatim.
pub fn classify_error(message: &str) -> String {
    let lower = message.to_lowercase();
    if lower.contains("insufficient") {
        INSUFFICIENT_FUNDS_LABEL.to_string()
    } else if lower.contains("blockhash") {
        EXPIRED_BLOCKHASH_LABEL.to_string()
    } else if lower.contains("simulation") {
        SIMULATION_FAILED_LABEL.to_string()
    } else {
        message.to_string()
    }
}

pub type LaunchResult<T> = Result<T, LaunchError>;
