//! Token Launchpad SDK
//!
//! Creates a fungible Token-2022 token with embedded metadata through a
//! connected wallet:
//! - Client-side form validation
//! - Mint account creation with metadata (transaction 1)
//! - Holder account creation and initial mint (transaction 2)
//! - Pre-flight simulation and error classification for both

pub mod client;
pub mod config;
pub mod core;
pub mod form;
pub mod instructions;
pub mod sequencer;
pub mod shell;
pub mod testing;
pub mod validation;

pub use client::{KeypairWallet, Network, RpcNetwork, SimulationReport, Wallet};
pub use config::LaunchConfig;
pub use crate::core::*;
pub use form::LaunchForm;
pub use sequencer::Launchpad;
pub use shell::Shell;
pub use validation::validate;
