pub mod network;
pub mod wallet;

pub use network::{Network, RpcNetwork, SimulationReport};
pub use wallet::{KeypairWallet, Wallet};
