use solana_sdk::pubkey::Pubkey;

/// Development cluster every launch targets by default
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";

/// Local test validator
pub const LOCALNET_RPC_URL: &str = "http://localhost:8899";

/// Block explorer used for links to launched mints
pub const EXPLORER_URL: &str = "https://explorer.solana.com";

/// Decimal places of every launched mint
pub const DECIMALS: u8 = 9;

/// Base units per whole token (10^DECIMALS)
pub const BASE_UNITS_PER_TOKEN: u64 = 10u64.pow(DECIMALS as u32);

/// Spendable balance (lamports) the payer must exceed before any transaction
/// is built. Covers mint and metadata rent, associated account rent and the
/// fees of both transactions.
pub const MIN_BALANCE_LAMPORTS: u64 = 50_000_000;

/// Token program that owns launched mints
pub fn token_program_id() -> Pubkey {
    spl_token_2022::ID
}
