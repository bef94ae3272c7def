pub mod holder;
pub mod mint;

pub use holder::*;
pub use mint::*;

use solana_sdk::{hash::Hash, instruction::Instruction, pubkey::Pubkey, transaction::Transaction};

/// Unsigned transaction paid by `payer` against `blockhash`
pub fn build_transaction(instructions: &[Instruction], payer: &Pubkey, blockhash: Hash) -> Transaction {
    let mut transaction = Transaction::new_with_payer(instructions, Some(payer));
    transaction.message.recent_blockhash = blockhash;
    transaction
}
