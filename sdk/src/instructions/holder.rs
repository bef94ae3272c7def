//! Transaction 2: holder account and initial supply

use solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use spl_associated_token_account::{
    get_associated_token_address_with_program_id, instruction::create_associated_token_account,
};
use spl_token_2022::instruction as token_instruction;

use crate::core::{token_program_id, LaunchResult};

/// Associated Token-2022 account of `owner` for `mint`
pub fn holder_account(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(owner, mint, &token_program_id())
}

/// Build the instructions that open the owner's associated account and mint
/// `amount` base units into it. Account creation is skipped when
/// `holder_exists` is set.
pub fn mint_supply_instructions(
    payer: &Pubkey,
    mint: &Pubkey,
    amount: u64,
    holder_exists: bool,
) -> LaunchResult<Vec<Instruction>> {
    let token_program = token_program_id();
    let holder = holder_account(payer, mint);

    let mut instructions = Vec::with_capacity(2);
    if !holder_exists {
        instructions.push(create_associated_token_account(
            payer,
            payer,
            mint,
            &token_program,
        ));
    }
    instructions.push(token_instruction::mint_to(
        &token_program,
        mint,
        &holder,
        payer,
        &[],
        amount,
    )?);

    Ok(instructions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spl_token_2022::instruction::TokenInstruction;

    #[test]
    fn test_creates_holder_then_mints() {
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let ixs = mint_supply_instructions(&payer, &mint, 5_000_000_000, false).unwrap();
        assert_eq!(ixs.len(), 2);
        assert_eq!(ixs[0].program_id, spl_associated_token_account::id());
        assert_eq!(ixs[1].program_id, spl_token_2022::ID);
    }

    #[test]
    fn test_existing_holder_only_mints() {
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let ixs = mint_supply_instructions(&payer, &mint, 1, true).unwrap();
        assert_eq!(ixs.len(), 1);

        let ix = &ixs[0];
        assert_eq!(ix.program_id, spl_token_2022::ID);
        assert_eq!(ix.accounts[0].pubkey, mint);
        assert_eq!(ix.accounts[1].pubkey, holder_account(&payer, &mint));
        assert_eq!(ix.accounts[2].pubkey, payer);
    }

    #[test]
    fn test_mint_to_carries_scaled_amount() {
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let ixs = mint_supply_instructions(&payer, &mint, 5_000_000_000, true).unwrap();

        match TokenInstruction::unpack(&ixs[0].data).unwrap() {
            TokenInstruction::MintTo { amount } => assert_eq!(amount, 5_000_000_000),
            other => panic!("unexpected instruction: {:?}", other),
        }
    }
}
