//! Transaction 1: mint account with embedded metadata

use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_instruction};
use spl_token_2022::{
    extension::{metadata_pointer, ExtensionType},
    instruction as token_instruction,
    state::Mint,
};
use spl_token_metadata_interface::{instruction as metadata_instruction, state::TokenMetadata};

use crate::core::{token_program_id, FormInput, LaunchError, LaunchResult, DECIMALS};

/// Metadata written into the mint
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenDetails {
    pub name: String,
    pub symbol: String,
    /// Image URL stored as the metadata URI
    pub uri: String,
}

impl From<&FormInput> for TokenDetails {
    fn from(input: &FormInput) -> Self {
        Self {
            name: input.token_name.clone(),
            symbol: input.token_symbol.clone(),
            uri: input.image_url.clone(),
        }
    }
}

/// Account sizes that determine the mint's rent deposit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintSizing {
    /// Mint with the metadata-pointer extension, allocated up front
    pub mint_len: usize,
    /// TLV entry the metadata initialization appends
    pub metadata_len: usize,
}

impl MintSizing {
    /// Bytes the rent-exempt deposit must cover once metadata is written
    pub fn rent_space(&self) -> usize {
        self.mint_len + self.metadata_len
    }
}

/// Compute the mint sizing for the given metadata
pub fn mint_sizing(mint: &Pubkey, details: &TokenDetails) -> LaunchResult<MintSizing> {
    let mint_len = ExtensionType::try_calculate_account_len::<Mint>(&[ExtensionType::MetadataPointer])
        .map_err(|e| LaunchError::Build(format!("mint size: {}", e)))?;

    let metadata = TokenMetadata {
        mint: *mint,
        name: details.name.clone(),
        symbol: details.symbol.clone(),
        uri: details.uri.clone(),
        ..Default::default()
    };
    let metadata_len = metadata
        .tlv_size_of()
        .map_err(|e| LaunchError::Build(format!("metadata size: {}", e)))?;

    Ok(MintSizing {
        mint_len,
        metadata_len,
    })
}

/// Build the instructions that allocate the mint, point it at itself for
/// metadata, initialize it and write the metadata.
///
/// `payer` becomes mint authority, metadata-pointer authority and metadata
/// update authority. `lamports` must cover `MintSizing::rent_space`.
pub fn create_mint_instructions(
    payer: &Pubkey,
    mint: &Pubkey,
    details: &TokenDetails,
    sizing: &MintSizing,
    lamports: u64,
) -> LaunchResult<Vec<Instruction>> {
    let token_program = token_program_id();

    let create_account_ix = system_instruction::create_account(
        payer,
        mint,
        lamports,
        sizing.mint_len as u64,
        &token_program,
    );

    let metadata_pointer_ix = metadata_pointer::instruction::initialize(
        &token_program,
        mint,
        Some(*payer),
        Some(*mint),
    )?;

    let init_mint_ix =
        token_instruction::initialize_mint(&token_program, mint, payer, None, DECIMALS)?;

    let init_metadata_ix = metadata_instruction::initialize(
        &token_program,
        mint,
        payer,
        mint,
        payer,
        details.name.clone(),
        details.symbol.clone(),
        details.uri.clone(),
    );

    Ok(vec![
        create_account_ix,
        metadata_pointer_ix,
        init_mint_ix,
        init_metadata_ix,
    ])
}
