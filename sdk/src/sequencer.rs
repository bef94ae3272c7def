//! Two-transaction launch sequence
//!
//! Each transaction goes through build, simulate, sign-and-send and confirm
//! before the next step starts. Any failure halts the sequence; nothing is
//! retried and nothing already confirmed is rolled back.

use std::sync::Arc;

use solana_sdk::{pubkey::Pubkey, signature::Signature};
use tracing::{debug, info, warn};

use crate::{
    client::{Network, Wallet},
    core::{
        classify_error, FormInput, LaunchError, LaunchReceipt, LaunchResult, MintIdentity,
        SubmissionStep, MIN_BALANCE_LAMPORTS,
    },
    instructions::{
        build_transaction, create_mint_instructions, holder_account, mint_sizing,
        mint_supply_instructions, TokenDetails,
    },
    validation::{base_units, validate},
};

/// Submission sequencer bound to one network handle and wallet session
#[derive(Clone)]
pub struct Launchpad {
    network: Arc<dyn Network>,
    wallet: Option<Arc<dyn Wallet>>,
}

/// Result of the second transaction
struct SupplyOutcome {
    holder_account: Pubkey,
    signature: Signature,
    holder_account_created: bool,
}

impl Launchpad {
    pub fn new(network: Arc<dyn Network>, wallet: Option<Arc<dyn Wallet>>) -> Self {
        Self { network, wallet }
    }

    pub fn network(&self) -> &Arc<dyn Network> {
        &self.network
    }

    pub fn wallet(&self) -> Option<&Arc<dyn Wallet>> {
        self.wallet.as_ref()
    }

    /// Run the full sequence for `input`, reporting every step to `on_step`.
    ///
    /// The final step reported is `Success` or `Error` carrying the
    /// classified message.
    pub async fn run<F>(&self, input: &FormInput, mut on_step: F) -> LaunchResult<LaunchReceipt>
    where
        F: FnMut(&SubmissionStep),
    {
        match self.execute(input, &mut on_step).await {
            Ok(receipt) => {
                enter(&mut on_step, SubmissionStep::Success);
                Ok(receipt)
            }
            Err(err) => {
                warn!(error = %err, "launch halted");
                enter(&mut on_step, SubmissionStep::Error(classify_error(&err.to_string())));
                Err(err)
            }
        }
    }

    async fn execute<F>(&self, input: &FormInput, on_step: &mut F) -> LaunchResult<LaunchReceipt>
    where
        F: FnMut(&SubmissionStep),
    {
        enter(on_step, SubmissionStep::Validating);
        validate(input).map_err(LaunchError::Validation)?;
        let amount = base_units(&input.initial_supply)
            .ok_or_else(|| LaunchError::Build("initial supply out of range".into()))?;

        enter(on_step, SubmissionStep::AwaitingWalletConnection);
        let wallet = self.wallet.as_ref().ok_or(LaunchError::WalletNotConnected)?;
        let payer = wallet.address().ok_or(LaunchError::WalletNotConnected)?;

        enter(on_step, SubmissionStep::CheckingBalance);
        let balance = self.network.balance(&payer).await?;
        if balance <= MIN_BALANCE_LAMPORTS {
            return Err(LaunchError::InsufficientBalance {
                required: MIN_BALANCE_LAMPORTS,
                available: balance,
            });
        }

        let mint = MintIdentity::generate();
        info!(mint = %mint.address(), %payer, amount, "launching token");

        let mint_signature = self
            .create_mint(&**wallet, &payer, &mint, &TokenDetails::from(input), on_step)
            .await?;

        let supply = self
            .mint_supply(&**wallet, &payer, &mint.address(), amount, on_step)
            .await
            .inspect_err(|err| {
                // No rollback exists: the mint stays on-chain with zero supply
                warn!(
                    mint = %mint.address(),
                    error = %err,
                    "mint account created but initial supply was not minted"
                );
            })?;

        info!(mint = %mint.address(), signature = %supply.signature, "token launched");
        Ok(LaunchReceipt {
            mint: mint.address(),
            holder_account: supply.holder_account,
            mint_signature,
            supply_signature: supply.signature,
            amount,
            holder_account_created: supply.holder_account_created,
        })
    }

    /// Transaction 1: allocate the mint, attach metadata, initialize
    async fn create_mint<F>(
        &self,
        wallet: &dyn Wallet,
        payer: &Pubkey,
        mint: &MintIdentity,
        details: &TokenDetails,
        on_step: &mut F,
    ) -> LaunchResult<Signature>
    where
        F: FnMut(&SubmissionStep),
    {
        enter(on_step, SubmissionStep::BuildingTx1);
        let mint_address = mint.address();
        let sizing = mint_sizing(&mint_address, details)?;
        let lamports = self
            .network
            .minimum_balance_for_rent_exemption(sizing.rent_space())
            .await?;
        debug!(
            mint_len = sizing.mint_len,
            metadata_len = sizing.metadata_len,
            lamports,
            "mint sizing"
        );
        let instructions = create_mint_instructions(payer, &mint_address, details, &sizing, lamports)?;

        let blockhash = self.network.latest_blockhash().await?;
        let mut transaction = build_transaction(&instructions, payer, blockhash);
        transaction.try_partial_sign(&[mint.keypair()], blockhash)?;

        enter(on_step, SubmissionStep::SimulatingTx1);
        let report = self.network.simulate(&transaction).await?;
        debug!(
            units = ?report.units_consumed,
            last_log = report.logs.last().map(String::as_str),
            "transaction 1 simulated"
        );

        enter(on_step, SubmissionStep::SendingTx1);
        let signature = wallet.sign_and_send(transaction, self.network.as_ref()).await?;

        enter(on_step, SubmissionStep::ConfirmingTx1);
        self.network.confirm_transaction(&signature, &blockhash).await?;
        info!(mint = %mint_address, %signature, "mint account created");

        Ok(signature)
    }

    /// Transaction 2: open the holder account if needed and mint the supply
    async fn mint_supply<F>(
        &self,
        wallet: &dyn Wallet,
        payer: &Pubkey,
        mint: &Pubkey,
        amount: u64,
        on_step: &mut F,
    ) -> LaunchResult<SupplyOutcome>
    where
        F: FnMut(&SubmissionStep),
    {
        enter(on_step, SubmissionStep::BuildingTx2);
        let holder = holder_account(payer, mint);
        let holder_exists = self.network.account_exists(&holder).await?;
        if holder_exists {
            debug!(%holder, "holder account already exists");
        }
        let instructions = mint_supply_instructions(payer, mint, amount, holder_exists)?;

        let blockhash = self.network.latest_blockhash().await?;
        let transaction = build_transaction(&instructions, payer, blockhash);

        enter(on_step, SubmissionStep::SimulatingTx2);
        let report = self.network.simulate(&transaction).await?;
        debug!(
            units = ?report.units_consumed,
            last_log = report.logs.last().map(String::as_str),
            "transaction 2 simulated"
        );

        enter(on_step, SubmissionStep::SendingTx2);
        let signature = wallet.sign_and_send(transaction, self.network.as_ref()).await?;

        enter(on_step, SubmissionStep::ConfirmingTx2);
        self.network.confirm_transaction(&signature, &blockhash).await?;

        Ok(SupplyOutcome {
            holder_account: holder,
            signature,
            holder_account_created: !holder_exists,
        })
    }
}

fn enter<F>(on_step: &mut F, step: SubmissionStep)
where
    F: FnMut(&SubmissionStep),
{
    debug!(?step, "launch step");
    on_step(&step);
}
