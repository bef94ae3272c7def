use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use serde_json::json;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};

/// Form field identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    TokenName,
    TokenSymbol,
    ImageUrl,
    InitialSupply,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::TokenName,
        Field::TokenSymbol,
        Field::ImageUrl,
        Field::InitialSupply,
    ];

    /// Name used in serialized form input
    pub fn key(&self) -> &'static str {
        match self {
            Field::TokenName => "tokenName",
            Field::TokenSymbol => "tokenSymbol",
            Field::ImageUrl => "imageUrl",
            Field::InitialSupply => "initialSupply",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Field::TokenName => "Token Name",
            Field::TokenSymbol => "Token Symbol",
            Field::ImageUrl => "Image URL",
            Field::InitialSupply => "Initial Supply",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw values typed into the launch form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInput {
    pub token_name: String,
    pub token_symbol: String,
    pub image_url: String,
    pub initial_supply: String,
}

impl FormInput {
    pub fn new(
        token_name: impl Into<String>,
        token_symbol: impl Into<String>,
        image_url: impl Into<String>,
        initial_supply: impl Into<String>,
    ) -> Self {
        Self {
            token_name: token_name.into(),
            token_symbol: token_symbol.into(),
            image_url: image_url.into(),
            initial_supply: initial_supply.into(),
        }
    }

    /// Current value of a field
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::TokenName => self.token_name.as_str(),
            Field::TokenSymbol => self.token_symbol.as_str(),
            Field::ImageUrl => self.image_url.as_str(),
            Field::InitialSupply => self.initial_supply.as_str(),
        }
    }
}

/// Per-field validation messages
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// What the status banner shows
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    /// Informational progress message
    Progress(String),
    /// Launch completed
    Success { mint: Pubkey, message: String },
    /// Launch halted
    Error(String),
}

impl SubmissionStatus {
    /// Banner text, empty when idle
    pub fn message(&self) -> &str {
        match self {
            SubmissionStatus::Idle => "",
            SubmissionStatus::Progress(message) => message.as_str(),
            SubmissionStatus::Success { message, .. } => message.as_str(),
            SubmissionStatus::Error(message) => message.as_str(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SubmissionStatus::Error(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionStatus::Success { .. })
    }
}

/// Submission sequencer state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionStep {
    #[default]
    Idle,
    Validating,
    AwaitingWalletConnection,
    CheckingBalance,
    BuildingTx1,
    SimulatingTx1,
    SendingTx1,
    ConfirmingTx1,
    BuildingTx2,
    SimulatingTx2,
    SendingTx2,
    ConfirmingTx2,
    Success,
    Error(String),
}

impl SubmissionStep {
    /// Progress text for steps that show one
    pub fn progress_message(&self) -> Option<&'static str> {
        let message = match self {
            SubmissionStep::Validating => "Validating token details...",
            SubmissionStep::AwaitingWalletConnection => "Checking wallet connection...",
            SubmissionStep::CheckingBalance => "Checking wallet balance...",
            SubmissionStep::BuildingTx1 => "Preparing mint account with metadata...",
            SubmissionStep::SimulatingTx1 => "Simulating mint creation...",
            SubmissionStep::SendingTx1 => "Waiting for wallet to sign mint creation (1/2)...",
            SubmissionStep::ConfirmingTx1 => "Confirming mint creation...",
            SubmissionStep::BuildingTx2 => "Preparing token account and initial supply...",
            SubmissionStep::SimulatingTx2 => "Simulating initial mint...",
            SubmissionStep::SendingTx2 => "Waiting for wallet to sign initial mint (2/2)...",
            SubmissionStep::ConfirmingTx2 => "Confirming initial mint...",
            SubmissionStep::Idle | SubmissionStep::Success | SubmissionStep::Error(_) => {
                return None
            }
        };
        Some(message)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionStep::Success | SubmissionStep::Error(_))
    }
}

/// Ephemeral keypair identifying the mint of one submission
pub struct MintIdentity {
    keypair: Keypair,
}

impl MintIdentity {
    /// Fresh identity for a new submission
    pub fn generate() -> Self {
        Self {
            keypair: Keypair::new(),
        }
    }

    pub fn address(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }
}

impl fmt::Debug for MintIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MintIdentity")
            .field("address", &self.address())
            .finish()
    }
}

/// Outcome of a completed launch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchReceipt {
    pub mint: Pubkey,
    pub holder_account: Pubkey,
    pub mint_signature: Signature,
    pub supply_signature: Signature,
    /// Base units minted (initial supply × 10^decimals)
    pub amount: u64,
    /// False when the holder account already existed
    pub holder_account_created: bool,
}

impl LaunchReceipt {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "mint": self.mint.to_string(),
            "holderAccount": self.holder_account.to_string(),
            "mintSignature": self.mint_signature.to_string(),
            "supplySignature": self.supply_signature.to_string(),
            "amount": self.amount,
            "holderAccountCreated": self.holder_account_created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_input_uses_camel_case_keys() {
        let input: FormInput = serde_json::from_str(
            r#"{"tokenName":"Foo","tokenSymbol":"FOO","imageUrl":"https://x.test/i.png","initialSupply":"1000"}"#,
        )
        .unwrap();
        assert_eq!(input, FormInput::new("Foo", "FOO", "https://x.test/i.png", "1000"));
        for field in Field::ALL {
            assert!(serde_json::to_value(&input).unwrap().get(field.key()).is_some());
        }
    }

    #[test]
    fn test_field_errors_display_in_field_order() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::InitialSupply, "must be a whole number");
        errors.insert(Field::TokenName, "is required");
        assert_eq!(
            errors.to_string(),
            "Token Name: is required; Initial Supply: must be a whole number"
        );
    }

    #[test]
    fn test_progress_messages() {
        assert!(SubmissionStep::SendingTx1.progress_message().is_some());
        assert!(SubmissionStep::Success.progress_message().is_none());
        assert!(SubmissionStep::Error("x".into()).is_terminal());
        assert!(!SubmissionStep::ConfirmingTx2.is_terminal());
    }

    #[test]
    fn test_mint_identity_is_fresh() {
        assert_ne!(MintIdentity::generate().address(), MintIdentity::generate().address());
    }
}
