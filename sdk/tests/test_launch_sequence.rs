//! Launch sequence against in-memory network and wallet

use std::sync::Arc;

use launchpad_sdk::{
    instructions::holder_account,
    testing::{MockNetwork, MockWallet, NetworkCall},
    FormInput, LaunchError, LaunchForm, Launchpad, SubmissionStatus, SubmissionStep,
    EXPIRED_BLOCKHASH_LABEL, INSUFFICIENT_FUNDS_LABEL, MIN_BALANCE_LAMPORTS,
    SIMULATION_FAILED_LABEL,
};
use solana_sdk::system_program;

fn foo_input() -> FormInput {
    FormInput::new("Foo", "FOO", "https://x.test/i.png", "1000")
}

fn launchpad(network: &Arc<MockNetwork>, wallet: &Arc<MockWallet>) -> Launchpad {
    Launchpad::new(network.clone(), Some(wallet.clone()))
}

#[tokio::test]
async fn test_successful_launch_reports_mint_address() {
    let network = Arc::new(MockNetwork::new());
    let wallet = Arc::new(MockWallet::connected());
    let mut form = LaunchForm::with_input(foo_input());

    let receipt = form
        .submit(&launchpad(&network, &wallet))
        .await
        .expect("launch should succeed");

    match form.status() {
        SubmissionStatus::Success { mint, message } => {
            assert_eq!(*mint, receipt.mint);
            assert!(message.contains(&receipt.mint.to_string()));
        }
        other => panic!("unexpected status: {:?}", other),
    }
    assert!(form.errors().is_empty());
    assert!(form.can_submit());

    assert_eq!(receipt.amount, 1000 * 1_000_000_000);
    assert_eq!(receipt.holder_account, holder_account(&wallet.pubkey(), &receipt.mint));
    assert!(receipt.holder_account_created);
    assert_eq!(wallet.sign_requests(), 2);

    // Both transactions fully signed and paid by the wallet
    let sent = network.sent();
    assert_eq!(sent.len(), 2);
    for tx in &sent {
        assert_eq!(tx.message.account_keys[0], wallet.pubkey());
        assert!(tx.is_signed());
    }
    assert_eq!(sent[0].message.instructions.len(), 4);
    assert_eq!(sent[1].message.instructions.len(), 2);
    assert_eq!(receipt.mint_signature, sent[0].signatures[0]);
    assert_eq!(receipt.supply_signature, sent[1].signatures[0]);

    // The mint identity co-signs transaction 1 only
    assert!(sent[0].message.account_keys.contains(&receipt.mint));
    assert_eq!(sent[0].signatures.len(), 2);
    assert_eq!(sent[1].signatures.len(), 1);
}

#[tokio::test]
async fn test_steps_follow_the_state_machine() {
    let network = Arc::new(MockNetwork::new());
    let wallet = Arc::new(MockWallet::connected());

    let mut steps = Vec::new();
    launchpad(&network, &wallet)
        .run(&foo_input(), |step| steps.push(step.clone()))
        .await
        .unwrap();

    assert_eq!(
        steps,
        vec![
            SubmissionStep::Validating,
            SubmissionStep::AwaitingWalletConnection,
            SubmissionStep::CheckingBalance,
            SubmissionStep::BuildingTx1,
            SubmissionStep::SimulatingTx1,
            SubmissionStep::SendingTx1,
            SubmissionStep::ConfirmingTx1,
            SubmissionStep::BuildingTx2,
            SubmissionStep::SimulatingTx2,
            SubmissionStep::SendingTx2,
            SubmissionStep::ConfirmingTx2,
            SubmissionStep::Success,
        ]
    );
}

#[tokio::test]
async fn test_each_transaction_is_simulated_then_confirmed() {
    let network = Arc::new(MockNetwork::new());
    let wallet = Arc::new(MockWallet::connected());
    launchpad(&network, &wallet).run(&foo_input(), |_| {}).await.unwrap();

    let kinds: Vec<&str> = network
        .calls()
        .iter()
        .map(|call| match call {
            NetworkCall::Balance(_) => "balance",
            NetworkCall::LatestBlockhash => "blockhash",
            NetworkCall::RentExemption(_) => "rent",
            NetworkCall::Simulate(_) => "simulate",
            NetworkCall::Send(_) => "send",
            NetworkCall::Confirm(_) => "confirm",
            NetworkCall::AccountExists(_) => "exists",
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            "balance", "rent", "blockhash", "simulate", "send", "confirm", "exists", "blockhash",
            "simulate", "send", "confirm",
        ]
    );

    // Each transaction is built on its own blockhash
    let sent = network.sent();
    assert_ne!(sent[0].message.recent_blockhash, sent[1].message.recent_blockhash);
}

#[tokio::test]
async fn test_invalid_input_makes_no_network_call() {
    let network = Arc::new(MockNetwork::new());
    let wallet = Arc::new(MockWallet::connected());
    let mut form = LaunchForm::with_input(FormInput {
        initial_supply: "1,000".into(),
        ..foo_input()
    });

    assert!(form.submit(&launchpad(&network, &wallet)).await.is_none());

    assert_eq!(form.errors().len(), 1);
    assert!(form
        .errors()
        .get(launchpad_sdk::Field::InitialSupply)
        .is_some_and(|message| !message.is_empty()));
    assert_eq!(form.status(), &SubmissionStatus::Idle);
    assert!(network.calls().is_empty());
    assert_eq!(wallet.sign_requests(), 0);
}

#[tokio::test]
async fn test_missing_wallet_makes_no_network_call() {
    let network = Arc::new(MockNetwork::new());
    let mut form = LaunchForm::with_input(foo_input());

    form.submit(&Launchpad::new(network.clone(), None)).await;

    assert!(network.calls().is_empty());
    assert!(form.status().is_error());
    assert!(form.status().message().contains("connect your wallet"));
}

#[tokio::test]
async fn test_wallet_without_address_is_not_connected() {
    let network = Arc::new(MockNetwork::new());
    let wallet = Arc::new(MockWallet::without_address());

    let err = launchpad(&network, &wallet)
        .run(&foo_input(), |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, LaunchError::WalletNotConnected));
    assert!(network.calls().is_empty());
}

#[tokio::test]
async fn test_low_balance_builds_no_transaction() {
    for balance in [0, MIN_BALANCE_LAMPORTS - 1, MIN_BALANCE_LAMPORTS] {
        let network = Arc::new(MockNetwork::new().with_balance(balance));
        let wallet = Arc::new(MockWallet::connected());
        let mut form = LaunchForm::with_input(foo_input());

        form.submit(&launchpad(&network, &wallet)).await;

        assert_eq!(network.calls(), vec![NetworkCall::Balance(wallet.pubkey())]);
        assert_eq!(form.status(), &SubmissionStatus::Error(INSUFFICIENT_FUNDS_LABEL.to_string()));
        assert_eq!(wallet.sign_requests(), 0);
    }
}

#[tokio::test]
async fn test_existing_holder_account_skips_creation() {
    let network = Arc::new(MockNetwork::new().with_existing_accounts());
    let wallet = Arc::new(MockWallet::connected());

    let receipt = launchpad(&network, &wallet)
        .run(&foo_input(), |_| {})
        .await
        .unwrap();
    assert!(!receipt.holder_account_created);

    let sent = network.sent();
    let supply_tx = &sent[1];
    assert_eq!(supply_tx.message.instructions.len(), 1);

    let ix = &supply_tx.message.instructions[0];
    let program = supply_tx.message.account_keys[ix.program_id_index as usize];
    assert_eq!(program, spl_token_2022::ID);
}

#[tokio::test]
async fn test_simulation_failure_requests_no_signature() {
    let network = Arc::new(
        MockNetwork::new().fail_simulation_at(0, "custom program error: 0x0"),
    );
    let wallet = Arc::new(MockWallet::connected());
    let mut form = LaunchForm::with_input(foo_input());

    assert!(form.submit(&launchpad(&network, &wallet)).await.is_none());

    assert_eq!(wallet.sign_requests(), 0);
    assert!(network.sent().is_empty());
    assert_eq!(form.status(), &SubmissionStatus::Error(SIMULATION_FAILED_LABEL.to_string()));
    assert!(form.can_submit());
}

#[tokio::test]
async fn test_second_transaction_failure_leaves_first_confirmed() {
    let network = Arc::new(MockNetwork::new().fail_send_at(1, "Blockhash not found"));
    let wallet = Arc::new(MockWallet::connected());

    let mut steps = Vec::new();
    let err = launchpad(&network, &wallet)
        .run(&foo_input(), |step| steps.push(step.clone()))
        .await
        .unwrap_err();

    assert!(matches!(err, LaunchError::Send(_)));
    assert_eq!(wallet.sign_requests(), 2);
    assert_eq!(
        network
            .calls()
            .iter()
            .filter(|call| matches!(call, NetworkCall::Confirm(_)))
            .count(),
        1
    );
    assert_eq!(
        steps.last(),
        Some(&SubmissionStep::Error(EXPIRED_BLOCKHASH_LABEL.to_string()))
    );
}

#[tokio::test]
async fn test_expired_confirmation_is_classified() {
    let network = Arc::new(MockNetwork::new().fail_confirm_with(LaunchError::BlockhashExpired));
    let wallet = Arc::new(MockWallet::connected());
    let mut form = LaunchForm::with_input(foo_input());

    form.submit(&launchpad(&network, &wallet)).await;

    assert_eq!(form.status(), &SubmissionStatus::Error(EXPIRED_BLOCKHASH_LABEL.to_string()));
    // Halted after the first confirmation
    assert_eq!(network.sent().len(), 1);
}

#[tokio::test]
async fn test_unclassified_errors_pass_through() {
    let network = Arc::new(MockNetwork::new().fail_send_at(0, "User rejected the request"));
    let wallet = Arc::new(MockWallet::connected());
    let mut form = LaunchForm::with_input(foo_input());

    form.submit(&launchpad(&network, &wallet)).await;

    assert_eq!(
        form.status(),
        &SubmissionStatus::Error("Failed to send transaction: User rejected the request".to_string())
    );
}

#[tokio::test]
async fn test_rent_covers_mint_and_metadata() {
    let network = Arc::new(MockNetwork::new());
    let wallet = Arc::new(MockWallet::connected());
    let receipt = launchpad(&network, &wallet)
        .run(&foo_input(), |_| {})
        .await
        .unwrap();

    let rent_space = network
        .calls()
        .into_iter()
        .find_map(|call| match call {
            NetworkCall::RentExemption(len) => Some(len),
            _ => None,
        })
        .unwrap();

    let sizing = launchpad_sdk::instructions::mint_sizing(
        &receipt.mint,
        &launchpad_sdk::instructions::TokenDetails::from(&foo_input()),
    )
    .unwrap();
    assert_eq!(rent_space, sizing.rent_space());

    // First instruction allocates the mint through the system program
    let create_tx = &network.sent()[0];
    let ix = &create_tx.message.instructions[0];
    assert_eq!(
        create_tx.message.account_keys[ix.program_id_index as usize],
        system_program::id()
    );
    assert_ne!(receipt.mint, wallet.pubkey());
}
