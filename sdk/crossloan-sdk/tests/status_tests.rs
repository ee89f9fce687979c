use alloy_primitives::{Address, B256, U256};
use crossloan_sdk::basic::reads::{balance_display, max_amount, should_offer_mint};
use crossloan_sdk::{
    derive_status_message, validation_message, BalanceSnapshot, LifecycleId, LifecycleTracker,
    MessageTone, OperationKind, TransactionLifecycle, TxReceipt, ValidationError,
};

mod common;
use common::{deployment, tokens, user, POLYGON};

fn hash_0x123() -> B256 {
    let mut bytes = [0u8; 32];
    bytes[30] = 0x01;
    bytes[31] = 0x23;
    B256::from(bytes)
}

#[test]
fn test_idle_has_no_message() {
    let config = deployment();
    let lifecycle =
        TransactionLifecycle::new(LifecycleId::from(1), OperationKind::Bridge, None, "1");
    assert!(derive_status_message(&lifecycle, &config).unwrap().is_none());
}

#[test]
fn test_pending_message() {
    let config = deployment();
    let tracker = LifecycleTracker::new();

    let bridge = tracker.start(OperationKind::Bridge, None, "1").unwrap();
    let message = derive_status_message(&bridge, &config).unwrap().unwrap();
    assert_eq!(message.tone, MessageTone::Secondary);
    assert_eq!(message.text, "Bridge Transaction in progress...");
    assert!(message.links.is_empty());

    let mint = tracker.start(OperationKind::Mint, None, "50").unwrap();
    let message = derive_status_message(&mint, &config).unwrap().unwrap();
    assert_eq!(message.text, "Minting in progress...");
}

#[test]
fn test_confirmed_message_links_source_relayer_and_destination() {
    let config = deployment();
    let tracker = LifecycleTracker::new();
    let account = user();

    let mut lifecycle = tracker
        .start(OperationKind::Bridge, Some(account), "10")
        .unwrap();
    lifecycle
        .confirm(TxReceipt {
            tx_hash: hash_0x123(),
            chain_id: POLYGON,
            block_number: None,
        })
        .unwrap();

    let message = derive_status_message(&lifecycle, &config).unwrap().unwrap();
    assert_eq!(message.tone, MessageTone::Success);
    assert_eq!(message.text, "Transaction successful!");
    assert!(message.note.is_some());
    assert_eq!(message.links.len(), 3);

    let source = &message.links[0];
    assert_eq!(source.label, "View Source Transaction");
    assert!(source.url.starts_with("https://polygonscan.com/tx/0x"));
    assert!(source.url.ends_with("0123"));

    assert_eq!(message.links[1].url, config.relayer_explorer_url);

    let destination = &message.links[2];
    assert!(destination
        .url
        .starts_with("https://sepolia.etherscan.io/token/0x1000000000000000000000000000000000000002"));
    assert!(destination
        .url
        .ends_with(&format!("?a=0x{}", hex::encode(account))));
}

#[test]
fn test_confirmed_mint_names_amount_and_chain() {
    let config = deployment();
    let tracker = LifecycleTracker::new();
    let mut lifecycle = tracker
        .start(OperationKind::Mint, Some(user()), "50")
        .unwrap();
    lifecycle
        .confirm(TxReceipt {
            tx_hash: B256::with_last_byte(9),
            chain_id: POLYGON,
            block_number: Some(1),
        })
        .unwrap();

    let message = derive_status_message(&lifecycle, &config).unwrap().unwrap();
    assert_eq!(message.text, "Minted 50 XT on Polygon successfully!");
    assert_eq!(message.links.len(), 3);
}

#[test]
fn test_failed_message_carries_reason() {
    let config = deployment();
    let tracker = LifecycleTracker::new();
    let mut lifecycle = tracker.start(OperationKind::Repay, None, "1").unwrap();
    lifecycle.fail("insufficient allowance").unwrap();

    let message = derive_status_message(&lifecycle, &config).unwrap().unwrap();
    assert_eq!(message.tone, MessageTone::Danger);
    assert_eq!(
        message.text,
        "Loan repayment failed! insufficient allowance"
    );
    assert!(message.links.is_empty());
}

#[test]
fn test_validation_warnings() {
    let config = deployment();
    let cases = [
        (ValidationError::EmptyAmount, "Please enter an amount to bridge"),
        (ValidationError::NoWallet, "Please connect your wallet"),
        (ValidationError::WrongChain, "Please connect to Polygon Network"),
        (ValidationError::InsufficientBalance, "Insufficient Balance"),
    ];
    for (reason, text) in cases {
        let message = validation_message(OperationKind::Bridge, reason, &config);
        assert_eq!(message.tone, MessageTone::Warning);
        assert_eq!(message.text, text);
    }

    let message = validation_message(OperationKind::Deposit, ValidationError::WrongChain, &config);
    assert_eq!(message.text, "Please connect to Avalanche Network");
}

#[test]
fn test_balance_helpers() {
    let balance = BalanceSnapshot::from_raw(tokens(12) + tokens(1) / U256::from(2u64), 18, "XT");
    assert_eq!(balance.display_value, "12.5");
    assert_eq!(max_amount(&balance), "12.5");
    assert_eq!(balance_display(Some(&balance)), "12.5");
    assert_eq!(balance_display(None), "0");

    assert!(should_offer_mint("13", Some(&balance)));
    assert!(!should_offer_mint("12.5", Some(&balance)));
    assert!(!should_offer_mint("", Some(&balance)));
    assert!(!should_offer_mint("13", None));
    assert!(!should_offer_mint("not a number", Some(&balance)));
}

#[test]
fn test_unconfigured_destination_is_an_error() {
    let mut config = deployment();
    config.chains.retain(|c| c.id == POLYGON);
    let tracker = LifecycleTracker::new();
    let mut lifecycle = tracker
        .start(OperationKind::Bridge, Some(Address::ZERO), "1")
        .unwrap();
    lifecycle
        .confirm(TxReceipt {
            tx_hash: B256::ZERO,
            chain_id: POLYGON,
            block_number: None,
        })
        .unwrap();
    assert!(derive_status_message(&lifecycle, &config).is_err());
}
