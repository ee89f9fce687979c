use crate::basic::lifecycle::{LifecycleState, TransactionLifecycle};
use crate::config::DeploymentConfig;
use crate::core::constants::DESTINATION_DELAY_NOTE;
use crate::error::{Result, ValidationError};
use crate::types::OperationKind;
use crate::utils::{token_holder_url, tx_url};
use serde::Serialize;

/// How a message should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageTone {
    Secondary,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorerLink {
    pub label: String,
    pub url: String,
}

/// Banner contents for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayMessage {
    pub tone: MessageTone,
    pub text: String,
    pub note: Option<String>,
    pub links: Vec<ExplorerLink>,
}

impl DisplayMessage {
    pub fn new(tone: MessageTone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
            note: None,
            links: Vec::new(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(MessageTone::Warning, text)
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self::new(MessageTone::Danger, text)
    }
}

/// Map a lifecycle to the banner shown for it.
///
/// Idle shows nothing. A confirmed lifecycle always carries three links: the
/// source transaction, the relayer, and the destination balance page.
pub fn derive_status_message(
    lifecycle: &TransactionLifecycle,
    config: &DeploymentConfig,
) -> Result<Option<DisplayMessage>> {
    let kind = lifecycle.kind();
    let message = match lifecycle.state() {
        LifecycleState::Idle => return Ok(None),
        LifecycleState::Pending => DisplayMessage::new(
            MessageTone::Secondary,
            format!("{} in progress...", kind.progress_label()),
        ),
        LifecycleState::Failed { error } => {
            DisplayMessage::danger(format!("{} failed! {}", kind.progress_label(), error))
        },
        LifecycleState::Confirmed { receipt } => {
            let op = config.operation(kind)?;
            let source = config.chain(op.required_chain_id)?;
            let destination = config.chain(op.destination_chain_id)?;

            let mut message = DisplayMessage::new(
                MessageTone::Success,
                success_text(lifecycle, config)?,
            );
            message.note = Some(DESTINATION_DELAY_NOTE.to_string());
            message.links = vec![
                ExplorerLink {
                    label: "View Source Transaction".to_string(),
                    url: tx_url(&source.explorer_url, &receipt.tx_hash),
                },
                ExplorerLink {
                    label: "View Reactive Transaction".to_string(),
                    url: config.relayer_explorer_url.clone(),
                },
                ExplorerLink {
                    label: "View Destination Balance".to_string(),
                    url: token_holder_url(
                        &destination.explorer_url,
                        &op.destination_address,
                        lifecycle.account(),
                    ),
                },
            ];
            message
        },
    };
    Ok(Some(message))
}

fn success_text(lifecycle: &TransactionLifecycle, config: &DeploymentConfig) -> Result<String> {
    let kind = lifecycle.kind();
    let symbol = config.amount_symbol(kind)?;
    let text = match kind {
        OperationKind::Mint => {
            let chain = config.chain(config.operation(kind)?.required_chain_id)?;
            format!(
                "Minted {} {} on {} successfully!",
                lifecycle.amount(),
                symbol,
                chain.name
            )
        },
        OperationKind::Deposit => format!(
            "Deposited {} {} as collateral successfully!",
            lifecycle.amount(),
            symbol
        ),
        OperationKind::Repay => format!("Repaid {} {} successfully!", lifecycle.amount(), symbol),
        OperationKind::Bridge => "Transaction successful!".to_string(),
    };
    Ok(text)
}

/// Warning shown when a request fails validation.
pub fn validation_message(
    kind: OperationKind,
    reason: ValidationError,
    config: &DeploymentConfig,
) -> DisplayMessage {
    let text = match reason {
        ValidationError::EmptyAmount => format!("Please enter an amount to {}", kind.verb()),
        ValidationError::NoWallet => "Please connect your wallet".to_string(),
        ValidationError::WrongChain => {
            let network = config
                .operation(kind)
                .and_then(|op| config.chain(op.required_chain_id))
                .map(|chain| chain.name.clone())
                .unwrap_or_else(|_| "the required".to_string());
            format!("Please connect to {} Network", network)
        },
        ValidationError::InsufficientBalance => "Insufficient Balance".to_string(),
    };
    DisplayMessage::warning(text)
}

/// Generic banner for a call that could not be built.
pub fn preparation_failure_text(kind: OperationKind) -> String {
    format!("{} request failed", kind.label())
}
