use crate::types::OperationKind;
use std::fmt;
use thiserror::Error;

/// Reasons a request is refused before anything is sent on-chain.
///
/// Variants are listed in the order the checks run; the first failing check
/// is the one reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    /// Amount missing, malformed, zero, negative or below the request minimum
    #[error("amount is empty or not a positive number")]
    EmptyAmount,

    /// No account connected in the wallet provider
    #[error("no wallet connected")]
    NoWallet,

    /// Wallet is connected to a different chain than the operation requires
    #[error("wallet is connected to the wrong chain")]
    WrongChain,

    /// Requested amount exceeds the on-chain balance
    #[error("insufficient balance")]
    InsufficientBalance,
}

/// Broad category of a failed send/confirm round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The wallet refused to sign
    Rejected,
    /// RPC or broadcast failure
    Transport,
    /// The transaction was mined but reverted
    Reverted,
}

/// Failure reported by a [`ChainConnection`](crate::core::connection::ChainConnection)
/// while sending or confirming a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFailure {
    pub kind: FailureKind,
    /// Raw error message from the transport or wallet
    pub message: String,
    /// Structured failure reason (revert reason, rejection code), when known
    pub reason: Option<String>,
}

impl CallFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Human readable description, preferring the structured reason.
    pub fn describe(&self) -> &str {
        match self.reason.as_deref() {
            Some(reason) if !reason.trim().is_empty() => reason,
            _ => &self.message,
        }
    }
}

impl fmt::Display for CallFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

impl std::error::Error for CallFailure {}

/// SDK-specific error types for CrossLoan operations
#[derive(Debug, Error)]
pub enum CrossLoanError {
    /// Connection or RPC error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request refused by the validation guard
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Send or confirmation failure
    #[error("Submission failed: {0}")]
    Submission(#[from] CallFailure),

    /// Amount string could not be converted to smallest units
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Operation has no entry in the deployment configuration
    #[error("Operation {0} is not configured for this deployment")]
    OperationNotConfigured(OperationKind),

    /// Chain id not present in the deployment configuration
    #[error("Unknown chain: {0}")]
    UnknownChain(u64),

    /// Token id not present in the deployment configuration
    #[error("Unknown token: {0}")]
    UnknownToken(String),

    /// A call needs the connected account and none is available
    #[error("No account connected")]
    MissingAccount,

    /// Contract returned data that does not match its ABI
    #[error("Invalid contract data: {0}")]
    InvalidContractData(String),

    /// Lifecycle asked to move to a state it cannot reach
    #[error("Illegal lifecycle transition from {from} to {to}")]
    IllegalTransition {
        from: &'static str,
        to: &'static str,
    },

    /// Configuration source could not be read or deserialized
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Configuration was read but is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Background confirmation task died
    #[error("Confirmation task failed: {0}")]
    Task(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, CrossLoanError>;
