pub mod advanced;
pub mod basic;
pub mod config;
pub mod core;
pub mod error;
pub mod telemetry;
pub mod types;
pub mod utils;

pub use crate::basic::guard::{Submission, TransactionGuard};
pub use crate::basic::lifecycle::{
    LifecycleId, LifecycleState, LifecycleTracker, TransactionLifecycle,
};
pub use crate::basic::status::{
    derive_status_message, validation_message, DisplayMessage, ExplorerLink, MessageTone,
};
pub use crate::basic::validation::{validate, ValidationOutcome};
pub use crate::config::DeploymentConfig;
pub use crate::core::connection::ChainConnection;
pub use crate::core::wallet::WalletContext;
pub use crate::error::{CallFailure, CrossLoanError, FailureKind, Result, ValidationError};
pub use crate::types::{
    BalanceSnapshot, CallDescriptor, LoanPosition, OperationKind, OperationRequest, TxReceipt,
};
pub use crate::utils::{format_units, parse_units};
