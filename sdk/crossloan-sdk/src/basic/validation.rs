use crate::error::ValidationError;
use crate::types::{BalanceSnapshot, OperationRequest};
use crate::utils::{compare_decimals, is_positive_decimal, parse_units};
use alloy_primitives::Address;
use std::cmp::Ordering;

/// Result of checking a request against the current wallet state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(ValidationError),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            ValidationOutcome::Valid => Ok(()),
            ValidationOutcome::Invalid(reason) => Err(reason),
        }
    }
}

/// Check a request before anything is built or sent.
///
/// Rules run in a fixed order and the first failure is returned:
/// amount, wallet, chain, then balance. The balance rule only runs when
/// `balance` is supplied.
pub fn validate(
    request: &OperationRequest,
    account: Option<&Address>,
    chain_id: Option<u64>,
    balance: Option<&BalanceSnapshot>,
) -> ValidationOutcome {
    if !has_positive_amount(request) {
        return ValidationOutcome::Invalid(ValidationError::EmptyAmount);
    }

    if account.is_none() {
        return ValidationOutcome::Invalid(ValidationError::NoWallet);
    }

    if chain_id != Some(request.required_chain_id) {
        return ValidationOutcome::Invalid(ValidationError::WrongChain);
    }

    if let Some(balance) = balance {
        // amount in the balance's own units; excess precision truncates.
        // The amount is a positive decimal here, so a failed conversion
        // means it exceeds what any balance can hold.
        let exceeds = match parse_units(&request.amount, balance.decimals) {
            Ok(requested) => requested > balance.raw_value,
            Err(_) => true,
        };
        if exceeds {
            return ValidationOutcome::Invalid(ValidationError::InsufficientBalance);
        }
    }

    ValidationOutcome::Valid
}

/// Amount is a decimal with a non-zero digit and not below `min_amount`.
/// A `min_amount` that is not a decimal is ignored.
fn has_positive_amount(request: &OperationRequest) -> bool {
    if !is_positive_decimal(&request.amount) {
        return false;
    }

    match request.min_amount.as_deref() {
        Some(min) => compare_decimals(&request.amount, min) != Some(Ordering::Less),
        None => true,
    }
}
