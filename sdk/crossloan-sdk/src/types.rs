use crate::utils::format_units;
use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User-initiated action tracked by the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Lock collateral on the source chain
    Deposit,
    /// Pay back a loan on the lending chain
    Repay,
    /// Send tokens to the other chain through the relayer
    Bridge,
    /// Mint test tokens to the connected account
    Mint,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Deposit,
        OperationKind::Repay,
        OperationKind::Bridge,
        OperationKind::Mint,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::Deposit => "Deposit",
            OperationKind::Repay => "Repay",
            OperationKind::Bridge => "Bridge",
            OperationKind::Mint => "Mint",
        }
    }

    /// Verb used in "Please enter an amount to ..." prompts
    pub fn verb(&self) -> &'static str {
        match self {
            OperationKind::Deposit => "deposit",
            OperationKind::Repay => "repay",
            OperationKind::Bridge => "bridge",
            OperationKind::Mint => "mint",
        }
    }

    /// Subject of the "... in progress..." banner
    pub fn progress_label(&self) -> &'static str {
        match self {
            OperationKind::Deposit => "Collateral deposit",
            OperationKind::Repay => "Loan repayment",
            OperationKind::Bridge => "Bridge Transaction",
            OperationKind::Mint => "Minting",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single user submission. Built fresh for every click and never mutated
/// once validation starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    pub kind: OperationKind,
    /// Decimal amount as typed by the user, not yet unit-converted
    pub amount: String,
    /// Chain the wallet must be connected to
    pub required_chain_id: u64,
    /// Optional lower bound on `amount`, same notation
    pub min_amount: Option<String>,
}

impl OperationRequest {
    pub fn new(kind: OperationKind, amount: impl Into<String>, required_chain_id: u64) -> Self {
        Self {
            kind,
            amount: amount.into(),
            required_chain_id,
            min_amount: None,
        }
    }

    pub fn with_min_amount(mut self, min_amount: impl Into<String>) -> Self {
        self.min_amount = Some(min_amount.into());
        self
    }
}

/// Token or native balance as reported by the chain. Owned by the caller;
/// the guard only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// Human readable value, e.g. "12.5"
    pub display_value: String,
    /// Value in smallest units
    pub raw_value: U256,
    pub symbol: String,
    pub decimals: u8,
}

impl BalanceSnapshot {
    /// Build a snapshot from a raw value, deriving the display string.
    pub fn from_raw(raw_value: U256, decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            display_value: format_units(raw_value, decimals),
            raw_value,
            symbol: symbol.into(),
            decimals,
        }
    }
}

/// A fully encoded contract call, ready to hand to the wallet for signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallDescriptor {
    pub operation: OperationKind,
    pub chain_id: u64,
    /// Target contract
    pub to: Address,
    /// Solidity signature, e.g. `bridgeRequest(uint256)`
    pub signature: String,
    /// ABI encoded selector and arguments
    pub calldata: Bytes,
    /// Native value attached to the call
    pub value: U256,
}

/// Receipt of a confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: B256,
    pub chain_id: u64,
    pub block_number: Option<u64>,
}

/// Collateral and outstanding loan of an account, in smallest units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoanPosition {
    pub collateral: U256,
    pub loan: U256,
}

impl LoanPosition {
    pub fn has_open_loan(&self) -> bool {
        !self.loan.is_zero()
    }
}
