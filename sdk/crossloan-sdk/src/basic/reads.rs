use crate::advanced::abi::{ICollateralManager, ICrossLoan};
use crate::config::DeploymentConfig;
use crate::core::connection::ChainConnection;
use crate::error::{CrossLoanError, Result};
use crate::types::{BalanceSnapshot, LoanPosition, OperationKind};
use crate::utils::{is_decimal, parse_units};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;

//=============================================================================
// Balances
//=============================================================================

/// Fetch the balance an operation's amount is drawn from: the configured
/// token on the operation's chain, or the native currency.
pub async fn fetch_operation_balance(
    connection: &impl ChainConnection,
    config: &DeploymentConfig,
    kind: OperationKind,
    owner: &Address,
) -> Result<BalanceSnapshot> {
    let op = config.operation(kind)?;
    let token = config.operation_token(kind)?.map(|t| t.address);

    connection
        .get_balance(op.required_chain_id, owner, token.as_ref())
        .await
        .map_err(|e| CrossLoanError::Connection(e.to_string()))
}

/// Display value of a balance, "0" while it is unavailable.
pub fn balance_display(balance: Option<&BalanceSnapshot>) -> String {
    balance
        .map(|b| b.display_value.clone())
        .unwrap_or_else(|| "0".to_string())
}

/// Amount that fills the input when the user picks "Max".
pub fn max_amount(balance: &BalanceSnapshot) -> String {
    balance.display_value.clone()
}

/// Whether to offer minting test tokens: the typed amount exceeds the balance.
/// An empty input counts as zero; an unknown balance never triggers the offer.
pub fn should_offer_mint(amount: &str, balance: Option<&BalanceSnapshot>) -> bool {
    let Some(balance) = balance else {
        return false;
    };
    let amount = if amount.trim().is_empty() { "0" } else { amount };
    match parse_units(amount, balance.decimals) {
        Ok(requested) => requested > balance.raw_value,
        // a well-formed amount only fails to convert when it overflows
        Err(_) => is_decimal(amount),
    }
}

//=============================================================================
// Contract Reads
//=============================================================================

/// Read collateral held by the collateral manager and the loan owed to the
/// lender for `account`.
pub async fn read_loan_position(
    connection: &impl ChainConnection,
    config: &DeploymentConfig,
    account: &Address,
) -> Result<LoanPosition> {
    let manager = config.operation(OperationKind::Deposit)?;
    let lender = config.operation(OperationKind::Repay)?;

    let collateral_call = ICollateralManager::collateralOfCall { _user: *account };
    let raw = read(
        connection,
        manager.required_chain_id,
        &manager.contract,
        collateral_call.abi_encode(),
    )
    .await?;
    let collateral = ICollateralManager::collateralOfCall::abi_decode_returns(&raw, true)
        .map_err(|e| CrossLoanError::InvalidContractData(format!("collateralOf: {}", e)))?
        ._0;

    let loan_call = ICrossLoan::loanOfCall { _user: *account };
    let raw = read(
        connection,
        lender.required_chain_id,
        &lender.contract,
        loan_call.abi_encode(),
    )
    .await?;
    let loan: U256 = ICrossLoan::loanOfCall::abi_decode_returns(&raw, true)
        .map_err(|e| CrossLoanError::InvalidContractData(format!("loanOf: {}", e)))?
        ._0;

    Ok(LoanPosition { collateral, loan })
}

async fn read(
    connection: &impl ChainConnection,
    chain_id: u64,
    contract: &Address,
    calldata: Vec<u8>,
) -> Result<Bytes> {
    connection
        .read_contract(chain_id, contract, &Bytes::from(calldata))
        .await
        .map_err(|e| CrossLoanError::Connection(e.to_string()))
}
