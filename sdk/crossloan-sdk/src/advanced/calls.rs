use crate::advanced::abi::{IBridgeToken, ICollateralManager, ICrossLoan};
use crate::config::DeploymentConfig;
use crate::error::{CrossLoanError, Result};
use crate::types::{CallDescriptor, OperationKind, OperationRequest};
use crate::utils::parse_units;
use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;

/// Encode `call` against `contract` on `chain_id`.
pub fn encode_call<C: SolCall>(
    operation: OperationKind,
    chain_id: u64,
    contract: Address,
    call: &C,
    value: U256,
) -> CallDescriptor {
    CallDescriptor {
        operation,
        chain_id,
        to: contract,
        signature: C::SIGNATURE.to_string(),
        calldata: call.abi_encode().into(),
        value,
    }
}

pub fn bridge_request(chain_id: u64, token: Address, amount: U256) -> CallDescriptor {
    let call = IBridgeToken::bridgeRequestCall { _amount: amount };
    encode_call(OperationKind::Bridge, chain_id, token, &call, U256::ZERO)
}

pub fn mint(chain_id: u64, token: Address, receiver: Address, amount: U256) -> CallDescriptor {
    let call = IBridgeToken::mintCall {
        _receiver: receiver,
        _amount: amount,
    };
    encode_call(OperationKind::Mint, chain_id, token, &call, U256::ZERO)
}

/// Collateral is native currency sent along with the call.
pub fn deposit_collateral(chain_id: u64, manager: Address, amount: U256) -> CallDescriptor {
    let call = ICollateralManager::depositCollateralCall {};
    encode_call(OperationKind::Deposit, chain_id, manager, &call, amount)
}

pub fn repay_loan(chain_id: u64, lender: Address, amount: U256) -> CallDescriptor {
    let call = ICrossLoan::repayLoanCall { _amount: amount };
    encode_call(OperationKind::Repay, chain_id, lender, &call, U256::ZERO)
}

/// Build the contract call for a request.
///
/// The amount is converted with the decimals of the token the operation is
/// denominated in. Mint credits `account` and fails without one.
pub fn prepare_call(
    config: &DeploymentConfig,
    request: &OperationRequest,
    account: Option<Address>,
) -> Result<CallDescriptor> {
    let op = config.operation(request.kind)?;
    let decimals = config.amount_decimals(request.kind)?;
    let amount = parse_units(&request.amount, decimals)?;
    let chain_id = request.required_chain_id;

    let call = match request.kind {
        OperationKind::Deposit => deposit_collateral(chain_id, op.contract, amount),
        OperationKind::Repay => repay_loan(chain_id, op.contract, amount),
        OperationKind::Bridge => bridge_request(chain_id, op.contract, amount),
        OperationKind::Mint => {
            let receiver = account.ok_or(CrossLoanError::MissingAccount)?;
            mint(chain_id, op.contract, receiver, amount)
        },
    };

    Ok(call)
}
