use crate::error::CallFailure;
use crate::types::{BalanceSnapshot, CallDescriptor, TxReceipt};
use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use std::error::Error;

/// Transport to the chains a deployment spans.
///
/// Implementations wrap whatever RPC client and wallet bridge the host
/// application uses. The SDK never signs; `send_and_confirm` is expected to
/// route the call through the connected wallet.
#[async_trait]
pub trait ChainConnection: Send + Sync {
    /// Broadcast a prepared call and wait until it is confirmed or fails.
    async fn send_and_confirm(&self, call: &CallDescriptor) -> Result<TxReceipt, CallFailure>;

    /// Balance of `owner` on `chain_id`; native currency when `token` is `None`.
    async fn get_balance(
        &self,
        chain_id: u64,
        owner: &Address,
        token: Option<&Address>,
    ) -> Result<BalanceSnapshot, Box<dyn Error + Send + Sync>>;

    /// Execute a read-only call and return the raw ABI encoded result.
    async fn read_contract(
        &self,
        chain_id: u64,
        contract: &Address,
        calldata: &Bytes,
    ) -> Result<Bytes, Box<dyn Error + Send + Sync>>;
}
