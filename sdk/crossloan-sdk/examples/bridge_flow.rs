// Example: validating and submitting a bridge request
//
// This example demonstrates how to:
// 1. Load a deployment and configure logging from it
// 2. Plug a wallet and a chain connection into the guard
// 3. Validate a request and show the warning the user would see
// 4. Submit, then render the pending and final banners

use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use crossloan_sdk::config::load_config;
use crossloan_sdk::telemetry::init_tracing;
use crossloan_sdk::{
    BalanceSnapshot, CallDescriptor, CallFailure, ChainConnection, OperationKind,
    TransactionGuard, TxReceipt, WalletContext,
};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

// Stand-in for a real RPC client: every call confirms after a short delay.
struct SimulatedChain;

#[async_trait]
impl ChainConnection for SimulatedChain {
    async fn send_and_confirm(&self, call: &CallDescriptor) -> Result<TxReceipt, CallFailure> {
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok(TxReceipt {
            tx_hash: B256::repeat_byte(0x42),
            chain_id: call.chain_id,
            block_number: Some(1),
        })
    }

    async fn get_balance(
        &self,
        _chain_id: u64,
        _owner: &Address,
        _token: Option<&Address>,
    ) -> Result<BalanceSnapshot, Box<dyn Error + Send + Sync>> {
        Ok(BalanceSnapshot::from_raw(
            U256::from(20u64) * U256::from(10u64).pow(U256::from(18u64)),
            18,
            "XT",
        ))
    }

    async fn read_contract(
        &self,
        _chain_id: u64,
        _contract: &Address,
        _calldata: &Bytes,
    ) -> Result<Bytes, Box<dyn Error + Send + Sync>> {
        Err("reads are not simulated".into())
    }
}

struct FixedWallet {
    account: Address,
    chain_id: u64,
}

#[async_trait]
impl WalletContext for FixedWallet {
    fn account(&self) -> Option<Address> {
        Some(self.account)
    }

    fn chain_id(&self) -> Option<u64> {
        Some(self.chain_id)
    }

    async fn connect(&self) -> Result<Address, String> {
        Ok(self.account)
    }

    async fn disconnect(&self) {}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = load_config(concat!(env!("CARGO_MANIFEST_DIR"), "/config/deployment.toml"))?;
    init_tracing(&config.logging)?;

    let wallet = FixedWallet {
        account: Address::repeat_byte(0xab),
        chain_id: 137,
    };
    let guard = TransactionGuard::new(config, Arc::new(SimulatedChain), Arc::new(wallet));

    // 50 XT against a 20 XT balance
    let too_much = guard.request(OperationKind::Bridge, "50")?;
    let outcome = guard.check(&too_much).await?;
    if let Some(warning) = guard.warning(&too_much, outcome) {
        println!("[{:?}] {}", warning.tone, warning.text);
    }

    let request = guard.request(OperationKind::Bridge, "10")?;
    let submission = guard.execute(request).await?;
    if let Some(status) = guard.status(OperationKind::Bridge)? {
        println!("[{:?}] {}", status.tone, status.text);
    }

    submission.wait().await?;
    if let Some(status) = guard.status(OperationKind::Bridge)? {
        println!("[{:?}] {}", status.tone, status.text);
        if let Some(note) = &status.note {
            println!("  {}", note);
        }
        for link in &status.links {
            println!("  {}: {}", link.label, link.url);
        }
    }

    Ok(())
}
