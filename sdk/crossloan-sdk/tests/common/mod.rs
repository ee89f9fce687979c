#![allow(dead_code)]

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolValue;
use async_trait::async_trait;
use crossloan_sdk::{
    BalanceSnapshot, CallDescriptor, CallFailure, ChainConnection, DeploymentConfig,
    TransactionGuard, TxReceipt, WalletContext,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub const DEPLOYMENT: &str = include_str!("../../config/deployment.toml");

pub const POLYGON: u64 = 137;
pub const SEPOLIA: u64 = 11_155_111;
pub const AVALANCHE: u64 = 43_114;

pub fn deployment() -> DeploymentConfig {
    DeploymentConfig::from_toml_str(DEPLOYMENT).expect("sample deployment parses")
}

pub fn user() -> Address {
    Address::with_last_byte(0xab)
}

/// `units` whole tokens with 18 decimals
pub fn tokens(units: u64) -> U256 {
    U256::from(units) * U256::from(10u64).pow(U256::from(18u64))
}

pub type Outcome = Result<TxReceipt, CallFailure>;

//=============================================================================
// Wallet
//=============================================================================

#[derive(Default)]
pub struct MockWallet {
    account: Mutex<Option<Address>>,
    chain_id: Mutex<Option<u64>>,
}

impl MockWallet {
    pub fn connected(account: Address, chain_id: u64) -> Self {
        Self {
            account: Mutex::new(Some(account)),
            chain_id: Mutex::new(Some(chain_id)),
        }
    }

    pub fn switch_chain(&self, chain_id: u64) {
        *self.chain_id.lock().unwrap() = Some(chain_id);
    }
}

#[async_trait]
impl WalletContext for MockWallet {
    fn account(&self) -> Option<Address> {
        *self.account.lock().unwrap()
    }

    fn chain_id(&self) -> Option<u64> {
        *self.chain_id.lock().unwrap()
    }

    async fn connect(&self) -> Result<Address, String> {
        let account = user();
        *self.account.lock().unwrap() = Some(account);
        Ok(account)
    }

    async fn disconnect(&self) {
        *self.account.lock().unwrap() = None;
        *self.chain_id.lock().unwrap() = None;
    }
}

//=============================================================================
// Connection
//=============================================================================

/// Records sent calls and resolves them either immediately with a fresh
/// receipt or through a gate held by the test.
#[derive(Default)]
pub struct MockConnection {
    sent: Mutex<Vec<CallDescriptor>>,
    gates: Mutex<HashMap<Bytes, oneshot::Receiver<Outcome>>>,
    balances: Mutex<HashMap<(u64, Option<Address>), U256>>,
    reads: Mutex<HashMap<[u8; 4], U256>>,
    next_hash: AtomicU8,
}

impl MockConnection {
    /// Hold the call with `calldata` until the returned sender fires.
    pub fn hold(&self, call: &CallDescriptor) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(call.calldata.clone(), rx);
        tx
    }

    pub fn set_balance(&self, chain_id: u64, token: Option<Address>, raw: U256) {
        self.balances.lock().unwrap().insert((chain_id, token), raw);
    }

    pub fn set_read(&self, selector: [u8; 4], value: U256) {
        self.reads.lock().unwrap().insert(selector, value);
    }

    pub fn sent(&self) -> Vec<CallDescriptor> {
        self.sent.lock().unwrap().clone()
    }
}

pub fn receipt(byte: u8, chain_id: u64) -> TxReceipt {
    TxReceipt {
        tx_hash: B256::with_last_byte(byte),
        chain_id,
        block_number: Some(100 + byte as u64),
    }
}

#[async_trait]
impl ChainConnection for MockConnection {
    async fn send_and_confirm(&self, call: &CallDescriptor) -> Result<TxReceipt, CallFailure> {
        self.sent.lock().unwrap().push(call.clone());
        let gate = self.gates.lock().unwrap().remove(&call.calldata);
        match gate {
            Some(rx) => rx.await.expect("gate sender dropped"),
            None => {
                let byte = self.next_hash.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(receipt(byte, call.chain_id))
            },
        }
    }

    async fn get_balance(
        &self,
        chain_id: u64,
        _owner: &Address,
        token: Option<&Address>,
    ) -> Result<BalanceSnapshot, Box<dyn std::error::Error + Send + Sync>> {
        let raw = self
            .balances
            .lock()
            .unwrap()
            .get(&(chain_id, token.copied()))
            .copied()
            .ok_or("no balance scripted")?;
        Ok(BalanceSnapshot::from_raw(raw, 18, "XT"))
    }

    async fn read_contract(
        &self,
        _chain_id: u64,
        _contract: &Address,
        calldata: &Bytes,
    ) -> Result<Bytes, Box<dyn std::error::Error + Send + Sync>> {
        let selector: [u8; 4] = calldata
            .get(..4)
            .ok_or("calldata too short")?
            .try_into()?;
        let value = self
            .reads
            .lock()
            .unwrap()
            .get(&selector)
            .copied()
            .ok_or("no read scripted")?;
        Ok(Bytes::from(value.abi_encode()))
    }
}

pub struct TestContext {
    pub connection: Arc<MockConnection>,
    pub wallet: Arc<MockWallet>,
    pub guard: TransactionGuard<MockConnection, MockWallet>,
}

impl TestContext {
    pub fn new(wallet: MockWallet) -> Self {
        let connection = Arc::new(MockConnection::default());
        let wallet = Arc::new(wallet);
        let guard = TransactionGuard::new(deployment(), connection.clone(), wallet.clone());
        Self {
            connection,
            wallet,
            guard,
        }
    }
}

pub fn setup_test_context() -> TestContext {
    TestContext::new(MockWallet::connected(user(), POLYGON))
}
