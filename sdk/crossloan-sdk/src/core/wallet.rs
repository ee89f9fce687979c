use alloy_primitives::Address;
use async_trait::async_trait;

/// View of the user's wallet provider.
/// Key management and network switching stay inside the provider; the SDK
/// only reads the connected account and chain.
#[async_trait]
pub trait WalletContext: Send + Sync {
    /// Connected account, `None` while disconnected.
    fn account(&self) -> Option<Address>;

    /// Chain the wallet is currently on, `None` while disconnected.
    fn chain_id(&self) -> Option<u64>;

    /// Ask the provider to connect. Returns Err if the user declines.
    async fn connect(&self) -> Result<Address, String>;

    async fn disconnect(&self);
}
