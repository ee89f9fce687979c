pub const POLYGON_CHAIN_ID: u64 = 137;
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;
pub const AVALANCHE_CHAIN_ID: u64 = 43_114;

/// Decimals of native currencies on the supported EVM chains
pub const DEFAULT_DECIMALS: u8 = 18;

/// Test tokens minted per mint request
pub const DEFAULT_MINT_AMOUNT: &str = "50";

// Reactive VM that relays bridge requests between the two chains
pub const REACTIVE_EXPLORER_URL: &str =
    "https://kopli.reactscan.net/rvms/0xc7203561EF179333005a9b81215092413aB86aE9";

pub const DESTINATION_DELAY_NOTE: &str =
    "Note: It may take a few minutes for the balances to reflect on the destination chain.";
