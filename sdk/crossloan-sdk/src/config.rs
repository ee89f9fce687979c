//! Declarative per-deployment configuration.
//!
//! One deployment describes the chains involved, the tokens and contracts on
//! them, and for every operation which chain the wallet must be on and where
//! the result shows up. A single [`TransactionGuard`](crate::TransactionGuard)
//! is configured from it instead of hard-coding chain ids per screen.

use crate::core::constants::{DEFAULT_DECIMALS, DEFAULT_MINT_AMOUNT, REACTIVE_EXPLORER_URL};
use crate::error::{CrossLoanError, Result};
use crate::types::OperationKind;
use crate::utils::{parse_units, MAX_DECIMALS};
use alloy_primitives::Address;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Prefix of environment variables overriding file values,
/// e.g. `CROSSLOAN__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "CROSSLOAN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub chains: Vec<ChainConfig>,
    /// Tokens keyed by a short identifier referenced from operations
    #[serde(default)]
    pub tokens: HashMap<String, TokenConfig>,
    pub operations: OperationsConfig,
    /// Fixed explorer page of the relayer that settles bridge requests
    #[serde(default = "default_relayer_explorer_url")]
    pub relayer_explorer_url: String,
    /// Amount minted per mint request, in whole tokens
    #[serde(default = "default_mint_amount")]
    pub mint_amount: String,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub id: u64,
    pub name: String,
    pub explorer_url: String,
    pub native_symbol: String,
    #[serde(default = "default_decimals")]
    pub native_decimals: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    pub symbol: String,
    pub decimals: u8,
    pub chain_id: u64,
    pub address: Address,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperationsConfig {
    pub deposit: Option<OperationConfig>,
    pub repay: Option<OperationConfig>,
    pub bridge: Option<OperationConfig>,
    pub mint: Option<OperationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationConfig {
    /// Chain the wallet must be connected to before submitting
    pub required_chain_id: u64,
    /// Contract receiving the call
    pub contract: Address,
    /// Token the amount is denominated in; native currency when absent
    #[serde(default)]
    pub token: Option<String>,
    /// Compare the amount against the on-chain balance before submitting
    #[serde(default)]
    pub check_balance: bool,
    /// Chain whose explorer shows the settled result
    pub destination_chain_id: u64,
    /// Token (or contract) whose holder page shows the settled result
    pub destination_address: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub structured: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            structured: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    #[default]
    Compact,
    Json,
}

fn default_relayer_explorer_url() -> String {
    REACTIVE_EXPLORER_URL.to_string()
}

fn default_mint_amount() -> String {
    DEFAULT_MINT_AMOUNT.to_string()
}

fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load a deployment from a file (format inferred from the extension),
/// layered with `CROSSLOAN__*` environment overrides.
pub fn load_config(path: &str) -> Result<DeploymentConfig> {
    let settings = Config::builder()
        .add_source(File::with_name(path).required(true))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let deployment: DeploymentConfig = settings.try_deserialize()?;
    deployment.validate()?;
    debug!(path, chains = deployment.chains.len(), "deployment configuration loaded");
    Ok(deployment)
}

impl DeploymentConfig {
    /// Parse a TOML document without environment overrides.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let deployment: DeploymentConfig = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        deployment.validate()?;
        Ok(deployment)
    }

    /// Check that every id referenced by an operation resolves.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for chain in &self.chains {
            if !seen.insert(chain.id) {
                return Err(CrossLoanError::InvalidConfig(format!(
                    "chain {} is declared twice",
                    chain.id
                )));
            }
            if chain.native_decimals > MAX_DECIMALS {
                return Err(CrossLoanError::InvalidConfig(format!(
                    "chain {} declares {} native decimals",
                    chain.id, chain.native_decimals
                )));
            }
        }

        for (id, token) in &self.tokens {
            self.chain(token.chain_id).map_err(|_| {
                CrossLoanError::InvalidConfig(format!(
                    "token `{}` lives on undeclared chain {}",
                    id, token.chain_id
                ))
            })?;
            if token.decimals > MAX_DECIMALS {
                return Err(CrossLoanError::InvalidConfig(format!(
                    "token `{}` declares {} decimals",
                    id, token.decimals
                )));
            }
        }

        for kind in OperationKind::ALL {
            let Some(op) = self.operations.get(kind) else {
                continue;
            };
            for chain_id in [op.required_chain_id, op.destination_chain_id] {
                if self.chain(chain_id).is_err() {
                    return Err(CrossLoanError::InvalidConfig(format!(
                        "{} references undeclared chain {}",
                        kind, chain_id
                    )));
                }
            }
            if let Some(token_id) = &op.token {
                let token = self.token(token_id).map_err(|_| {
                    CrossLoanError::InvalidConfig(format!(
                        "{} references undeclared token `{}`",
                        kind, token_id
                    ))
                })?;
                if token.chain_id != op.required_chain_id {
                    return Err(CrossLoanError::InvalidConfig(format!(
                        "{} is denominated in `{}` from chain {} but requires chain {}",
                        kind, token_id, token.chain_id, op.required_chain_id
                    )));
                }
            }
        }

        if self.relayer_explorer_url.trim().is_empty() {
            return Err(CrossLoanError::InvalidConfig(
                "relayer_explorer_url must not be empty".to_string(),
            ));
        }

        let mint_decimals = match self.operations.mint.as_ref() {
            Some(_) => self.amount_decimals(OperationKind::Mint)?,
            None => DEFAULT_DECIMALS,
        };
        parse_units(&self.mint_amount, mint_decimals).map_err(|e| {
            CrossLoanError::InvalidConfig(format!("mint_amount `{}`: {}", self.mint_amount, e))
        })?;

        Ok(())
    }

    pub fn chain(&self, chain_id: u64) -> Result<&ChainConfig> {
        self.chains
            .iter()
            .find(|c| c.id == chain_id)
            .ok_or(CrossLoanError::UnknownChain(chain_id))
    }

    pub fn token(&self, token_id: &str) -> Result<&TokenConfig> {
        self.tokens
            .get(token_id)
            .ok_or_else(|| CrossLoanError::UnknownToken(token_id.to_string()))
    }

    pub fn operation(&self, kind: OperationKind) -> Result<&OperationConfig> {
        self.operations
            .get(kind)
            .ok_or(CrossLoanError::OperationNotConfigured(kind))
    }

    /// Token the operation's amount is denominated in, `None` for native currency.
    pub fn operation_token(&self, kind: OperationKind) -> Result<Option<&TokenConfig>> {
        match &self.operation(kind)?.token {
            Some(token_id) => self.token(token_id).map(Some),
            None => Ok(None),
        }
    }

    /// Decimals used to convert the operation's amount to smallest units.
    pub fn amount_decimals(&self, kind: OperationKind) -> Result<u8> {
        match self.operation_token(kind)? {
            Some(token) => Ok(token.decimals),
            None => {
                let op = self.operation(kind)?;
                Ok(self.chain(op.required_chain_id)?.native_decimals)
            },
        }
    }

    /// Symbol shown next to the operation's amount.
    pub fn amount_symbol(&self, kind: OperationKind) -> Result<&str> {
        match self.operation_token(kind)? {
            Some(token) => Ok(token.symbol.as_str()),
            None => {
                let op = self.operation(kind)?;
                Ok(self.chain(op.required_chain_id)?.native_symbol.as_str())
            },
        }
    }
}

impl OperationsConfig {
    pub fn get(&self, kind: OperationKind) -> Option<&OperationConfig> {
        match kind {
            OperationKind::Deposit => self.deposit.as_ref(),
            OperationKind::Repay => self.repay.as_ref(),
            OperationKind::Bridge => self.bridge.as_ref(),
            OperationKind::Mint => self.mint.as_ref(),
        }
    }
}
