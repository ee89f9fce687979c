use anyhow::Result;
use crossloan_sdk::config::{load_config, LogFormat};
use crossloan_sdk::{CrossLoanError, DeploymentConfig, OperationKind};
use std::io::Write;

mod common;
use common::{AVALANCHE, DEPLOYMENT, POLYGON, SEPOLIA};

#[test]
fn test_sample_deployment_parses() -> Result<()> {
    let config = DeploymentConfig::from_toml_str(DEPLOYMENT)?;

    assert_eq!(config.chains.len(), 3);
    assert_eq!(config.mint_amount, "50");
    assert_eq!(config.logging.format, LogFormat::Compact);

    let bridge = config.operation(OperationKind::Bridge)?;
    assert_eq!(bridge.required_chain_id, POLYGON);
    assert_eq!(bridge.destination_chain_id, SEPOLIA);
    assert!(bridge.check_balance);

    assert_eq!(config.operation(OperationKind::Deposit)?.required_chain_id, AVALANCHE);
    assert!(!config.operation(OperationKind::Repay)?.check_balance);

    assert_eq!(config.amount_symbol(OperationKind::Bridge)?, "XT");
    assert_eq!(config.amount_symbol(OperationKind::Deposit)?, "AVAX");
    assert_eq!(config.amount_decimals(OperationKind::Deposit)?, 18);
    Ok(())
}

#[test]
fn test_load_config_from_file() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    file.write_all(DEPLOYMENT.as_bytes())?;
    let path = file.path().to_str().expect("utf-8 temp path");

    let config = load_config(path)?;
    assert!(config.operation(OperationKind::Mint).is_ok());
    Ok(())
}

#[test]
fn test_environment_overrides_file_values() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    file.write_all(DEPLOYMENT.as_bytes())?;
    let path = file.path().to_str().expect("utf-8 temp path");

    std::env::set_var("CROSSLOAN__MINT_AMOUNT", "25");
    std::env::set_var("CROSSLOAN__LOGGING__LEVEL", "debug");
    let loaded = load_config(path);
    std::env::remove_var("CROSSLOAN__MINT_AMOUNT");
    std::env::remove_var("CROSSLOAN__LOGGING__LEVEL");

    let config = loaded?;
    assert_eq!(config.mint_amount, "25");
    assert_eq!(config.logging.level, "debug");
    // untouched values still come from the file
    assert_eq!(config.logging.format, LogFormat::Compact);
    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let result = load_config("/definitely/not/here/deployment.toml");
    assert!(matches!(result, Err(CrossLoanError::Config(_))));
}

#[test]
fn test_undeclared_chain_is_rejected() {
    let source = DEPLOYMENT.replace("destination_chain_id = 43114", "destination_chain_id = 10");
    let err = DeploymentConfig::from_toml_str(&source).unwrap_err();
    assert!(matches!(err, CrossLoanError::InvalidConfig(_)), "{err}");
}

#[test]
fn test_token_on_wrong_chain_is_rejected() {
    let source = DEPLOYMENT.replacen("chain_id = 137", "chain_id = 11155111", 1);
    let err = DeploymentConfig::from_toml_str(&source).unwrap_err();
    assert!(matches!(err, CrossLoanError::InvalidConfig(_)), "{err}");
}

#[test]
fn test_bad_mint_amount_is_rejected() {
    let source = DEPLOYMENT.replace("mint_amount = \"50\"", "mint_amount = \"fifty\"");
    let err = DeploymentConfig::from_toml_str(&source).unwrap_err();
    assert!(matches!(err, CrossLoanError::InvalidConfig(_)), "{err}");
}

#[test]
fn test_missing_operation_is_reported() -> Result<()> {
    let end = DEPLOYMENT
        .find("[operations.repay]")
        .expect("sample declares repay");
    let config = DeploymentConfig::from_toml_str(&DEPLOYMENT[..end])?;

    assert!(matches!(
        config.operation(OperationKind::Repay),
        Err(CrossLoanError::OperationNotConfigured(OperationKind::Repay))
    ));
    Ok(())
}
