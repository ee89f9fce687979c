//! Tracing subscriber setup for applications embedding the SDK.

use crate::config::{LogFormat, LoggingSettings};
use crate::error::{CrossLoanError, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install a global subscriber from the deployment's logging settings.
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(settings: &LoggingSettings) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let installed = match settings.format {
        LogFormat::Json => {
            let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
            if settings.structured {
                subscriber.with_target(true).with_thread_ids(true).try_init()
            } else {
                subscriber.try_init()
            }
        },
        LogFormat::Pretty => {
            let subscriber = tracing_subscriber::fmt().pretty().with_env_filter(env_filter);
            if settings.structured {
                subscriber.with_target(true).with_thread_ids(true).try_init()
            } else {
                subscriber.try_init()
            }
        },
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::fmt()
                .compact()
                .with_env_filter(env_filter);
            if settings.structured {
                subscriber.with_target(true).with_thread_ids(true).try_init()
            } else {
                subscriber.try_init()
            }
        },
    };
    installed.map_err(|e| CrossLoanError::Other(format!("failed to install tracing: {}", e)))?;

    info!(
        level = %settings.level,
        format = ?settings.format,
        structured = settings.structured,
        "logging configured"
    );
    Ok(())
}
