//! Structured logging setup.
//!
//! Reconcilers log to the subscriber active when an operation runs, or to a
//! [`Dispatch`] injected with `with_dispatch`. Hosts that want
//! human-readable output build one here.

use tracing::Dispatch;

use crate::config::{ConfigError, ProviderConfig};

/// Builds a formatting dispatcher filtered by the configured `log_filter`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidLogFilter`] when the filter does not parse.
pub fn dispatch_for(config: &ProviderConfig) -> Result<Dispatch, ConfigError> {
    let filter = config.env_filter()?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    Ok(Dispatch::new(subscriber))
}

