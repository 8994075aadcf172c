//! Provider configuration loading via `ortho-config`.
//!
//! [`ProviderConfig`] is the ambient context handed to the client
//! provisioner on every lifecycle operation.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Default `tracing` filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Provider settings merged from defaults, configuration files and
/// environment variables.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "DRAIN",
    discovery(
        app_name = "syslog-drain",
        env_var = "DRAIN_CONFIG_PATH",
        config_file_name = "syslog-drain.toml",
        dotfile_name = ".syslog-drain.toml",
        project_file_name = "syslog-drain.toml"
    )
)]
pub struct ProviderConfig {
    /// Platform API endpoint the provisioner should target. When unset the
    /// provisioner falls back to its own default.
    pub api_host: Option<String>,
    /// `tracing` filter directive used by [`crate::logging::dispatch_for`].
    #[ortho_config(default = DEFAULT_LOG_FILTER.to_owned())]
    pub log_filter: String,
}

impl ProviderConfig {
    /// Returns the built-in defaults without consulting any source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_host: None,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }

    /// Loads configuration without parsing CLI arguments. Values merge
    /// defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("syslog-drain")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Performs semantic validation. Error messages name the environment
    /// variable and file key that supply each value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when `api_host` is set but
    /// blank, and [`ConfigError::InvalidLogFilter`] when `log_filter` is not
    /// a valid filter directive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .api_host
            .as_deref()
            .is_some_and(|host| host.trim().is_empty())
        {
            return Err(ConfigError::MissingField(String::from(
                "api host is blank: unset DRAIN_API_HOST or set api_host in syslog-drain.toml",
            )));
        }
        self.env_filter().map(|_| ())
    }

    /// Parses `log_filter` into an [`EnvFilter`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogFilter`] when parsing fails.
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.log_filter).map_err(|err| ConfigError::InvalidLogFilter {
            filter: self.log_filter.clone(),
            message: err.to_string(),
        })
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a configuration field is empty.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Indicates `log_filter` is not a valid directive.
    #[error("invalid log filter '{filter}': {message}")]
    InvalidLogFilter {
        /// Directive as configured.
        filter: String,
        /// Parser message.
        message: String,
    },
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
