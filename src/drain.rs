//! Declared configuration of a syslog drain.
//!
//! [`SyslogDrain`] is the record the surrounding framework hands to every
//! lifecycle operation. The `url` field is computed: it is only ever written
//! by the reconciler, never read as input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User-authored description of a syslog drain plus its computed `url`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SyslogDrain {
    /// Resource identifier; immutable after creation.
    pub name: String,
    /// Identifier of the owning cluster; immutable after creation.
    pub cluster: String,
    /// Host receiving the forwarded log lines.
    pub hostname: String,
    /// Port on `hostname` receiving the forwarded log lines.
    pub port: u16,
    /// Transport protocol token (for example `tcp`, `udp` or `tcp+tls`).
    pub scheme: String,
    /// Visibility flag. `None` means the user never set it, which is sent
    /// downstream differently from an explicit `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    /// Endpoint URL last written by create, update or read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SyslogDrain {
    /// Starts a builder for a [`SyslogDrain`].
    #[must_use]
    pub fn builder() -> SyslogDrainBuilder {
        SyslogDrainBuilder::new()
    }

    /// Composes `scheme://hostname:port` from the current declared fields.
    #[must_use]
    pub fn compose_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.hostname, self.port)
    }

    /// Checks that the user-settable fields describe a usable drain.
    ///
    /// # Errors
    ///
    /// Returns [`DrainError::Validation`] naming the first blank required
    /// field (or a zero port), and [`DrainError::InvalidScheme`] when the
    /// scheme would produce a malformed URL.
    pub fn validate(&self) -> Result<(), DrainError> {
        for (field, value) in [
            ("name", &self.name),
            ("cluster", &self.cluster),
            ("hostname", &self.hostname),
            ("scheme", &self.scheme),
        ] {
            if value.trim().is_empty() {
                return Err(DrainError::Validation(field.to_owned()));
            }
        }
        if self.port == 0 {
            return Err(DrainError::Validation(String::from("port")));
        }
        if self.scheme.contains("://") || self.scheme.chars().any(char::is_whitespace) {
            return Err(DrainError::InvalidScheme(self.scheme.clone()));
        }
        Ok(())
    }

    /// Parses a JSON state document as persisted by the framework.
    ///
    /// # Errors
    ///
    /// Returns [`DrainError::State`] when the document does not match the
    /// declared schema.
    pub fn from_state_json(document: &str) -> Result<Self, DrainError> {
        serde_json::from_str(document).map_err(|err| DrainError::State(err.to_string()))
    }

    /// Renders the drain as a JSON state document.
    ///
    /// # Errors
    ///
    /// Returns [`DrainError::State`] when serialisation fails.
    pub fn to_state_json(&self) -> Result<String, DrainError> {
        serde_json::to_string(self).map_err(|err| DrainError::State(err.to_string()))
    }
}

/// Builder for [`SyslogDrain`] that trims string inputs and validates on
/// build.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SyslogDrainBuilder {
    name: String,
    cluster: String,
    hostname: String,
    port: u16,
    scheme: String,
    private: Option<bool>,
}

impl SyslogDrainBuilder {
    /// Creates an empty builder; required fields must be set before build.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the drain name.
    #[must_use]
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = value.into();
        self
    }

    /// Sets the owning cluster.
    #[must_use]
    pub fn cluster(mut self, value: impl Into<String>) -> Self {
        self.cluster = value.into();
        self
    }

    /// Sets the target hostname.
    #[must_use]
    pub fn hostname(mut self, value: impl Into<String>) -> Self {
        self.hostname = value.into();
        self
    }

    /// Sets the target port.
    #[must_use]
    pub const fn port(mut self, value: u16) -> Self {
        self.port = value;
        self
    }

    /// Sets the transport scheme.
    #[must_use]
    pub fn scheme(mut self, value: impl Into<String>) -> Self {
        self.scheme = value.into();
        self
    }

    /// Sets the optional visibility flag. Passing `None` leaves it unset.
    #[must_use]
    pub const fn private(mut self, value: Option<bool>) -> Self {
        self.private = value;
        self
    }

    /// Builds and validates the [`SyslogDrain`]. The computed `url` starts
    /// out unset.
    ///
    /// # Errors
    ///
    /// Returns [`DrainError`] when validation fails.
    pub fn build(self) -> Result<SyslogDrain, DrainError> {
        let drain = SyslogDrain {
            name: self.name.trim().to_owned(),
            cluster: self.cluster.trim().to_owned(),
            hostname: self.hostname.trim().to_owned(),
            port: self.port,
            scheme: self.scheme.trim().to_owned(),
            private: self.private,
            url: None,
        };
        drain.validate()?;
        Ok(drain)
    }
}

/// Errors raised for declared configurations.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum DrainError {
    /// Raised when a required field is blank or the port is zero.
    #[error("missing or empty field: {0}")]
    Validation(String),
    /// Raised when the scheme cannot be used as a URL scheme.
    #[error("invalid scheme '{0}': expected a bare protocol token such as tcp or udp")]
    InvalidScheme(String),
    /// Raised when a state document cannot be parsed or rendered.
    #[error("invalid state document: {0}")]
    State(String),
}
