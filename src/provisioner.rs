//! Client provisioning contract.
//!
//! The reconciler never builds clients itself. It asks a
//! [`ClientProvisioner`] for a fresh [`ResourceClient`] at the start of every
//! lifecycle operation, which keeps reconciliation testable against
//! substitute provisioners.

use thiserror::Error;

use crate::client::ResourceClient;
use crate::config::ProviderConfig;
use crate::drain::SyslogDrain;

/// Produces authenticated client handles.
pub trait ClientProvisioner {
    /// Handle type produced on success.
    type Client: ResourceClient;

    /// Acquires a client for the operation about to run on `drain`.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] when no usable handle can be produced.
    fn acquire(
        &self,
        drain: &SyslogDrain,
        context: &ProviderConfig,
    ) -> Result<Self::Client, ProvisionError>;
}

impl<F, C> ClientProvisioner for F
where
    F: Fn(&SyslogDrain, &ProviderConfig) -> Result<C, ProvisionError>,
    C: ResourceClient,
{
    type Client = C;

    fn acquire(
        &self,
        drain: &SyslogDrain,
        context: &ProviderConfig,
    ) -> Result<Self::Client, ProvisionError> {
        self(drain, context)
    }
}

/// Errors raised while acquiring a client.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ProvisionError {
    /// Raised when the provider context lacks what the provisioner needs.
    #[error("provider context incomplete: {0}")]
    Context(String),
    /// Raised when credentials are missing or rejected.
    #[error("credentials unavailable: {0}")]
    Credentials(String),
    /// Raised for any other provisioning failure.
    #[error("{0}")]
    Other(String),
}
