//! Error types for syslog drain reconciliation.

use std::fmt;

use thiserror::Error;

use crate::client::{ClientError, ResourceOptions};
use crate::drain::DrainError;
use crate::provisioner::ProvisionError;

/// Lifecycle operation being performed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    /// Creates the remote resource.
    Create,
    /// Refreshes declared state from the remote resource.
    Read,
    /// Applies declared changes to the remote resource.
    Update,
    /// Removes the remote resource.
    Delete,
}

impl Operation {
    /// Lower-case name used in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote primitive that was invoked.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RemoteCall {
    /// `create_resource`.
    CreateResource,
    /// `get_resource`.
    GetResource,
    /// `update_resource`.
    UpdateResource,
    /// `delete_resource`.
    DeleteResource,
}

impl fmt::Display for RemoteCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CreateResource => "create_resource",
            Self::GetResource => "get_resource",
            Self::UpdateResource => "update_resource",
            Self::DeleteResource => "delete_resource",
        })
    }
}

/// Errors surfaced by the lifecycle operations.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ReconcileError {
    /// Raised when the reconciler was built without a provisioner.
    #[error("client provisioner is required ({operation})")]
    MissingProvisioner {
        /// Operation that was attempted.
        operation: Operation,
    },
    /// Raised when the declared configuration cannot be reconciled.
    #[error("invalid syslog drain in {operation}: {source}")]
    InvalidDrain {
        /// Operation that was attempted.
        operation: Operation,
        /// Validation failure.
        #[source]
        source: DrainError,
    },
    /// Raised when the provisioner fails to produce a client.
    #[error("unpacking client in {operation}: {source}")]
    ClientAcquisition {
        /// Operation that was attempted.
        operation: Operation,
        /// Provisioner failure.
        #[source]
        source: ProvisionError,
    },
    /// Raised when a read or delete call fails.
    #[error("calling {call}: {source}")]
    RemoteCall {
        /// Primitive that failed.
        call: RemoteCall,
        /// Client failure.
        #[source]
        source: ClientError,
    },
    /// Raised when a create or update call fails; carries the options
    /// attempted.
    #[error("calling {call}: {source} -- {options}")]
    RemoteMutation {
        /// Primitive that failed.
        call: RemoteCall,
        /// Client failure.
        #[source]
        source: ClientError,
        /// Options sent with the call.
        options: ResourceOptions,
    },
    /// Raised when a read finds no remote resource.
    #[error("syslog drain {name} not found")]
    NotFound {
        /// Name that was looked up.
        name: String,
    },
}

impl ReconcileError {
    /// Reports whether the remote resource is gone, letting the framework
    /// decide whether to drop the record from state.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Operation the error belongs to, when the error carries one.
    #[must_use]
    pub const fn operation(&self) -> Option<Operation> {
        match self {
            Self::MissingProvisioner { operation }
            | Self::InvalidDrain { operation, .. }
            | Self::ClientAcquisition { operation, .. } => Some(*operation),
            Self::RemoteCall { call, .. } | Self::RemoteMutation { call, .. } => {
                Some(call.operation())
            }
            Self::NotFound { .. } => Some(Operation::Read),
        }
    }
}

impl RemoteCall {
    /// Lifecycle operation that issues this call.
    #[must_use]
    pub const fn operation(self) -> Operation {
        match self {
            Self::CreateResource => Operation::Create,
            Self::GetResource => Operation::Read,
            Self::UpdateResource => Operation::Update,
            Self::DeleteResource => Operation::Delete,
        }
    }
}
