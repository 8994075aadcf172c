//! Reconciliation of declared syslog drains against a remote platform API.
//!
//! The crate exposes the declared configuration of a drain, the contract a
//! remote client must satisfy, a provisioner abstraction that hands out a
//! fresh client per operation, and the reconciler implementing the
//! create → read → update → delete lifecycle.

pub mod client;
pub mod config;
pub mod drain;
pub mod logging;
pub mod provisioner;
pub mod reconciler;
pub mod schema;
pub mod test_support;

pub use client::{ClientError, ClientFuture, RemoteResource, ResourceClient, ResourceOptions};
pub use config::{ConfigError, ProviderConfig};
pub use drain::{DrainError, SyslogDrain, SyslogDrainBuilder};
pub use provisioner::{ClientProvisioner, ProvisionError};
pub use reconciler::{Operation, ReconcileError, RemoteCall, SyslogDrainReconciler};
pub use schema::{DrainDiff, FieldSchema, SYSLOG_DRAIN_SCHEMA};
