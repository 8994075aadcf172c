//! Lifecycle operations for the syslog drain resource.
//!
//! Each operation checks that a provisioner is configured, acquires a fresh
//! client, performs exactly one remote call and writes derived fields back
//! into the declared state:
//!
//! - create: absent → present, writes `url`
//! - read: present → present, refreshes `url` from the `URL` export
//! - update: present → present, writes `url`
//! - delete: present → absent, leaves the declared state alone
//!
//! No operation waits for the remote platform to converge after a mutation.

mod error;

use std::future::Future;

use tracing::instrument::WithSubscriber;
use tracing::{Dispatch, debug, info, warn};

use crate::client::{
    ClientError, NAME_OPTION, PRIVATE_OPTION, ResourceClient, ResourceOptions,
    SYSLOG_RESOURCE_TYPE, URL_OPTION,
};
use crate::config::ProviderConfig;
use crate::drain::SyslogDrain;
use crate::provisioner::ClientProvisioner;

pub use error::{Operation, ReconcileError, RemoteCall};

/// Reconciles declared syslog drains against the remote API.
#[derive(Clone, Debug)]
pub struct SyslogDrainReconciler<P> {
    provisioner: Option<P>,
    dispatch: Option<Dispatch>,
}

impl<P> SyslogDrainReconciler<P> {
    /// Creates a reconciler with no provisioner. Every lifecycle operation
    /// fails with [`ReconcileError::MissingProvisioner`].
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self {
            provisioner: None,
            dispatch: None,
        }
    }

    /// Routes this reconciler's log events to `dispatch` instead of the
    /// subscriber active when an operation runs.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }
}

impl<P: ClientProvisioner> SyslogDrainReconciler<P> {
    /// Creates a reconciler that acquires clients from `provisioner`.
    #[must_use]
    pub const fn new(provisioner: P) -> Self {
        Self {
            provisioner: Some(provisioner),
            dispatch: None,
        }
    }

    /// Creates the remote drain and records its `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError`] when no provisioner is configured, the
    /// declaration is invalid, the client cannot be acquired, or the remote
    /// call fails. `drain` is left untouched on failure.
    pub async fn create(
        &self,
        drain: &mut SyslogDrain,
        context: &ProviderConfig,
    ) -> Result<(), ReconcileError> {
        self.observe(self.run_create(drain, context)).await
    }

    /// Refreshes `url` from the remote `URL` export.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::NotFound`] when the remote resource is
    /// gone, and other [`ReconcileError`] variants for precondition,
    /// acquisition and remote failures.
    pub async fn read(
        &self,
        drain: &mut SyslogDrain,
        context: &ProviderConfig,
    ) -> Result<(), ReconcileError> {
        self.observe(self.run_read(drain, context)).await
    }

    /// Applies declared changes and records the recomputed `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError`] when no provisioner is configured, the
    /// declaration is invalid, the client cannot be acquired, or the remote
    /// call fails. `drain` is left untouched on failure.
    pub async fn update(
        &self,
        drain: &mut SyslogDrain,
        context: &ProviderConfig,
    ) -> Result<(), ReconcileError> {
        self.observe(self.run_update(drain, context)).await
    }

    /// Deletes the remote drain. Dropping the record from state is the
    /// caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError`] when no provisioner is configured, the
    /// client cannot be acquired, or the remote call fails.
    pub async fn delete(
        &self,
        drain: &SyslogDrain,
        context: &ProviderConfig,
    ) -> Result<(), ReconcileError> {
        self.observe(self.run_delete(drain, context)).await
    }

    async fn observe<F>(&self, operation: F) -> Result<(), ReconcileError>
    where
        F: Future<Output = Result<(), ReconcileError>>,
    {
        let observed = async move {
            let result = operation.await;
            if let Err(err) = &result {
                warn!(error = %err, "syslog drain reconciliation failed");
            }
            result
        };
        match &self.dispatch {
            Some(dispatch) => observed.with_subscriber(dispatch.clone()).await,
            None => observed.await,
        }
    }

    async fn run_create(
        &self,
        drain: &mut SyslogDrain,
        context: &ProviderConfig,
    ) -> Result<(), ReconcileError> {
        let operation = Operation::Create;
        debug!(%operation, name = %drain.name, "reconciling syslog drain");
        let client = self.prepare(operation, drain, context, true)?;

        let url = drain.compose_url();
        let mut options = ResourceOptions::new();
        options.insert(NAME_OPTION, drain.name.as_str());
        options.insert(URL_OPTION, url.as_str());
        insert_private(&mut options, drain);

        info!(name = %drain.name, kind = SYSLOG_RESOURCE_TYPE, "calling create_resource");
        let result = client
            .create_resource(SYSLOG_RESOURCE_TYPE, &options)
            .await;
        if let Err(source) = result {
            return Err(ReconcileError::RemoteMutation {
                call: RemoteCall::CreateResource,
                source,
                options,
            });
        }

        drain.url = Some(url);
        Ok(())
    }

    async fn run_read(
        &self,
        drain: &mut SyslogDrain,
        context: &ProviderConfig,
    ) -> Result<(), ReconcileError> {
        let operation = Operation::Read;
        debug!(%operation, name = %drain.name, "reconciling syslog drain");
        let client = self.prepare(operation, drain, context, false)?;

        info!(name = %drain.name, "calling get_resource");
        let result = client.get_resource(&drain.name).await;
        let resource = match result {
            Ok(resource) => resource,
            Err(ClientError::NotFound { .. }) => {
                return Err(ReconcileError::NotFound {
                    name: drain.name.clone(),
                });
            }
            Err(source) => {
                return Err(ReconcileError::RemoteCall {
                    call: RemoteCall::GetResource,
                    source,
                });
            }
        };

        if resource.url().is_none() {
            warn!(name = %drain.name, "remote syslog drain reports no URL export");
        }
        drain.url = resource.url().map(str::to_owned);
        Ok(())
    }

    async fn run_update(
        &self,
        drain: &mut SyslogDrain,
        context: &ProviderConfig,
    ) -> Result<(), ReconcileError> {
        let operation = Operation::Update;
        debug!(%operation, name = %drain.name, "reconciling syslog drain");
        let client = self.prepare(operation, drain, context, true)?;

        // name and cluster are force-new; they never travel with an update.
        let url = drain.compose_url();
        let mut options = ResourceOptions::new();
        options.insert(URL_OPTION, url.as_str());
        insert_private(&mut options, drain);

        info!(name = %drain.name, "calling update_resource");
        let result = client.update_resource(&drain.name, &options).await;
        if let Err(source) = result {
            return Err(ReconcileError::RemoteMutation {
                call: RemoteCall::UpdateResource,
                source,
                options,
            });
        }

        drain.url = Some(url);
        Ok(())
    }

    async fn run_delete(
        &self,
        drain: &SyslogDrain,
        context: &ProviderConfig,
    ) -> Result<(), ReconcileError> {
        let operation = Operation::Delete;
        debug!(%operation, name = %drain.name, "reconciling syslog drain");
        let client = self.prepare(operation, drain, context, false)?;

        info!(name = %drain.name, "calling delete_resource");
        client
            .delete_resource(&drain.name)
            .await
            .map(|_| ())
            .map_err(|source| ReconcileError::RemoteCall {
                call: RemoteCall::DeleteResource,
                source,
            })
    }

    /// Runs the shared preconditions in order: provisioner present, then
    /// declaration valid (for mutations), then client acquisition.
    fn prepare(
        &self,
        operation: Operation,
        drain: &SyslogDrain,
        context: &ProviderConfig,
        validate: bool,
    ) -> Result<P::Client, ReconcileError> {
        let provisioner = self
            .provisioner
            .as_ref()
            .ok_or(ReconcileError::MissingProvisioner { operation })?;

        if validate {
            drain
                .validate()
                .map_err(|source| ReconcileError::InvalidDrain { operation, source })?;
        }

        provisioner
            .acquire(drain, context)
            .map_err(|source| ReconcileError::ClientAcquisition { operation, source })
    }
}

fn insert_private(options: &mut ResourceOptions, drain: &SyslogDrain) {
    if let Some(private) = drain.private {
        options.insert(PRIVATE_OPTION, private.to_string());
    }
}
