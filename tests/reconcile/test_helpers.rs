//! Shared fixtures for reconciliation BDD scenarios.

use rstest::fixture;
use syslog_drain::test_support::{RecordingClient, RecordingProvisioner};
use syslog_drain::{DrainError, ProviderConfig, ReconcileError, SyslogDrain};

use crate::test_constants::{CLUSTER, DRAIN_NAME};

#[derive(Clone, Debug)]
pub struct DrainContext {
    pub client: RecordingClient,
    pub provisioner: RecordingProvisioner,
    pub provider: ProviderConfig,
    pub drain: SyslogDrain,
    pub configured: bool,
    pub outcome: Option<Result<(), ReconcileError>>,
}

#[fixture]
pub fn drain_context_result() -> Result<DrainContext, DrainError> {
    build_drain_context()
}

#[fixture]
pub fn drain_context(drain_context_result: Result<DrainContext, DrainError>) -> DrainContext {
    drain_context_result
        .unwrap_or_else(|err| panic!("drain context fixture should initialise: {err}"))
}

fn build_drain_context() -> Result<DrainContext, DrainError> {
    let drain = SyslogDrain::builder()
        .name(DRAIN_NAME)
        .cluster(CLUSTER)
        .hostname("logs.example.com")
        .port(514)
        .scheme("tcp")
        .build()?;
    let client = RecordingClient::new();

    Ok(DrainContext {
        provisioner: RecordingProvisioner::new(client.clone()),
        client,
        provider: ProviderConfig::new(),
        drain,
        configured: true,
        outcome: None,
    })
}
