//! BDD step definitions for syslog drain reconciliation.

use rstest_bdd_macros::{given, then, when};
use syslog_drain::test_support::ClientCall;
use syslog_drain::{
    ClientError, Operation, ReconcileError, RemoteResource, SyslogDrainReconciler,
};
use tokio::runtime::Runtime;

use super::test_helpers::DrainContext;

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("assertion failed: {0}")]
    Assertion(String),
}

#[given("a declared syslog drain")]
fn declared_drain(drain_context: DrainContext) -> DrainContext {
    drain_context
}

#[given("the drain is marked private")]
fn drain_private(mut drain_context: DrainContext) -> DrainContext {
    drain_context.drain.private = Some(true);
    drain_context
}

#[given("the drain was created with URL \"{url}\"")]
fn drain_created(mut drain_context: DrainContext, url: String) -> DrainContext {
    drain_context.drain.url = Some(url);
    drain_context
}

#[given("the port is changed to \"{port}\"")]
fn port_changed(mut drain_context: DrainContext, port: u16) -> DrainContext {
    drain_context.drain.port = port;
    drain_context
}

#[given("no client provisioner is configured")]
fn no_provisioner(mut drain_context: DrainContext) -> DrainContext {
    drain_context.configured = false;
    drain_context
}

#[given("the remote API rejects the next call with \"{message}\"")]
fn remote_rejects(drain_context: DrainContext, message: String) -> DrainContext {
    drain_context.client.push_failure(ClientError::Api { message });
    drain_context
}

#[given("the remote resource reports URL \"{url}\"")]
fn remote_reports_url(drain_context: DrainContext, url: String) -> DrainContext {
    let name = drain_context.drain.name.clone();
    drain_context
        .client
        .push_resource(RemoteResource::named(name).with_export("URL", url));
    drain_context
}

#[given("the remote resource is missing")]
fn remote_missing(drain_context: DrainContext) -> DrainContext {
    let name = drain_context.drain.name.clone();
    drain_context
        .client
        .push_failure(ClientError::NotFound { name });
    drain_context
}

fn apply(mut drain_context: DrainContext, operation: Operation) -> Result<DrainContext, StepError> {
    let runtime = Runtime::new().map_err(|err| StepError::Assertion(err.to_string()))?;
    let reconciler = if drain_context.configured {
        SyslogDrainReconciler::new(drain_context.provisioner.clone())
    } else {
        SyslogDrainReconciler::unconfigured()
    };
    let provider = drain_context.provider.clone();
    let mut drain = drain_context.drain.clone();

    let result = runtime.block_on(async {
        match operation {
            Operation::Create => reconciler.create(&mut drain, &provider).await,
            Operation::Read => reconciler.read(&mut drain, &provider).await,
            Operation::Update => reconciler.update(&mut drain, &provider).await,
            Operation::Delete => reconciler.delete(&drain, &provider).await,
        }
    });

    drain_context.drain = drain;
    drain_context.outcome = Some(result);
    Ok(drain_context)
}

#[when("I create the drain")]
fn create_drain(drain_context: DrainContext) -> Result<DrainContext, StepError> {
    apply(drain_context, Operation::Create)
}

#[when("I read the drain")]
fn read_drain(drain_context: DrainContext) -> Result<DrainContext, StepError> {
    apply(drain_context, Operation::Read)
}

#[when("I update the drain")]
fn update_drain(drain_context: DrainContext) -> Result<DrainContext, StepError> {
    apply(drain_context, Operation::Update)
}

#[when("I delete the drain")]
fn delete_drain(drain_context: DrainContext) -> Result<DrainContext, StepError> {
    apply(drain_context, Operation::Delete)
}

#[then("the reconciliation succeeds")]
fn reconciliation_succeeds(drain_context: &DrainContext) -> Result<(), StepError> {
    match &drain_context.outcome {
        Some(Ok(())) => Ok(()),
        Some(Err(err)) => Err(StepError::Assertion(format!(
            "expected success, got failure: {err}"
        ))),
        None => Err(StepError::Assertion(String::from("missing outcome"))),
    }
}

#[then("the reconciliation fails with \"{kind}\"")]
fn reconciliation_fails(drain_context: &DrainContext, kind: String) -> Result<(), StepError> {
    let Some(Err(err)) = &drain_context.outcome else {
        return Err(StepError::Assertion(String::from(
            "expected failure outcome",
        )));
    };
    let actual = failure_kind(err);
    if actual == kind {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected failure kind {kind}, got {actual}: {err}"
        )))
    }
}

#[then("the drain URL is \"{url}\"")]
fn drain_url_is(drain_context: &DrainContext, url: String) -> Result<(), StepError> {
    if drain_context.drain.url.as_deref() == Some(url.as_str()) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected url {url}, got {:?}",
            drain_context.drain.url
        )))
    }
}

#[then("the drain URL is unset")]
fn drain_url_unset(drain_context: &DrainContext) -> Result<(), StepError> {
    match &drain_context.drain.url {
        None => Ok(()),
        Some(url) => Err(StepError::Assertion(format!("expected no url, got {url}"))),
    }
}

fn last_call(drain_context: &DrainContext) -> Result<ClientCall, StepError> {
    drain_context
        .client
        .calls()
        .pop()
        .ok_or_else(|| StepError::Assertion(String::from("no remote call was recorded")))
}

#[then("the last request is \"{call}\"")]
fn last_request_is(drain_context: &DrainContext, call: String) -> Result<(), StepError> {
    let actual = match last_call(drain_context)? {
        ClientCall::Create { .. } => "create",
        ClientCall::Get { .. } => "get",
        ClientCall::Update { .. } => "update",
        ClientCall::Delete { .. } => "delete",
    };
    if actual == call {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {call} request, got {actual}"
        )))
    }
}

#[then("the last request sends \"{key}\" as \"{value}\"")]
fn last_request_sends(
    drain_context: &DrainContext,
    key: String,
    value: String,
) -> Result<(), StepError> {
    let call = last_call(drain_context)?;
    let options = call
        .options()
        .ok_or_else(|| StepError::Assertion(format!("{call:?} carries no options")))?;
    if options.get(&key) == Some(value.as_str()) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {key}={value}, got {options}"
        )))
    }
}

#[then("the last request omits \"{key}\"")]
fn last_request_omits(drain_context: &DrainContext, key: String) -> Result<(), StepError> {
    let call = last_call(drain_context)?;
    let options = call
        .options()
        .ok_or_else(|| StepError::Assertion(format!("{call:?} carries no options")))?;
    if options.contains_key(&key) {
        Err(StepError::Assertion(format!(
            "expected {key} to be omitted, got {options}"
        )))
    } else {
        Ok(())
    }
}

#[then("no remote call was made")]
fn no_remote_call(drain_context: &DrainContext) -> Result<(), StepError> {
    let calls = drain_context.client.call_count();
    let acquisitions = drain_context.provisioner.acquisitions();
    if calls == 0 && acquisitions == 0 {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected no remote activity, got {calls} calls and {acquisitions} acquisitions"
        )))
    }
}

const fn failure_kind(err: &ReconcileError) -> &'static str {
    match err {
        ReconcileError::MissingProvisioner { .. } => "config",
        ReconcileError::InvalidDrain { .. } => "invalid",
        ReconcileError::ClientAcquisition { .. } => "acquisition",
        ReconcileError::RemoteCall { .. } | ReconcileError::RemoteMutation { .. } => "remote",
        ReconcileError::NotFound { .. } => "not-found",
    }
}
