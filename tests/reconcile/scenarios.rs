//! BDD scenarios for syslog drain reconciliation.

use rstest_bdd_macros::scenario;

use super::test_helpers::{DrainContext, drain_context};

#[scenario(
    path = "tests/features/reconcile.feature",
    name = "Create a private drain"
)]
fn scenario_create_private(drain_context: DrainContext) {
    let _ = drain_context;
}

#[scenario(
    path = "tests/features/reconcile.feature",
    name = "Create a drain without a visibility flag"
)]
fn scenario_create_without_private(drain_context: DrainContext) {
    let _ = drain_context;
}

#[scenario(
    path = "tests/features/reconcile.feature",
    name = "Update a drain after its port changes"
)]
fn scenario_update_after_port_change(drain_context: DrainContext) {
    let _ = drain_context;
}

#[scenario(
    path = "tests/features/reconcile.feature",
    name = "Read refreshes the URL from the remote export"
)]
fn scenario_read_refreshes_url(drain_context: DrainContext) {
    let _ = drain_context;
}

#[scenario(
    path = "tests/features/reconcile.feature",
    name = "Read reports a drain deleted out of band"
)]
fn scenario_read_missing(drain_context: DrainContext) {
    let _ = drain_context;
}

#[scenario(
    path = "tests/features/reconcile.feature",
    name = "Delete removes the remote drain"
)]
fn scenario_delete(drain_context: DrainContext) {
    let _ = drain_context;
}

#[scenario(
    path = "tests/features/reconcile.feature",
    name = "Refuse to run without a client provisioner"
)]
fn scenario_missing_provisioner(drain_context: DrainContext) {
    let _ = drain_context;
}

#[scenario(
    path = "tests/features/reconcile.feature",
    name = "Surface remote rejections on create"
)]
fn scenario_remote_rejection(drain_context: DrainContext) {
    let _ = drain_context;
}
