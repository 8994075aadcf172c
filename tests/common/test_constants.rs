//! Shared constants for integration tests.
//!
//! Integration tests are compiled as separate crates (one per top-level file in
//! `tests/`). Placing shared constants under `tests/common/` avoids creating an
//! additional integration test binary while still allowing reuse via:
//!
//! ```rust
//! #[path = "common/test_constants.rs"]
//! mod test_constants;
//! ```

/// Name of the drain declared by the scenarios.
pub const DRAIN_NAME: &str = "logs1";

/// Cluster owning the declared drain.
pub const CLUSTER: &str = "prod";
