//! Test support utilities shared across unit and integration tests.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::env;
use std::ffi::OsString;
use std::fmt;
use std::future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::field::{Field, Visit};
use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::client::{
    ClientError, ClientFuture, RemoteResource, ResourceClient, ResourceOptions, URL_EXPORT,
    URL_OPTION,
};
use crate::config::ProviderConfig;
use crate::drain::SyslogDrain;
use crate::provisioner::{ClientProvisioner, ProvisionError};

/// A single call recorded by [`RecordingClient`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClientCall {
    /// `create_resource(kind, options)`.
    Create {
        /// Resource type token.
        kind: String,
        /// Options sent.
        options: ResourceOptions,
    },
    /// `get_resource(name)`.
    Get {
        /// Resource name.
        name: String,
    },
    /// `update_resource(name, options)`.
    Update {
        /// Resource name.
        name: String,
        /// Options sent.
        options: ResourceOptions,
    },
    /// `delete_resource(name)`.
    Delete {
        /// Resource name.
        name: String,
    },
}

impl ClientCall {
    /// Options sent with the call, for create and update.
    #[must_use]
    pub const fn options(&self) -> Option<&ResourceOptions> {
        match self {
            Self::Create { options, .. } | Self::Update { options, .. } => Some(options),
            Self::Get { .. } | Self::Delete { .. } => None,
        }
    }
}

#[derive(Debug, Default)]
struct ClientState {
    calls: Vec<ClientCall>,
    responses: VecDeque<Result<RemoteResource, ClientError>>,
}

/// Scripted client that records every call and replays queued responses in
/// FIFO order.
///
/// With no queued response, create and update echo the `Url` option back as
/// a `URL` export, and get and delete return a bare record.
#[derive(Clone, Debug, Default)]
pub struct RecordingClient {
    state: Arc<Mutex<ClientState>>,
}

impl RecordingClient {
    /// Creates a client with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ClientState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues a successful response.
    pub fn push_resource(&self, resource: RemoteResource) {
        self.state().responses.push_back(Ok(resource));
    }

    /// Queues a failing response.
    pub fn push_failure(&self, error: ClientError) {
        self.state().responses.push_back(Err(error));
    }

    /// Returns a snapshot of all calls recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<ClientCall> {
        self.state().calls.clone()
    }

    /// Number of calls recorded so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }

    fn respond(
        &self,
        call: ClientCall,
        fallback: RemoteResource,
    ) -> ClientFuture<'static, RemoteResource> {
        let mut state = self.state();
        state.calls.push(call);
        let response = state.responses.pop_front().unwrap_or(Ok(fallback));
        Box::pin(future::ready(response))
    }
}

fn echo_url(name: &str, options: &ResourceOptions) -> RemoteResource {
    let resource = RemoteResource::named(name);
    match options.get(URL_OPTION) {
        Some(url) => resource.with_export(URL_EXPORT, url),
        None => resource,
    }
}

impl ResourceClient for RecordingClient {
    fn create_resource<'a>(
        &'a self,
        kind: &'a str,
        options: &'a ResourceOptions,
    ) -> ClientFuture<'a, RemoteResource> {
        let name = options.get(crate::client::NAME_OPTION).unwrap_or_default();
        self.respond(
            ClientCall::Create {
                kind: kind.to_owned(),
                options: options.clone(),
            },
            echo_url(name, options),
        )
    }

    fn get_resource<'a>(&'a self, name: &'a str) -> ClientFuture<'a, RemoteResource> {
        self.respond(
            ClientCall::Get {
                name: name.to_owned(),
            },
            RemoteResource::named(name),
        )
    }

    fn update_resource<'a>(
        &'a self,
        name: &'a str,
        options: &'a ResourceOptions,
    ) -> ClientFuture<'a, RemoteResource> {
        self.respond(
            ClientCall::Update {
                name: name.to_owned(),
                options: options.clone(),
            },
            echo_url(name, options),
        )
    }

    fn delete_resource<'a>(&'a self, name: &'a str) -> ClientFuture<'a, RemoteResource> {
        self.respond(
            ClientCall::Delete {
                name: name.to_owned(),
            },
            RemoteResource::named(name),
        )
    }
}

/// Provisioner handing out clones of one [`RecordingClient`] and counting
/// acquisitions.
#[derive(Clone, Debug)]
pub struct RecordingProvisioner {
    client: RecordingClient,
    failure: Option<ProvisionError>,
    acquisitions: Arc<AtomicUsize>,
}

impl RecordingProvisioner {
    /// Creates a provisioner that always succeeds with `client`.
    #[must_use]
    pub fn new(client: RecordingClient) -> Self {
        Self {
            client,
            failure: None,
            acquisitions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a provisioner that always fails with `error`.
    #[must_use]
    pub fn failing(client: RecordingClient, error: ProvisionError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new(client)
        }
    }

    /// Number of acquisitions attempted so far.
    #[must_use]
    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }
}

impl ClientProvisioner for RecordingProvisioner {
    type Client = RecordingClient;

    fn acquire(
        &self,
        _drain: &SyslogDrain,
        _context: &ProviderConfig,
    ) -> Result<Self::Client, ProvisionError> {
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        self.failure
            .clone()
            .map_or_else(|| Ok(self.client.clone()), Err)
    }
}

/// Event recorded by [`EventCapture`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapturedEvent {
    /// Event level.
    pub level: Level,
    /// Rendered `message` field.
    pub message: String,
    /// Remaining fields rendered with `Debug`, or verbatim for strings.
    pub fields: BTreeMap<String, String>,
}

#[derive(Default)]
struct FieldRecorder {
    message: String,
    fields: BTreeMap<String, String>,
}

impl Visit for FieldRecorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.message);
        } else {
            self.fields.insert(field.name().to_owned(), value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields
                .insert(field.name().to_owned(), format!("{value:?}"));
        }
    }
}

/// `tracing-subscriber` layer collecting events in memory.
#[derive(Clone, Debug, Default)]
pub struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    /// Creates an empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dispatcher that feeds this capture.
    #[must_use]
    pub fn dispatch(&self) -> Dispatch {
        Dispatch::new(tracing_subscriber::registry().with(self.clone()))
    }

    /// Returns a snapshot of the captured events.
    #[must_use]
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the captured messages in emission order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|event| event.message).collect()
    }
}

impl<S: Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedEvent {
                level: *event.metadata().level(),
                message: recorder.message,
                fields: recorder.fields,
            });
    }
}

/// Builds the drain used across examples: `logs1` in `prod`, forwarding to
/// `tcp://logs.example.com:514`.
///
/// # Errors
///
/// Returns [`crate::DrainError`] if the builder rejects the fixture values.
pub fn sample_drain(private: Option<bool>) -> Result<SyslogDrain, crate::DrainError> {
    SyslogDrain::builder()
        .name("logs1")
        .cluster("prod")
        .hostname("logs.example.com")
        .port(514)
        .scheme("tcp")
        .private(private)
        .build()
}

/// Global mutex used to serialise environment mutation in tests.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Guard that holds the env mutex and restores variables on drop.
pub struct EnvGuard {
    previous: Vec<(String, Option<OsString>)>,
    _guard: MutexGuard<'static, ()>,
}

impl EnvGuard {
    /// Sets multiple environment variables while holding a global mutex.
    #[must_use]
    pub fn set_vars(pairs: &[(&str, &str)]) -> Self {
        debug_assert!(
            {
                let mut seen = BTreeSet::new();
                pairs.iter().all(|(key, _)| seen.insert(*key))
            },
            "duplicate environment variable keys passed to EnvGuard::set_vars"
        );

        let guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let mut previous = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            let old = env::var_os(key);
            // SAFETY: Environment mutation is serialised by `ENV_LOCK`, preventing races.
            unsafe { env::set_var(key, value) };
            previous.push(((*key).to_owned(), old));
        }

        Self {
            previous,
            _guard: guard,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, old) in &self.previous {
            // SAFETY: Environment mutation is serialised by holding `_guard`.
            unsafe {
                match old {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
            }
        }
    }
}
