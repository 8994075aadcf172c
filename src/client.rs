//! Contract for the remote resource-management API.
//!
//! A [`ResourceClient`] is a short-lived handle obtained from a
//! [`ClientProvisioner`](crate::provisioner::ClientProvisioner) at the start
//! of every lifecycle operation. Authentication, transport and retries live
//! behind this trait.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Resource-type token used when creating syslog drains.
pub const SYSLOG_RESOURCE_TYPE: &str = "syslog";

/// Export key carrying the drain endpoint on a remote resource.
pub const URL_EXPORT: &str = "URL";

/// Option key carrying the resource name on create.
pub const NAME_OPTION: &str = "name";

/// Option key carrying the composed endpoint URL.
pub const URL_OPTION: &str = "Url";

/// Option key carrying the stringified visibility flag.
pub const PRIVATE_OPTION: &str = "Private";

/// Remote view of a resource.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RemoteResource {
    /// Resource name, the remote key.
    pub name: String,
    /// Observable key/value attributes.
    pub exports: BTreeMap<String, String>,
}

impl RemoteResource {
    /// Creates a record with no exports.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an export, returning the updated record.
    #[must_use]
    pub fn with_export(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.exports.insert(key.into(), value.into());
        self
    }

    /// Returns the `URL` export when present.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.exports.get(URL_EXPORT).map(String::as_str)
    }
}

/// Options sent with create and update calls.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResourceOptions(BTreeMap<String, String>);

impl ResourceOptions {
    /// Creates an empty options record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Reports whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Reports whether the record holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl fmt::Display for ResourceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResourceOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Errors reported by a [`ResourceClient`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ClientError {
    /// Raised when the named resource does not exist remotely.
    #[error("resource {name} not found")]
    NotFound {
        /// Name that was looked up.
        name: String,
    },
    /// Raised when the remote API rejects the request.
    #[error("{message}")]
    Api {
        /// Message returned by the API.
        message: String,
    },
    /// Raised when the request never reached the API.
    #[error("transport failure: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },
}

/// Future returned by client operations.
pub type ClientFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ClientError>> + Send + 'a>>;

/// The four remote primitives available for syslog drains.
pub trait ResourceClient {
    /// Creates a resource of type `kind` configured by `options`.
    fn create_resource<'a>(
        &'a self,
        kind: &'a str,
        options: &'a ResourceOptions,
    ) -> ClientFuture<'a, RemoteResource>;

    /// Fetches the resource called `name`.
    fn get_resource<'a>(&'a self, name: &'a str) -> ClientFuture<'a, RemoteResource>;

    /// Applies `options` to the resource called `name`.
    fn update_resource<'a>(
        &'a self,
        name: &'a str,
        options: &'a ResourceOptions,
    ) -> ClientFuture<'a, RemoteResource>;

    /// Deletes the resource called `name`.
    fn delete_resource<'a>(&'a self, name: &'a str) -> ClientFuture<'a, RemoteResource>;
}
