//! Field declarations for the syslog drain resource.
//!
//! The surrounding framework reads [`SYSLOG_DRAIN_SCHEMA`] to parse user
//! input and decide between in-place updates and replacement.

use crate::drain::SyslogDrain;

/// Value type of a declared field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldType {
    /// UTF-8 string.
    String,
    /// Integer.
    Integer,
    /// Boolean.
    Boolean,
}

/// Who supplies a field's value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Presence {
    /// The user must set it.
    Required,
    /// The user may set it.
    Optional,
    /// Only the reconciler sets it.
    Computed,
}

/// What a change to the field costs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mutability {
    /// Applied with an in-place update.
    Mutable,
    /// Forces the resource to be destroyed and created again.
    ForceNew,
}

/// Default applied by the framework when the user leaves a field unset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldDefault {
    /// Boolean default.
    Boolean(bool),
}

/// Declaration of one field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldSchema {
    /// Field name as written by users.
    pub name: &'static str,
    /// Value type.
    pub kind: FieldType,
    /// Who supplies the value.
    pub presence: Presence,
    /// What a change costs.
    pub mutability: Mutability,
    /// Framework-applied default.
    pub default: Option<FieldDefault>,
}

impl FieldSchema {
    const fn new(
        name: &'static str,
        kind: FieldType,
        presence: Presence,
        mutability: Mutability,
    ) -> Self {
        Self {
            name,
            kind,
            presence,
            mutability,
            default: None,
        }
    }

    const fn with_default(mut self, default: FieldDefault) -> Self {
        self.default = Some(default);
        self
    }

    /// Reports whether changing the field forces replacement.
    #[must_use]
    pub const fn forces_replacement(&self) -> bool {
        matches!(self.mutability, Mutability::ForceNew)
    }
}

/// Declared fields of the syslog drain resource.
pub const SYSLOG_DRAIN_SCHEMA: &[FieldSchema] = &[
    FieldSchema::new(
        "name",
        FieldType::String,
        Presence::Required,
        Mutability::ForceNew,
    ),
    FieldSchema::new(
        "cluster",
        FieldType::String,
        Presence::Required,
        Mutability::ForceNew,
    ),
    FieldSchema::new(
        "hostname",
        FieldType::String,
        Presence::Required,
        Mutability::Mutable,
    ),
    FieldSchema::new(
        "port",
        FieldType::Integer,
        Presence::Required,
        Mutability::Mutable,
    ),
    FieldSchema::new(
        "scheme",
        FieldType::String,
        Presence::Required,
        Mutability::Mutable,
    ),
    FieldSchema::new(
        "private",
        FieldType::Boolean,
        Presence::Optional,
        Mutability::Mutable,
    )
    .with_default(FieldDefault::Boolean(false)),
    FieldSchema::new(
        "url",
        FieldType::String,
        Presence::Computed,
        Mutability::Mutable,
    ),
];

/// Looks up a field declaration by name.
#[must_use]
pub fn field(name: &str) -> Option<&'static FieldSchema> {
    SYSLOG_DRAIN_SCHEMA.iter().find(|schema| schema.name == name)
}

/// User-settable fields that differ between two declarations.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DrainDiff {
    /// Names of changed fields, in schema order.
    pub changed: Vec<&'static str>,
}

impl DrainDiff {
    /// Reports whether nothing user-settable changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }

    /// Reports whether any changed field is force-new.
    #[must_use]
    pub fn requires_replacement(&self) -> bool {
        self.changed
            .iter()
            .filter_map(|name| field(name))
            .any(FieldSchema::forces_replacement)
    }
}

/// Compares the user-settable fields of `prior` and `desired`. The computed
/// `url` is ignored.
#[must_use]
pub fn diff(prior: &SyslogDrain, desired: &SyslogDrain) -> DrainDiff {
    let comparisons = [
        ("name", prior.name != desired.name),
        ("cluster", prior.cluster != desired.cluster),
        ("hostname", prior.hostname != desired.hostname),
        ("port", prior.port != desired.port),
        ("scheme", prior.scheme != desired.scheme),
        ("private", prior.private != desired.private),
    ];
    DrainDiff {
        changed: comparisons
            .into_iter()
            .filter_map(|(name, differs)| differs.then_some(name))
            .collect(),
    }
}
