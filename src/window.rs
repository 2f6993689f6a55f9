//! Release windows: the start/end bounds a node declares and how they are
//! resolved from host schema fields.

use crate::types::Timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Names of the schema fields that carry a node's release window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default = "default_start_activate")]
    pub start_activate: String,
    #[serde(default = "default_end")]
    pub end: String,
    #[serde(default = "default_end_activate")]
    pub end_activate: String,
}

fn default_start() -> String {
    "releasetime_start".to_string()
}

fn default_start_activate() -> String {
    "releasetime_start_activate".to_string()
}

fn default_end() -> String {
    "releasetime_end".to_string()
}

fn default_end_activate() -> String {
    "releasetime_end_activate".to_string()
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            start: default_start(),
            start_activate: default_start_activate(),
            end: default_end(),
            end_activate: default_end_activate(),
        }
    }
}

impl FieldNames {
    /// Labelled view of all four names, in declaration order.
    pub fn labelled(&self) -> [(&'static str, &str); 4] {
        [
            ("start", self.start.as_str()),
            ("start_activate", self.start_activate.as_str()),
            ("end", self.end.as_str()),
            ("end_activate", self.end_activate.as_str()),
        ]
    }
}

/// Read access to a node's schema and field values, supplied by the host.
pub trait NodeFields {
    /// Does the node's schema declare this field?
    fn has_field(&self, name: &str) -> bool;

    /// Value of a checkbox-style field. Missing or empty reads as `false`.
    fn flag(&self, name: &str) -> bool;

    /// Value of a datetime field, `None` when empty.
    fn timestamp(&self, name: &str) -> Option<Timestamp>;
}

/// One side of a release window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowBound {
    /// The schema has no field for this bound.
    #[default]
    Unset,
    /// The field exists without an activation field; always enforced.
    Unconditional { at: Option<Timestamp> },
    /// The field exists together with an activation field.
    Toggled {
        active: bool,
        at: Option<Timestamp>,
    },
}

impl WindowBound {
    /// Resolve a bound from the host schema.
    ///
    /// The activation field is optional: when the schema omits it the bound
    /// is enforced whenever the timestamp field exists.
    pub fn resolve<F: NodeFields + ?Sized>(fields: &F, field: &str, activation: &str) -> Self {
        if !fields.has_field(field) {
            return WindowBound::Unset;
        }
        let at = fields.timestamp(field);
        if fields.has_field(activation) {
            WindowBound::Toggled {
                active: fields.flag(activation),
                at,
            }
        } else {
            WindowBound::Unconditional { at }
        }
    }

    pub fn is_enforced(&self) -> bool {
        match self {
            WindowBound::Unset => false,
            WindowBound::Unconditional { .. } => true,
            WindowBound::Toggled { active, .. } => *active,
        }
    }

    /// Instant the bound compares against when enforced.
    ///
    /// An enforced bound with an empty timestamp compares as the Unix epoch:
    /// an empty start never blocks, an empty end always does.
    pub fn enforced_at(&self) -> Option<Timestamp> {
        match self {
            WindowBound::Unset => None,
            WindowBound::Unconditional { at } => Some(at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)),
            WindowBound::Toggled { active: true, at } => {
                Some(at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH))
            }
            WindowBound::Toggled { active: false, .. } => None,
        }
    }
}

/// A node's own release window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReleaseWindow {
    #[serde(default)]
    pub start: WindowBound,
    #[serde(default)]
    pub end: WindowBound,
}

impl ReleaseWindow {
    /// Window with neither bound declared.
    pub fn open() -> Self {
        Self::default()
    }

    pub fn new(start: WindowBound, end: WindowBound) -> Self {
        Self { start, end }
    }

    pub fn from_fields<F: NodeFields + ?Sized>(fields: &F, names: &FieldNames) -> Self {
        Self {
            start: WindowBound::resolve(fields, &names.start, &names.start_activate),
            end: WindowBound::resolve(fields, &names.end, &names.end_activate),
        }
    }

    /// Whether any bound is actively configured.
    pub fn is_set(&self) -> bool {
        self.start.is_enforced() || self.end.is_enforced()
    }
}
