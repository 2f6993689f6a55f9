//! Inputs to a release decision: the node, its ancestor chain and the viewer.

use crate::types::{NodeId, ViewerId};
use crate::window::{FieldNames, NodeFields, ReleaseWindow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Entry in a node's ancestor chain as handed over by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AncestorRef {
    /// A persisted ancestor and its own release window.
    Persisted { id: NodeId, window: ReleaseWindow },
    /// Placeholder or broken reference. Skipped during evaluation.
    Unresolved,
}

impl AncestorRef {
    pub fn persisted(id: NodeId, window: ReleaseWindow) -> Self {
        AncestorRef::Persisted { id, window }
    }
}

/// A content node with its already materialized ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Node {
    /// `None` for nodes the host has not persisted yet.
    pub id: Option<NodeId>,
    pub window: ReleaseWindow,
    /// Ancestors in any order; each is evaluated on its own.
    #[serde(default)]
    pub ancestors: Vec<AncestorRef>,
}

impl Node {
    pub fn new(id: NodeId, window: ReleaseWindow) -> Self {
        Self {
            id: Some(id),
            window,
            ancestors: Vec::new(),
        }
    }

    /// Build a node by resolving its window from host schema fields.
    pub fn from_fields<F: NodeFields + ?Sized>(
        id: Option<NodeId>,
        fields: &F,
        names: &FieldNames,
    ) -> Self {
        Self {
            id,
            window: ReleaseWindow::from_fields(fields, names),
            ancestors: Vec::new(),
        }
    }

    pub fn with_ancestors(mut self, ancestors: Vec<AncestorRef>) -> Self {
        self.ancestors = ancestors;
        self
    }
}

/// The user an access decision is made for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewer {
    /// `None` marks an absent or invalid viewer.
    pub id: Option<ViewerId>,
    #[serde(default)]
    pub superuser: bool,
    #[serde(default)]
    pub permissions: BTreeSet<String>,
}

impl Viewer {
    pub fn new(id: ViewerId) -> Self {
        Self {
            id: Some(id),
            superuser: false,
            permissions: BTreeSet::new(),
        }
    }

    pub fn superuser(id: ViewerId) -> Self {
        Self {
            superuser: true,
            ..Self::new(id)
        }
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    pub fn is_valid(&self) -> bool {
        self.id.is_some()
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}
