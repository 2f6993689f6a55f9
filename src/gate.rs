//! Release gate
//!
//! Decides whether a node is visible right now. A node is released when the
//! current instant lies inside its own window and inside the window of every
//! persisted ancestor. Superusers and holders of the override permission see
//! everything.
//!
//! The gate is immutable and does no I/O, so a single instance can be shared
//! across request threads. "Now" is sampled once per decision.

mod hooks;
mod status;

pub use hooks::VisibilityHooks;
pub use status::{BlockedBy, Decision, DecisionReason, ReleaseStatus};

use crate::clock::{Clock, SystemClock};
use crate::config::GateConfig;
use crate::node::{AncestorRef, Node, Viewer};
use crate::types::Timestamp;
use crate::window::{FieldNames, NodeFields, ReleaseWindow};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Default name of the permission that bypasses release windows.
pub const DEFAULT_OVERRIDE_PERMISSION: &str = "page-view-not-released";

/// Release window evaluator
pub struct ReleaseGate {
    fields: FieldNames,
    override_permission: String,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for ReleaseGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseGate")
            .field("fields", &self.fields)
            .field("override_permission", &self.override_permission)
            .finish_non_exhaustive()
    }
}

impl Default for ReleaseGate {
    fn default() -> Self {
        Self::new(FieldNames::default(), DEFAULT_OVERRIDE_PERMISSION)
    }
}

impl ReleaseGate {
    /// Create a gate reading the wall clock.
    pub fn new(fields: FieldNames, override_permission: impl Into<String>) -> Self {
        Self {
            fields,
            override_permission: override_permission.into(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(config.fields.clone(), config.override_permission.clone())
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn field_names(&self) -> &FieldNames {
        &self.fields
    }

    pub fn override_permission(&self) -> &str {
        &self.override_permission
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Resolve a window from host fields using this gate's field names.
    pub fn window_from_fields<F: NodeFields + ?Sized>(&self, fields: &F) -> ReleaseWindow {
        ReleaseWindow::from_fields(fields, &self.fields)
    }

    /// Check one window at a given instant.
    pub fn window_status(&self, window: &ReleaseWindow, now: Timestamp) -> ReleaseStatus {
        if let Some(starts_at) = window.start.enforced_at() {
            if starts_at > now {
                return ReleaseStatus::NotYetReleased { starts_at };
            }
        }
        if let Some(ended_at) = window.end.enforced_at() {
            if ended_at < now {
                return ReleaseStatus::Expired { ended_at };
            }
        }
        ReleaseStatus::Released
    }

    /// Status of the node's own window, ignoring ancestors.
    pub fn release_status(&self, node: &Node) -> ReleaseStatus {
        self.window_status(&node.window, self.now())
    }

    /// Is the node inside its own window? Ancestors are ignored.
    pub fn is_released_single(&self, node: &Node) -> bool {
        self.is_released_single_at(node, self.now())
    }

    pub fn is_released_single_at(&self, node: &Node, now: Timestamp) -> bool {
        self.window_status(&node.window, now).is_released()
    }

    /// Is the node and every persisted ancestor inside its own window?
    pub fn is_released(&self, node: &Node) -> bool {
        self.is_released_at(node, self.now())
    }

    pub fn is_released_at(&self, node: &Node, now: Timestamp) -> bool {
        self.first_blocked_at(node, now).is_none()
    }

    /// First node in the chain that is outside its window, if any.
    ///
    /// The node itself is checked first, then ancestors in the given order.
    /// Unresolved ancestor entries are skipped.
    pub fn first_blocked_at(
        &self,
        node: &Node,
        now: Timestamp,
    ) -> Option<(BlockedBy, ReleaseStatus)> {
        let status = self.window_status(&node.window, now);
        if !status.is_released() {
            return Some((BlockedBy::Target, status));
        }

        for ancestor in &node.ancestors {
            match ancestor {
                AncestorRef::Persisted { id, window } => {
                    let status = self.window_status(window, now);
                    if !status.is_released() {
                        return Some((BlockedBy::Ancestor(*id), status));
                    }
                }
                AncestorRef::Unresolved => {
                    trace!(node = ?node.id, "Skipping unresolved ancestor reference");
                }
            }
        }

        None
    }

    /// Does the node have any active window restriction, regardless of the
    /// current time?
    pub fn is_release_time_set(&self, node: &Node) -> bool {
        node.window.is_set()
    }

    /// Does the viewer bypass release windows?
    pub fn has_override(&self, viewer: &Viewer) -> bool {
        viewer.superuser || viewer.has_permission(&self.override_permission)
    }

    /// Can the viewer see the node now?
    ///
    /// An absent or invalid `viewer` is replaced by `current`, the host's
    /// ambient viewer.
    pub fn can_user_see(&self, node: &Node, viewer: Option<&Viewer>, current: &Viewer) -> bool {
        self.explain(node, viewer, current).allowed
    }

    /// Like [`can_user_see`](Self::can_user_see), with the reason attached.
    pub fn explain(&self, node: &Node, viewer: Option<&Viewer>, current: &Viewer) -> Decision {
        self.explain_at(node, viewer, current, self.now())
    }

    pub fn explain_at(
        &self,
        node: &Node,
        viewer: Option<&Viewer>,
        current: &Viewer,
        now: Timestamp,
    ) -> Decision {
        let viewer = resolve_viewer(viewer, current);

        if viewer.superuser {
            return Decision::allow(DecisionReason::Superuser);
        }
        if viewer.has_permission(&self.override_permission) {
            return Decision::allow(DecisionReason::OverridePermission);
        }

        match self.first_blocked_at(node, now) {
            None => Decision::allow(DecisionReason::Released),
            Some((blocked_by, status)) => {
                debug!(
                    node = ?node.id,
                    viewer = ?viewer.id,
                    blocked_by = ?blocked_by,
                    status = %status,
                    "Release window denied access"
                );
                Decision::blocked(blocked_by, status)
            }
        }
    }

    /// Keep only the nodes the viewer can see, sampling "now" once for the
    /// whole batch.
    pub fn retain_visible<'a, I>(
        &self,
        nodes: I,
        viewer: Option<&Viewer>,
        current: &Viewer,
    ) -> Vec<&'a Node>
    where
        I: IntoIterator<Item = &'a Node>,
    {
        let now = self.now();
        nodes
            .into_iter()
            .filter(|node| self.explain_at(node, viewer, current, now).allowed)
            .collect()
    }
}

fn resolve_viewer<'a>(viewer: Option<&'a Viewer>, current: &'a Viewer) -> &'a Viewer {
    match viewer {
        Some(v) if v.is_valid() => v,
        _ => current,
    }
}
