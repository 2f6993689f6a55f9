//! Host extension points.
//!
//! A host calls these after its own checks. They only ever narrow what the
//! host allows.

use super::ReleaseGate;
use crate::error::AccessError;
use crate::node::{Node, Viewer};
use tracing::debug;

pub trait VisibilityHooks {
    /// Post-filter for the host's "is this node viewable" check.
    fn filter_viewable(
        &self,
        host_viewable: bool,
        node: &Node,
        viewer: Option<&Viewer>,
        current: &Viewer,
    ) -> bool;

    /// Post-filter for the host's "is this node public" check, which decides
    /// whether the node's assets may be served directly.
    fn filter_public(&self, host_public: bool, node: &Node) -> bool;

    /// Gate for serving a protected asset of `node`.
    fn authorize_asset(
        &self,
        node: &Node,
        viewer: Option<&Viewer>,
        current: &Viewer,
    ) -> Result<(), AccessError>;
}

impl VisibilityHooks for ReleaseGate {
    fn filter_viewable(
        &self,
        host_viewable: bool,
        node: &Node,
        viewer: Option<&Viewer>,
        current: &Viewer,
    ) -> bool {
        host_viewable && self.can_user_see(node, viewer, current)
    }

    fn filter_public(&self, host_public: bool, node: &Node) -> bool {
        // A node with a window depends on time and viewer, so it is never
        // publicly servable.
        host_public && !self.is_release_time_set(node)
    }

    fn authorize_asset(
        &self,
        node: &Node,
        viewer: Option<&Viewer>,
        current: &Viewer,
    ) -> Result<(), AccessError> {
        if self.can_user_see(node, viewer, current) {
            Ok(())
        } else {
            debug!(node = ?node.id, "Refusing protected asset");
            Err(AccessError::NotFound)
        }
    }
}
