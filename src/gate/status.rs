//! Outcome types for release checks and access decisions.

use crate::types::{NodeId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of checking a single node against its own window.
///
/// Only the first failing bound is reported; the start bound is checked
/// before the end bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReleaseStatus {
    Released,
    /// The start bound lies in the future.
    NotYetReleased { starts_at: Timestamp },
    /// The end bound lies in the past.
    Expired { ended_at: Timestamp },
}

impl ReleaseStatus {
    pub fn is_released(&self) -> bool {
        matches!(self, ReleaseStatus::Released)
    }
}

impl fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseStatus::Released => write!(f, "released"),
            ReleaseStatus::NotYetReleased { starts_at } => {
                write!(f, "not yet released (starts {})", starts_at.to_rfc3339())
            }
            ReleaseStatus::Expired { ended_at } => {
                write!(f, "expired (ended {})", ended_at.to_rfc3339())
            }
        }
    }
}

/// Which node in the chain blocked a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", content = "id", rename_all = "snake_case")]
pub enum BlockedBy {
    /// The node being checked.
    Target,
    Ancestor(NodeId),
}

/// Why an access decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DecisionReason {
    Superuser,
    OverridePermission,
    Released,
    Blocked {
        blocked_by: BlockedBy,
        status: ReleaseStatus,
    },
}

/// An access decision together with its reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub allowed: bool,
    pub reason: DecisionReason,
}

impl Decision {
    pub(crate) fn allow(reason: DecisionReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    pub(crate) fn blocked(blocked_by: BlockedBy, status: ReleaseStatus) -> Self {
        Self {
            allowed: false,
            reason: DecisionReason::Blocked { blocked_by, status },
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            DecisionReason::Superuser => write!(f, "allowed: viewer is superuser"),
            DecisionReason::OverridePermission => {
                write!(f, "allowed: viewer holds the override permission")
            }
            DecisionReason::Released => write!(f, "allowed: released"),
            DecisionReason::Blocked {
                blocked_by: BlockedBy::Target,
                status,
            } => write!(f, "denied: page is {}", status),
            DecisionReason::Blocked {
                blocked_by: BlockedBy::Ancestor(id),
                status,
            } => write!(f, "denied: ancestor {} is {}", id, status),
        }
    }
}
