//! Release Gate: time-windowed visibility for content trees
//!
//! A content node may declare a "not before" and a "not after" instant, each
//! optionally behind an activation toggle. The gate decides whether a viewer
//! can see the node now, taking the windows of every ancestor into account.

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod gate;
pub mod logging;
pub mod node;
pub mod site;
pub mod types;
pub mod window;

pub use clock::{Clock, FixedClock, SystemClock};
pub use crate::config::{GateConfig, GateManager};
pub use error::{AccessError, ConfigError, GateError, SiteError};
pub use gate::{Decision, DecisionReason, ReleaseGate, ReleaseStatus, VisibilityHooks};
pub use node::{AncestorRef, Node, Viewer};
pub use types::{NodeId, Timestamp, ViewerId};
pub use window::{FieldNames, NodeFields, ReleaseWindow, WindowBound};
