//! End-to-end release decisions for the documented scenarios.

use super::test_utils::fixed_gate;
use chrono::{Duration, TimeZone, Utc};
use release_gate::gate::BlockedBy;
use release_gate::{
    AncestorRef, DecisionReason, Node, NodeId, ReleaseStatus, ReleaseWindow, Timestamp, Viewer,
    ViewerId, WindowBound,
};

fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 3, 15, 9, 30, 0).unwrap()
}

fn guest() -> Viewer {
    Viewer::new(ViewerId(40))
}

fn active(at: Timestamp) -> WindowBound {
    WindowBound::Toggled {
        active: true,
        at: Some(at),
    }
}

#[test]
fn test_scheduled_start_hides_from_regular_viewers_only() {
    let gate = fixed_gate(now());
    let node = Node::new(
        NodeId(10),
        ReleaseWindow::new(active(now() + Duration::hours(1)), WindowBound::Unset),
    );

    assert!(!gate.is_released_single(&node));
    assert!(gate.can_user_see(&node, Some(&Viewer::superuser(ViewerId(41))), &guest()));
    assert!(!gate.can_user_see(&node, Some(&guest()), &guest()));
}

#[test]
fn test_expired_end_without_start_field() {
    let gate = fixed_gate(now());
    let node = Node::new(
        NodeId(11),
        ReleaseWindow::new(WindowBound::Unset, active(now() - Duration::hours(1))),
    );

    assert!(!gate.is_released_single(&node));
    assert!(gate.is_release_time_set(&node));
}

#[test]
fn test_declared_but_inactive_bounds_are_not_enforced() {
    let gate = fixed_gate(now());
    let window = ReleaseWindow::new(
        WindowBound::Toggled {
            active: false,
            at: Some(now() + Duration::days(30)),
        },
        WindowBound::Toggled {
            active: false,
            at: Some(now() - Duration::days(30)),
        },
    );
    let node = Node::new(NodeId(12), window);

    assert!(gate.is_released_single(&node));
    assert!(!gate.is_release_time_set(&node));
}

#[test]
fn test_failing_ancestor_hides_released_node() {
    let gate = fixed_gate(now());
    let expired = active(now() - Duration::days(2));
    let failing_parent = ReleaseWindow::new(WindowBound::Unset, expired);
    let node = Node::new(NodeId(30), ReleaseWindow::open()).with_ancestors(vec![
        AncestorRef::persisted(NodeId(1), ReleaseWindow::open()),
        AncestorRef::Unresolved,
        AncestorRef::persisted(NodeId(20), failing_parent),
    ]);

    assert!(gate.is_released_single(&node));
    assert!(!gate.is_released(&node));

    let decision = gate.explain(&node, None, &guest());
    assert!(!decision.allowed);
    match decision.reason {
        DecisionReason::Blocked { blocked_by, status } => {
            assert_eq!(blocked_by, BlockedBy::Ancestor(NodeId(20)));
            assert!(matches!(status, ReleaseStatus::Expired { .. }));
        }
        other => panic!("unexpected reason {:?}", other),
    }
}

#[test]
fn test_node_and_all_ancestors_inside_window() {
    let gate = fixed_gate(now());
    let window = ReleaseWindow::new(
        active(now() - Duration::days(1)),
        active(now() + Duration::days(1)),
    );
    let node = Node::new(NodeId(30), window)
        .with_ancestors(vec![AncestorRef::persisted(NodeId(20), window)]);

    assert!(gate.is_released(&node));
    assert!(gate.is_release_time_set(&node));
    assert!(gate.can_user_see(&node, None, &guest()));
}

#[test]
fn test_release_status_reports_start_before_end() {
    let gate = fixed_gate(now());
    let starts_at = now() + Duration::minutes(10);
    let node = Node::new(
        NodeId(40),
        ReleaseWindow::new(active(starts_at), active(now() - Duration::minutes(10))),
    );
    assert_eq!(
        gate.release_status(&node),
        ReleaseStatus::NotYetReleased { starts_at }
    );
}

#[test]
fn test_explicit_instant_variants_ignore_clock() {
    let gate = fixed_gate(now());
    let node = Node::new(
        NodeId(50),
        ReleaseWindow::new(active(now() + Duration::days(1)), WindowBound::Unset),
    );
    assert!(!gate.is_released_at(&node, now()));
    assert!(gate.is_released_at(&node, now() + Duration::days(2)));
    assert!(gate.is_released_single_at(&node, now() + Duration::days(1)));
}
