//! Property-based tests for release decisions

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use release_gate::{
    AncestorRef, FixedClock, Node, NodeId, ReleaseGate, ReleaseWindow, Timestamp, Viewer,
    ViewerId, WindowBound,
};
use std::sync::Arc;

fn base() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

fn instant() -> impl Strategy<Value = Timestamp> {
    (-1_000_000i64..1_000_000).prop_map(|secs| base() + Duration::seconds(secs))
}

fn bound() -> impl Strategy<Value = WindowBound> {
    prop_oneof![
        Just(WindowBound::Unset),
        proptest::option::of(instant()).prop_map(|at| WindowBound::Unconditional { at }),
        (any::<bool>(), proptest::option::of(instant()))
            .prop_map(|(active, at)| WindowBound::Toggled { active, at }),
    ]
}

fn window() -> impl Strategy<Value = ReleaseWindow> {
    (bound(), bound()).prop_map(|(start, end)| ReleaseWindow::new(start, end))
}

fn ancestor() -> impl Strategy<Value = AncestorRef> {
    prop_oneof![
        1 => Just(AncestorRef::Unresolved),
        4 => (1u64..1000, window()).prop_map(|(id, w)| AncestorRef::persisted(NodeId(id), w)),
    ]
}

fn gate_at(now: Timestamp) -> ReleaseGate {
    ReleaseGate::default().with_clock(Arc::new(FixedClock(now)))
}

proptest! {
    #[test]
    fn no_bounds_always_released(now in instant()) {
        let node = Node::new(NodeId(1), ReleaseWindow::open());
        prop_assert!(gate_at(now).is_released_single(&node));
    }

    #[test]
    fn future_active_start_wins_over_any_end(
        now in instant(),
        ahead in 1i64..100_000,
        end in bound(),
    ) {
        let start = WindowBound::Toggled { active: true, at: Some(now + Duration::seconds(ahead)) };
        let node = Node::new(NodeId(1), ReleaseWindow::new(start, end));
        prop_assert!(!gate_at(now).is_released_single(&node));
    }

    #[test]
    fn inactive_bounds_never_matter(
        now in instant(),
        s in proptest::option::of(instant()),
        e in proptest::option::of(instant()),
    ) {
        let window = ReleaseWindow::new(
            WindowBound::Toggled { active: false, at: s },
            WindowBound::Toggled { active: false, at: e },
        );
        let node = Node::new(NodeId(1), window);
        let gate = gate_at(now);
        prop_assert!(gate.is_released_single(&node));
        prop_assert!(!gate.is_release_time_set(&node));
    }

    #[test]
    fn released_is_conjunction_over_chain(
        now in instant(),
        own in window(),
        chain in proptest::collection::vec(ancestor(), 0..6),
    ) {
        let gate = gate_at(now);
        let node = Node::new(NodeId(0), own).with_ancestors(chain.clone());
        let expected = gate.window_status(&own, now).is_released()
            && chain.iter().all(|a| match a {
                AncestorRef::Persisted { window, .. } => {
                    gate.window_status(window, now).is_released()
                }
                AncestorRef::Unresolved => true,
            });
        prop_assert_eq!(gate.is_released(&node), expected);
    }

    #[test]
    fn ancestor_order_does_not_matter(
        now in instant(),
        own in window(),
        chain in proptest::collection::vec(ancestor(), 0..6),
    ) {
        let gate = gate_at(now);
        let mut reversed = chain.clone();
        reversed.reverse();
        let forward = Node::new(NodeId(0), own).with_ancestors(chain);
        let backward = Node::new(NodeId(0), own).with_ancestors(reversed);
        prop_assert_eq!(gate.is_released(&forward), gate.is_released(&backward));
    }

    #[test]
    fn privileged_viewers_always_see(
        now in instant(),
        own in window(),
        chain in proptest::collection::vec(ancestor(), 0..4),
    ) {
        let gate = gate_at(now);
        let node = Node::new(NodeId(0), own).with_ancestors(chain);
        let guest = Viewer::new(ViewerId(40));
        let admin = Viewer::superuser(ViewerId(41));
        let editor = Viewer::new(ViewerId(9))
            .with_permission(gate.override_permission().to_string());
        prop_assert!(gate.can_user_see(&node, Some(&admin), &guest));
        prop_assert!(gate.can_user_see(&node, Some(&editor), &guest));
        prop_assert_eq!(gate.can_user_see(&node, Some(&guest), &guest), gate.is_released(&node));
    }

    #[test]
    fn release_time_set_is_time_independent(a in instant(), b in instant(), own in window()) {
        let node = Node::new(NodeId(0), own);
        prop_assert_eq!(
            gate_at(a).is_release_time_set(&node),
            gate_at(b).is_release_time_set(&node)
        );
    }

    #[test]
    fn release_time_set_iff_time_dependent(own in window()) {
        // Far past and far future: an enforced bound blocks at one of them.
        let past = DateTime::<Utc>::UNIX_EPOCH - Duration::days(1);
        let future = base() + Duration::days(36_500);
        let node = Node::new(NodeId(0), own);
        let gate = gate_at(base());
        let depends = !gate.is_released_single_at(&node, past)
            || !gate.is_released_single_at(&node, future);
        prop_assert_eq!(gate.is_release_time_set(&node), depends);
    }
}
