//! Convergence of `CausalDeliveryManager` across out-of-order, multi-origin
//! delivery: applying the same set of causally-related events in any order
//! that respects causality must leave the receiver's clock identical, and
//! no event may be delivered before a predecessor it depends on — from any
//! origin, not just its own.

use cortex_causal::delta_sync::{CausalDeliveryManager, StampedEvent};
use cortex_causal::VectorClock;

fn stamped(origin: &str, clock: VectorClock) -> StampedEvent {
    StampedEvent { origin_agent: origin.to_string(), payload: serde_json::Value::Null, clock }
}

/// Three events: two from `agent-a` and one from `agent-b` that causally
/// depends on having already seen both of `agent-a`'s events (its clock
/// carries `{a: 2, b: 1}`). Feeding them in every order that keeps each
/// origin's own events in sequence must converge to the same final clock,
/// and the cross-origin event must never apply before `a`'s second event.
fn causal_trio() -> Vec<StampedEvent> {
    let mut a1 = VectorClock::new();
    a1.increment("agent-a");

    let mut a2 = a1.clone();
    a2.increment("agent-a");

    let mut b1 = a2.clone();
    b1.increment("agent-b");

    vec![stamped("agent-a", a1), stamped("agent-a", a2), stamped("agent-b", b1)]
}

#[test]
fn convergence_holds_regardless_of_arrival_order() {
    let orders: Vec<Vec<usize>> = vec![vec![0, 1, 2], vec![2, 1, 0], vec![1, 2, 0], vec![0, 2, 1]];

    let mut final_clocks = Vec::new();
    for order in &orders {
        let events = causal_trio();
        let mut manager = CausalDeliveryManager::new("receiver");
        for &idx in order {
            manager.buffer_event(events[idx].clone());
            manager.drain_applicable();
        }
        let result = manager.drain_applicable();
        assert_eq!(result.still_buffered, 0, "order {order:?} left events stuck: {result:?}");
        final_clocks.push(manager.clock().clone());
    }

    for pair in final_clocks.windows(2) {
        assert_eq!(pair[0], pair[1], "delivery order changed the converged clock");
    }
}

#[test]
fn cross_origin_event_is_buffered_until_its_dependencies_from_other_agents_arrive() {
    let events = causal_trio();
    let mut manager = CausalDeliveryManager::new("receiver");

    // Deliver agent-b's event first: it depends on two agent-a events that
    // haven't arrived yet, so it must not apply.
    let applied = manager.buffer_event(events[2].clone());
    assert!(!applied);
    assert_eq!(manager.clock().get("agent-b"), 0);

    // Only agent-a's first event arrives: it applies immediately, but b1
    // is still missing a2 so it must stay buffered.
    let applied_a1 = manager.buffer_event(events[0].clone());
    assert!(applied_a1);
    let result = manager.drain_applicable();
    assert_eq!(result.applied, 0);
    assert_eq!(result.still_buffered, 1, "b1 must wait on agent-a's second event too");

    // Now a2 arrives, unblocking b1.
    let applied_a2 = manager.buffer_event(events[1].clone());
    assert!(applied_a2);
    let result = manager.drain_applicable();
    assert_eq!(result.applied, 1, "b1 should drain once a2 lands");
    assert_eq!(result.still_buffered, 0);
    assert_eq!(manager.clock().get("agent-a"), 2);
    assert_eq!(manager.clock().get("agent-b"), 1);
}
