//! The delta sync protocol: three message kinds (`Request`/`Response`/`Ack`)
//! that let two agents reconcile their causal graphs, plus a delivery
//! buffer that holds a remote event until everything it causally depends
//! on has already been applied locally.
//!
//! Convergence (applying the same causally-ordered deltas in any
//! causally-consistent order yields the same projection) follows from
//! [`CausalDeliveryManager`] never applying an event out of order — it
//! buffers instead.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::vector_clock::VectorClock;

/// One event as it travels the wire: a JSON payload, the agent that
/// produced it, and the sender's vector clock at the moment of production.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampedEvent {
    pub origin_agent: String,
    pub payload: Value,
    pub clock: VectorClock,
}

/// The three steps of one sync round, mirroring a classic anti-entropy
/// exchange: the initiator states what it already has, the peer answers
/// with what it's missing, and the initiator acknowledges receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaMessageKind {
    /// "Here is my clock — send me anything I haven't seen."
    Request,
    /// "Here are the events your clock says you're missing."
    Response,
    /// "Received and applied up through this clock."
    Ack,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeltaMessage {
    pub kind: DeltaMessageKind,
    pub from_agent: String,
    pub to_agent: String,
    pub clock: VectorClock,
    pub events: Vec<StampedEvent>,
}

impl DeltaMessage {
    pub fn request(from_agent: impl Into<String>, to_agent: impl Into<String>, clock: VectorClock) -> Self {
        Self { kind: DeltaMessageKind::Request, from_agent: from_agent.into(), to_agent: to_agent.into(), clock, events: vec![] }
    }

    pub fn response(
        from_agent: impl Into<String>,
        to_agent: impl Into<String>,
        clock: VectorClock,
        events: Vec<StampedEvent>,
    ) -> Self {
        Self { kind: DeltaMessageKind::Response, from_agent: from_agent.into(), to_agent: to_agent.into(), clock, events }
    }

    pub fn ack(from_agent: impl Into<String>, to_agent: impl Into<String>, clock: VectorClock) -> Self {
        Self { kind: DeltaMessageKind::Ack, from_agent: from_agent.into(), to_agent: to_agent.into(), clock, events: vec![] }
    }
}

/// Outcome of draining a `CausalDeliveryManager` after a `Response` arrives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncResult {
    pub applied: usize,
    pub still_buffered: usize,
}

/// Holds events that arrived before their causal predecessors did, and
/// releases them in the order a plain vector-clock comparison makes safe.
pub struct CausalDeliveryManager {
    agent_id: String,
    clock: VectorClock,
    buffer: VecDeque<StampedEvent>,
}

impl CausalDeliveryManager {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self { agent_id: agent_id.into(), clock: VectorClock::new(), buffer: VecDeque::new() }
    }

    pub fn clock(&self) -> &VectorClock {
        &self.clock
    }

    /// An event stamped with `clock` is deliverable now iff the origin
    /// agent's component is exactly one ahead of what we've seen from them,
    /// and every other component of the event's clock is already covered by
    /// our local clock — i.e. this is precisely the next event that agent
    /// produced, and nothing any agent causally before it depended on is
    /// still missing.
    pub fn can_apply_clock(&self, event: &StampedEvent) -> bool {
        let origin = &event.origin_agent;
        if event.clock.get(origin) != self.clock.get(origin) + 1 {
            return false;
        }
        for agent in event.clock.agents() {
            if agent == origin {
                continue;
            }
            if event.clock.get(agent) > self.clock.get(agent) {
                return false;
            }
        }
        true
    }

    /// Record an event, applying it immediately if its dependencies are
    /// already satisfied, or holding it in the buffer otherwise. Returns
    /// `true` if applied now.
    pub fn buffer_event(&mut self, event: StampedEvent) -> bool {
        if self.can_apply_clock(&event) {
            self.apply(event);
            true
        } else {
            self.buffer.push_back(event);
            false
        }
    }

    /// Repeatedly scan the buffer applying anything now deliverable, until
    /// a full pass makes no progress.
    pub fn drain_applicable(&mut self) -> SyncResult {
        let mut applied = 0;
        loop {
            let ready_idx = self.buffer.iter().position(|e| self.can_apply_clock(e));
            match ready_idx {
                Some(idx) => {
                    let event = self.buffer.remove(idx).expect("index from position() is valid");
                    self.apply(event);
                    applied += 1;
                }
                None => break,
            }
        }
        SyncResult { applied, still_buffered: self.buffer.len() }
    }

    fn apply(&mut self, event: StampedEvent) {
        self.clock.merge(&event.clock);
        let _ = event;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamped(origin: &str, clock: VectorClock) -> StampedEvent {
        StampedEvent { origin_agent: origin.to_string(), payload: Value::Null, clock }
    }

    #[test]
    fn next_event_from_known_agent_is_deliverable() {
        let manager = CausalDeliveryManager::new("local");
        let mut clock = VectorClock::new();
        clock.increment("remote");
        assert!(manager.can_apply_clock(&stamped("remote", clock)));
    }

    #[test]
    fn skipped_event_is_buffered_not_applied() {
        let mut manager = CausalDeliveryManager::new("local");
        let mut clock = VectorClock::new();
        clock.increment("remote");
        clock.increment("remote");
        let applied = manager.buffer_event(stamped("remote", clock));
        assert!(!applied);
    }

    #[test]
    fn buffered_event_drains_once_predecessor_arrives() {
        let mut manager = CausalDeliveryManager::new("local");

        let mut second_clock = VectorClock::new();
        second_clock.increment("remote");
        second_clock.increment("remote");
        manager.buffer_event(stamped("remote", second_clock));

        let mut first_clock = VectorClock::new();
        first_clock.increment("remote");
        manager.buffer_event(stamped("remote", first_clock));

        let result = manager.drain_applicable();
        assert_eq!(result.applied, 1);
        assert_eq!(result.still_buffered, 0);
    }

    #[test]
    fn event_missing_non_origin_predecessors_is_buffered() {
        let manager = CausalDeliveryManager::new("local");
        let mut clock = VectorClock::new();
        clock.increment("remote-a");
        for _ in 0..5 {
            clock.increment("remote-b");
        }
        assert!(!manager.can_apply_clock(&stamped("remote-a", clock)));
    }

    #[test]
    fn event_is_deliverable_once_other_origins_catch_up() {
        let mut manager = CausalDeliveryManager::new("local");

        let mut from_b = VectorClock::new();
        for _ in 0..5 {
            from_b.increment("remote-b");
        }
        assert!(manager.buffer_event(stamped("remote-b", from_b)));

        let mut from_a = VectorClock::new();
        from_a.increment("remote-a");
        for _ in 0..5 {
            from_a.increment("remote-b");
        }
        assert!(manager.can_apply_clock(&stamped("remote-a", from_a)));
    }

    #[test]
    fn request_response_ack_round_trip_shapes() {
        let req = DeltaMessage::request("a", "b", VectorClock::new());
        assert_eq!(req.kind, DeltaMessageKind::Request);
        let resp = DeltaMessage::response("b", "a", VectorClock::new(), vec![]);
        assert_eq!(resp.kind, DeltaMessageKind::Response);
        let ack = DeltaMessage::ack("a", "b", VectorClock::new());
        assert_eq!(ack.kind, DeltaMessageKind::Ack);
    }
}
