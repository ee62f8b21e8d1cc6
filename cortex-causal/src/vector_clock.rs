//! Vector clocks for causal ordering of events produced by independent
//! agents, used by `delta_sync` to decide what a peer is missing and to
//! detect concurrent (conflicting) updates to the same edge.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A map from agent id to that agent's local event counter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorClock {
    counters: FxHashMap<String, u64>,
}

/// The relation between two vector clocks, per the standard partial order:
/// `a < b` iff every component of `a` is `<=` the matching component of
/// `b` and at least one is strictly less.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockOrdering {
    Equal,
    Before,
    After,
    Concurrent,
}

impl VectorClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, agent_id: &str) -> u64 {
        self.counters.get(agent_id).copied().unwrap_or(0)
    }

    /// Every agent id this clock has a component for. Used by
    /// `delta_sync::can_apply_clock` to check an incoming delta's clock
    /// component-by-component rather than only its origin agent.
    pub fn agents(&self) -> impl Iterator<Item = &String> {
        self.counters.keys()
    }

    /// `(agent_id, counter)` pairs for every component this clock tracks.
    pub fn iter(&self) -> impl Iterator<Item = (&String, u64)> {
        self.counters.iter().map(|(k, &v)| (k, v))
    }

    /// Increment this agent's own counter, returning the new value. Called
    /// once per locally-originated event before it is stamped and stored.
    pub fn increment(&mut self, agent_id: &str) -> u64 {
        let entry = self.counters.entry(agent_id.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Merge in another clock, taking the component-wise maximum. Applied
    /// on receipt of a remote event so the local clock always dominates
    /// everything it has observed.
    pub fn merge(&mut self, other: &VectorClock) {
        for (agent_id, &count) in &other.counters {
            let entry = self.counters.entry(agent_id.clone()).or_insert(0);
            if count > *entry {
                *entry = count;
            }
        }
    }

    /// Compare two clocks under the standard partial order.
    pub fn compare(&self, other: &VectorClock) -> ClockOrdering {
        let mut self_less = false;
        let mut other_less = false;

        let mut agents: Vec<&String> = self.counters.keys().chain(other.counters.keys()).collect();
        agents.sort();
        agents.dedup();

        for agent_id in agents {
            match self.get(agent_id).cmp(&other.get(agent_id)) {
                Ordering::Less => self_less = true,
                Ordering::Greater => other_less = true,
                Ordering::Equal => {}
            }
        }

        match (self_less, other_less) {
            (false, false) => ClockOrdering::Equal,
            (true, false) => ClockOrdering::Before,
            (false, true) => ClockOrdering::After,
            (true, true) => ClockOrdering::Concurrent,
        }
    }

    /// True when `self` happened strictly before `other`.
    pub fn happens_before(&self, other: &VectorClock) -> bool {
        self.compare(other) == ClockOrdering::Before
    }

    /// True when neither clock dominates the other.
    pub fn is_concurrent_with(&self, other: &VectorClock) -> bool {
        self.compare(other) == ClockOrdering::Concurrent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_clock_compares_equal() {
        let a = VectorClock::new();
        let b = VectorClock::new();
        assert_eq!(a.compare(&b), ClockOrdering::Equal);
    }

    #[test]
    fn incrementing_makes_a_after_b() {
        let mut a = VectorClock::new();
        let b = VectorClock::new();
        a.increment("agent-1");
        assert_eq!(a.compare(&b), ClockOrdering::After);
        assert_eq!(b.compare(&a), ClockOrdering::Before);
        assert!(b.happens_before(&a));
    }

    #[test]
    fn independent_increments_are_concurrent() {
        let mut a = VectorClock::new();
        let mut b = VectorClock::new();
        a.increment("agent-1");
        b.increment("agent-2");
        assert!(a.is_concurrent_with(&b));
    }

    #[test]
    fn merge_takes_component_wise_max() {
        let mut a = VectorClock::new();
        let mut b = VectorClock::new();
        a.increment("agent-1");
        a.increment("agent-1");
        b.increment("agent-1");
        b.increment("agent-2");

        a.merge(&b);
        assert_eq!(a.get("agent-1"), 2);
        assert_eq!(a.get("agent-2"), 1);
    }
}
