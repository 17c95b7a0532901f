//! The Thought record (spec section 3).
//!
//! Thoughts are created once by the Thought Generation Controller or by an
//! external stimulus, admitted to Working Memory, and never mutated
//! afterward except to grow `associations` during integration. Consumers
//! reference a Thought by id; ownership lives exclusively in Working Memory
//! for the short horizon and in the Memory collaborator for the long one
//! (spec section 9's "arena + index" re-architecture of the source's
//! back-reference graph).

use chrono::{DateTime, Utc};
use noetic_common::clamp::{clamp01, clamp_signed};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The nine thought types the Thought Generation Controller selects among
/// (spec section 4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThoughtType {
    Perception,
    Question,
    Reflection,
    Insight,
    Memory,
    Imagination,
    MetaCognitive,
    Plan,
    Emotional,
}

/// Whether a Thought originated inside the core or from an external
/// stimulus (spec section 6.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThoughtSource {
    Internal,
    External,
}

/// Distinguishes LLM-produced content from a deterministic fallback
/// template, and external-stimulus-derived Thoughts from both. Needed to
/// make R3 (fallback determinism) and B1/B2 (LLM-unavailable boundary
/// scenarios) observable in `status()` subsystem counters without
/// re-deriving origin from `source` plus heuristics — see SPEC_FULL
/// section 3's `[SUPPLEMENT]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThoughtOrigin {
    Generated { fallback: bool },
    External,
}

/// A single unit of cognition. Immutable after construction except for
/// `associations`, which may grow as later Thoughts reference this one
/// during integration (spec section 3: "associations reference only ids
/// that existed at or before the Thought's timestamp").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thought {
    pub id: String,
    pub content: String,
    pub kind: ThoughtType,
    pub source: ThoughtSource,
    pub origin: ThoughtOrigin,
    pub timestamp: DateTime<Utc>,
    importance: f64,
    emotional_valence: f64,
    pub associations: BTreeSet<String>,
}

impl Thought {
    /// Construct a Thought, clamping `importance` into `[0,1]` and
    /// `emotional_valence` into `[-1,1]` per spec section 3's invariants.
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        kind: ThoughtType,
        source: ThoughtSource,
        origin: ThoughtOrigin,
        timestamp: DateTime<Utc>,
        importance: f64,
        emotional_valence: f64,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            kind,
            source,
            origin,
            timestamp,
            importance: clamp01(importance),
            emotional_valence: clamp_signed(emotional_valence),
            associations: BTreeSet::new(),
        }
    }

    pub fn importance(&self) -> f64 {
        self.importance
    }

    pub fn emotional_valence(&self) -> f64 {
        self.emotional_valence
    }

    /// Add a back-reference to another Thought's id. Only ids that existed
    /// at or before `self.timestamp` should be passed here; the caller
    /// (integration machinery) is responsible for that ordering check since
    /// this type has no access to the owning buffer.
    pub fn add_association(&mut self, other_id: impl Into<String>) {
        self.associations.insert(other_id.into());
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, ThoughtOrigin::Generated { fallback: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thought(importance: f64, valence: f64) -> Thought {
        Thought::new(
            "t1",
            "hello world",
            ThoughtType::Insight,
            ThoughtSource::Internal,
            ThoughtOrigin::Generated { fallback: false },
            Utc::now(),
            importance,
            valence,
        )
    }

    #[test]
    fn clamps_importance_and_valence_on_construction() {
        let t = thought(5.0, -5.0);
        assert_eq!(t.importance(), 1.0);
        assert_eq!(t.emotional_valence(), -1.0);
    }

    #[test]
    fn associations_accumulate() {
        let mut t = thought(0.5, 0.0);
        t.add_association("t0");
        t.add_association("t0");
        assert_eq!(t.associations.len(), 1);
    }

    #[test]
    fn fallback_origin_is_reported() {
        let mut t = thought(0.5, 0.0);
        assert!(!t.is_fallback());
        t.origin = ThoughtOrigin::Generated { fallback: true };
        assert!(t.is_fallback());
    }
}
