//! Interest Pattern Table (spec section 4.3): topic -> score in [0,1],
//! with decay and top-K retrieval.

use std::collections::HashMap;

use noetic_common::clamp::clamp01;

use crate::thought::{Thought, ThoughtType};
use crate::topic::TopicExtractor;

/// Mapping topic -> interest score, plus the scalar curiosity level and
/// decay rate that govern it (spec section 3).
pub struct InterestTable {
    scores: HashMap<String, f64>,
    curiosity_level: f64,
    decay_rate: f64,
    min_score: f64,
}

impl InterestTable {
    pub fn new(decay_rate: f64, min_score: f64) -> Self {
        Self {
            scores: HashMap::new(),
            curiosity_level: 0.0,
            decay_rate: clamp01(decay_rate),
            min_score,
        }
    }

    pub fn curiosity_level(&self) -> f64 {
        self.curiosity_level
    }

    pub fn score(&self, topic: &str) -> f64 {
        self.scores.get(topic).copied().unwrap_or(0.0)
    }

    pub fn seed(&mut self, topic: impl Into<String>, score: f64) {
        self.scores.insert(topic.into(), clamp01(score));
    }

    pub fn set_curiosity(&mut self, value: f64) {
        self.curiosity_level = clamp01(value);
    }

    /// `score := clamp(score + delta, 0, 1)`.
    pub fn update(&mut self, topic: &str, delta: f64) {
        let current = self.scores.get(topic).copied().unwrap_or(0.0);
        self.scores.insert(topic.to_string(), clamp01(current + delta));
    }

    /// Multiplicative decay of every topic; entries below `min_score` are
    /// removed.
    pub fn decay(&mut self) {
        let min_score = self.min_score;
        let decay_rate = self.decay_rate;
        self.scores.retain(|_, score| {
            *score *= 1.0 - decay_rate;
            *score >= min_score
        });
    }

    /// `n` topics with the highest score, ties broken lexicographically.
    pub fn top(&self, n: usize) -> Vec<(String, f64)> {
        let mut entries: Vec<(String, f64)> = self
            .scores
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        entries.sort_by(|(ka, va), (kb, vb)| {
            vb.partial_cmp(va)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| ka.cmp(kb))
        });
        entries.truncate(n);
        entries
    }

    /// Extracts topic keys from `t.content` via the pluggable extractor and
    /// updates each by `t.importance * 0.1`; bumps curiosity on Questions.
    pub fn process_thought(&mut self, t: &Thought, extractor: &dyn TopicExtractor) {
        for topic in extractor.extract(&t.content) {
            self.update(&topic, t.importance() * 0.1);
        }
        if t.kind == ThoughtType::Question {
            self.curiosity_level = clamp01(self.curiosity_level + 0.05);
        }
    }
}
