//! Coherence Synthesis, step 4 of each cycle (spec section 4.9.1).

use std::collections::BTreeMap;

use noetic_common::clamp::clamp01;
use noetic_engines::CoherenceStreamOutputs;

#[derive(Debug, Clone)]
pub struct CoherenceSynthesis {
    pub salience_landscape: BTreeMap<String, f64>,
    pub coherence_score: f64,
    pub triadic_coherence: f64,
}

/// `coherenceScore` used as an input to d3 is the previous cycle's output
/// coherence score (the formula is self-referential across cycles); pass
/// `0.5` for a cold start, matching `SharedCognitiveState`'s default.
pub fn synthesize_coherence(inputs: &CoherenceStreamOutputs, previous_coherence_score: f64) -> CoherenceSynthesis {
    let n_topics = inputs.salience.len();

    let d1 = if n_topics == 0 {
        0.0
    } else {
        let sum: f64 = inputs
            .salience
            .values()
            .zip(inputs.pattern_strength.values())
            .map(|(s, p)| s * p)
            .sum();
        sum / n_topics as f64
    };

    let d2 = clamp01(1.0 - inputs.contradiction_severity * inputs.pattern_involvement);
    let d3 = clamp01(previous_coherence_score * (1.0 - 0.5 * inputs.urgency_level));

    let triadic_coherence = (d1 * d2 * d3).max(0.0).cbrt();

    let salience_landscape = inputs
        .salience
        .iter()
        .map(|(topic, salience)| {
            let pattern_sum: f64 = inputs
                .pattern_descriptions
                .iter()
                .filter(|(_, desc)| desc.contains(topic.as_str()))
                .filter_map(|(pattern_id, _)| inputs.pattern_strength.get(pattern_id))
                .sum();
            (topic.clone(), (salience + 0.2 * pattern_sum).min(1.0))
        })
        .collect();

    let coherence_score = clamp01(inputs.consistency_score * triadic_coherence);

    CoherenceSynthesis {
        salience_landscape,
        coherence_score,
        triadic_coherence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_yield_zero_coherence() {
        let inputs = CoherenceStreamOutputs::default();
        let out = synthesize_coherence(&inputs, 0.5);
        assert_eq!(out.triadic_coherence, 0.0);
        assert_eq!(out.coherence_score, 0.0);
    }

    #[test]
    fn perfectly_aligned_stream_yields_full_coherence() {
        let mut inputs = CoherenceStreamOutputs::default();
        inputs.salience.insert("alpha".into(), 1.0);
        inputs.pattern_strength.insert("alpha".into(), 1.0);
        inputs.consistency_score = 1.0;
        inputs.contradiction_severity = 0.0;
        inputs.pattern_involvement = 0.0;
        inputs.urgency_level = 0.0;

        let out = synthesize_coherence(&inputs, 1.0);
        assert!((out.triadic_coherence - 1.0).abs() < 1e-9);
        assert!((out.coherence_score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn salience_landscape_boosts_from_matching_pattern_descriptions() {
        let mut inputs = CoherenceStreamOutputs::default();
        inputs.salience.insert("recall:1".into(), 0.4);
        inputs.pattern_strength.insert("pattern-0".into(), 0.5);
        inputs.pattern_descriptions.insert("pattern-0".into(), "context mentions recall:1 directly".into());

        let out = synthesize_coherence(&inputs, 0.5);
        let boosted = out.salience_landscape.get("recall:1").copied().unwrap();
        assert!((boosted - 0.5).abs() < 1e-9);
    }
}
