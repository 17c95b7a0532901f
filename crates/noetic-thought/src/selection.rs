//! Thought-type selection policy (spec section 4.6): an ordered cascade of
//! cognitive-state thresholds, falling back to a weighted random choice.

use noetic_memory::ThoughtType;
use rand::Rng;

/// The five candidates and weights of the policy's final fallback branch,
/// in the order the spec lists them.
const WEIGHTED_FALLBACK: [(ThoughtType, f64); 5] = [
    (ThoughtType::Reflection, 0.3),
    (ThoughtType::Question, 0.2),
    (ThoughtType::Insight, 0.2),
    (ThoughtType::Memory, 0.15),
    (ThoughtType::Imagination, 0.15),
];

pub struct SelectionInputs {
    pub clarity: f64,
    pub openness: f64,
    pub load: f64,
    pub past_weight: f64,
    pub future_weight: f64,
    pub fatigue: f64,
}

/// Deterministic branches first, weighted-random draw last. `rng` is
/// injected so tests and fallback-determinism checks can supply a fixed
/// generator; production callers pass `rand::thread_rng()`.
pub fn select_thought_type(inputs: &SelectionInputs, rng: &mut impl Rng) -> ThoughtType {
    if inputs.clarity > 0.7 && inputs.openness > 0.7 {
        return ThoughtType::Insight;
    }
    if inputs.openness > 0.6 && inputs.load < 0.4 {
        return ThoughtType::Question;
    }
    if inputs.past_weight > 0.5 {
        return ThoughtType::Memory;
    }
    if inputs.future_weight > 0.5 {
        return ThoughtType::Imagination;
    }
    if inputs.fatigue > 0.6 {
        return ThoughtType::Reflection;
    }

    weighted_choice(rng)
}

fn weighted_choice(rng: &mut impl Rng) -> ThoughtType {
    let total: f64 = WEIGHTED_FALLBACK.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0.0..total);
    for (kind, weight) in WEIGHTED_FALLBACK {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    WEIGHTED_FALLBACK[0].0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn neutral() -> SelectionInputs {
        SelectionInputs {
            clarity: 0.5,
            openness: 0.3,
            load: 0.5,
            past_weight: 0.3,
            future_weight: 0.3,
            fatigue: 0.3,
        }
    }

    #[test]
    fn high_clarity_and_openness_selects_insight() {
        let mut rng = StdRng::seed_from_u64(1);
        let inputs = SelectionInputs { clarity: 0.8, openness: 0.8, ..neutral() };
        assert_eq!(select_thought_type(&inputs, &mut rng), ThoughtType::Insight);
    }

    #[test]
    fn openness_with_low_load_selects_question() {
        let mut rng = StdRng::seed_from_u64(1);
        let inputs = SelectionInputs { openness: 0.7, load: 0.3, ..neutral() };
        assert_eq!(select_thought_type(&inputs, &mut rng), ThoughtType::Question);
    }

    #[test]
    fn past_weight_dominance_selects_memory() {
        let mut rng = StdRng::seed_from_u64(1);
        let inputs = SelectionInputs { past_weight: 0.6, ..neutral() };
        assert_eq!(select_thought_type(&inputs, &mut rng), ThoughtType::Memory);
    }

    #[test]
    fn future_weight_dominance_selects_imagination() {
        let mut rng = StdRng::seed_from_u64(1);
        let inputs = SelectionInputs { future_weight: 0.6, ..neutral() };
        assert_eq!(select_thought_type(&inputs, &mut rng), ThoughtType::Imagination);
    }

    #[test]
    fn high_fatigue_selects_reflection() {
        let mut rng = StdRng::seed_from_u64(1);
        let inputs = SelectionInputs { fatigue: 0.7, ..neutral() };
        assert_eq!(select_thought_type(&inputs, &mut rng), ThoughtType::Reflection);
    }

    #[test]
    fn neutral_state_falls_back_to_weighted_choice() {
        let mut rng = StdRng::seed_from_u64(42);
        let kind = select_thought_type(&neutral(), &mut rng);
        assert!(WEIGHTED_FALLBACK.iter().any(|(k, _)| *k == kind));
    }
}
