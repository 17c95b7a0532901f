//! Deterministic fallback templates (spec section 4.6): used whenever the
//! Thought Producer fails. Byte-identical across runs given the same
//! `(type, state, interests)`, satisfying R3.

use noetic_memory::ThoughtType;

/// Picks a template for `kind`, filling in the top interest (if any) and
/// rounding `focus_depth` to two decimals so float formatting stays
/// stable across platforms.
pub fn fallback_text(kind: ThoughtType, top_interest: Option<&str>, focus_depth: f64) -> String {
    let interest = top_interest.unwrap_or("the present moment");
    let focus = format!("{:.2}", focus_depth);

    match kind {
        ThoughtType::Perception => format!("Noticing {interest} at focus depth {focus}."),
        ThoughtType::Question => format!("What more is there to understand about {interest}?"),
        ThoughtType::Reflection => format!("Sitting with {interest} for a moment."),
        ThoughtType::Insight => format!("A pattern around {interest} is coming into focus."),
        ThoughtType::Memory => format!("Recalling something related to {interest}."),
        ThoughtType::Imagination => format!("Picturing how {interest} might unfold."),
        ThoughtType::MetaCognitive => format!("Noticing my own attention to {interest}."),
        ThoughtType::Plan => format!("Considering a next step involving {interest}."),
        ThoughtType::Emotional => format!("Feeling something in response to {interest}."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_produce_byte_identical_output() {
        let a = fallback_text(ThoughtType::Insight, Some("wisdom"), 0.333333);
        let b = fallback_text(ThoughtType::Insight, Some("wisdom"), 0.333333);
        assert_eq!(a, b);
    }

    #[test]
    fn missing_interest_uses_a_stable_default_phrase() {
        let text = fallback_text(ThoughtType::Reflection, None, 0.5);
        assert!(text.contains("the present moment"));
    }

    #[test]
    fn every_type_produces_non_empty_distinct_text() {
        let kinds = [
            ThoughtType::Perception,
            ThoughtType::Question,
            ThoughtType::Reflection,
            ThoughtType::Insight,
            ThoughtType::Memory,
            ThoughtType::Imagination,
            ThoughtType::MetaCognitive,
            ThoughtType::Plan,
            ThoughtType::Emotional,
        ];
        let texts: Vec<String> = kinds.iter().map(|k| fallback_text(*k, Some("x"), 0.0)).collect();
        let unique: std::collections::HashSet<_> = texts.iter().collect();
        assert_eq!(unique.len(), texts.len());
    }
}
