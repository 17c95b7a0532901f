//! Association matching (spec section 4.6): up to 3 Working Memory ids
//! sharing at least one content word of 5+ characters with a new Thought.

use std::collections::BTreeSet;

use noetic_memory::Thought;

const MIN_WORD_LEN: usize = 5;
const MAX_ASSOCIATIONS: usize = 3;

fn significant_words(content: &str) -> BTreeSet<String> {
    content
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| w.chars().count() >= MIN_WORD_LEN)
        .collect()
}

/// Scans `resident` (most recent first) for up to 3 ids sharing a
/// significant word with `content`.
pub fn find_associations(content: &str, resident: &[Thought]) -> BTreeSet<String> {
    let words = significant_words(content);
    if words.is_empty() {
        return BTreeSet::new();
    }

    resident
        .iter()
        .rev()
        .filter(|t| !significant_words(&t.content).is_disjoint(&words))
        .map(|t| t.id.clone())
        .take(MAX_ASSOCIATIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use noetic_memory::{ThoughtOrigin, ThoughtSource, ThoughtType};

    fn thought(id: &str, content: &str) -> Thought {
        Thought::new(
            id,
            content,
            ThoughtType::Reflection,
            ThoughtSource::Internal,
            ThoughtOrigin::Generated { fallback: true },
            Utc::now(),
            0.5,
            0.0,
        )
    }

    #[test]
    fn matches_on_shared_long_word() {
        let resident = vec![thought("a", "thinking about wisdom and patience")];
        let assoc = find_associations("wisdom keeps returning", &resident);
        assert!(assoc.contains("a"));
    }

    #[test]
    fn short_words_do_not_count() {
        let resident = vec![thought("a", "a cat sat")];
        let assoc = find_associations("a cat ran", &resident);
        assert!(assoc.is_empty());
    }

    #[test]
    fn caps_at_three_associations() {
        let resident: Vec<Thought> = (0..5).map(|i| thought(&format!("t{i}"), "wisdom patience clarity")).collect();
        let assoc = find_associations("wisdom returns again", &resident);
        assert_eq!(assoc.len(), 3);
    }
}
