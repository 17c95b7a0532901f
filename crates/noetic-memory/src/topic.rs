//! Pluggable, side-effect-free topic extraction (spec section 4.3 and the
//! open question in spec section 9: "the source uses trivial stubs; the
//! target should treat the extractor as a pluggable, pure function").

/// Extracts topic keys from Thought content. Implementations must be pure:
/// same input, same output, no I/O.
pub trait TopicExtractor: Send + Sync {
    fn extract(&self, content: &str) -> Vec<String>;
}

/// The trivial extractor the core must tolerate (spec section 4.3): it
/// never produces topics, so Interest Table updates from it are no-ops.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyTopicExtractor;

impl TopicExtractor for EmptyTopicExtractor {
    fn extract(&self, _content: &str) -> Vec<String> {
        Vec::new()
    }
}

/// A minimal default extractor: lower-cased content words of at least 5
/// characters, deduplicated, stripped of common punctuation. This is the
/// same "content word >= 5 chars" rule spec section 4.6 uses for
/// association matching, reused here for topic keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTopicExtractor;

impl TopicExtractor for WordTopicExtractor {
    fn extract(&self, content: &str) -> Vec<String> {
        let mut seen = std::collections::BTreeSet::new();
        for raw in content.split_whitespace() {
            let word: String = raw
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            if word.chars().count() >= 5 {
                seen.insert(word);
            }
        }
        seen.into_iter().collect()
    }
}
