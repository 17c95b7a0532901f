//! Importance and emotional-valence scoring for a freshly generated
//! Thought (spec section 4.6).

const POSITIVE_KEYWORDS: &[&str] = &[
    "good", "great", "wonderful", "calm", "clarity", "hope", "joy", "curious", "insight", "progress",
];
const NEGATIVE_KEYWORDS: &[&str] = &[
    "bad", "wrong", "afraid", "confused", "stuck", "worry", "tired", "frustrated", "lost", "doubt",
];

/// Fraction of `top_interests` whose topic appears in `content`
/// (case-insensitive substring), in `[0,1]`.
pub fn interest_match_score(content: &str, top_interests: &[(String, f64)]) -> f64 {
    if top_interests.is_empty() {
        return 0.0;
    }
    let lowered = content.to_lowercase();
    let matches = top_interests.iter().filter(|(topic, _)| lowered.contains(topic.to_lowercase().as_str())).count();
    matches as f64 / top_interests.len() as f64
}

fn keyword_score(content: &str, keywords: &[&str]) -> f64 {
    let lowered = content.to_lowercase();
    keywords.iter().filter(|k| lowered.contains(*k)).count() as f64
}

/// `importance := min(1, 0.5 + match*0.2 + isMetaOrInsight*0.2)`.
pub fn importance(match_score: f64, is_insight_or_meta: bool) -> f64 {
    (0.5 + match_score * 0.2 + if is_insight_or_meta { 0.2 } else { 0.0 }).min(1.0)
}

/// `emotionalValence := tanh(positiveKeywordScore - negativeKeywordScore)`.
pub fn emotional_valence(content: &str) -> f64 {
    let positive = keyword_score(content, POSITIVE_KEYWORDS);
    let negative = keyword_score(content, NEGATIVE_KEYWORDS);
    (positive - negative).tanh()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn importance_is_capped_at_one() {
        assert_eq!(importance(1.0, true), 1.0);
    }

    #[test]
    fn importance_floor_is_one_half() {
        assert_eq!(importance(0.0, false), 0.5);
    }

    #[test]
    fn interest_match_counts_case_insensitive_substrings() {
        let interests = vec![("Wisdom".to_string(), 1.0), ("patience".to_string(), 0.5)];
        let score = interest_match_score("seeking wisdom today", &interests);
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn positive_content_yields_positive_valence() {
        assert!(emotional_valence("what a wonderful insight, full of hope") > 0.0);
    }

    #[test]
    fn negative_content_yields_negative_valence() {
        assert!(emotional_valence("feeling stuck and afraid and confused") < 0.0);
    }

    #[test]
    fn neutral_content_yields_zero_valence() {
        assert_eq!(emotional_valence("the weather today"), 0.0);
    }
}
