//! Full Tetrahedral Integration, invoked at cycle close (spec section
//! 4.9.3). The four streams (past/Coherence, present/attention,
//! future/Salience, apex/Memory) form a tetrahedron: six edges, four
//! faces, four vertex weights. Face names are this crate's own choice —
//! the spec names only the three faces `actionConfidence` weights
//! (`aspirationFace`, `groundingFace`, `learningFace`); the fourth
//! (excluding the present vertex) is named `visionFace` here for
//! symmetry and folded into `overallCoherence` only.

use noetic_common::clamp::clamp01;
use noetic_engines::SalienceStreamOutputs;

use crate::coherence::CoherenceSynthesis;
use crate::memory::MemorySynthesis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyRecommendation {
    RestRecommended,
    LightActivity,
    FullEngagement,
}

impl EnergyRecommendation {
    pub fn rest_indicator(self) -> f64 {
        match self {
            EnergyRecommendation::RestRecommended => 0.7,
            EnergyRecommendation::LightActivity => 0.4,
            EnergyRecommendation::FullEngagement => 0.1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WisdomDelta {
    pub knowledge_depth: f64,
    pub reasoning_quality: f64,
    pub insight_frequency: f64,
    pub behavioral_coherence: f64,
}

#[derive(Debug, Clone)]
pub struct FullIntegration {
    pub unified_attention: String,
    pub unified_intention: String,
    pub action_confidence: f64,
    pub overall_coherence: f64,
    pub energy_recommendation: EnergyRecommendation,
    pub rest_indicator: f64,
    pub wisdom_delta: WisdomDelta,
}

/// Everything Full Tetrahedral Integration needs beyond the Coherence and
/// Memory synthesis outputs: the raw Salience-stream outputs, plus the
/// present-moment and candidate-action context it arbitrates between.
pub struct FullIntegrationInputs<'a> {
    pub coherence: &'a CoherenceSynthesis,
    pub memory: &'a MemorySynthesis,
    pub salience: &'a SalienceStreamOutputs,
    pub current_attention_focus: Option<&'a str>,
}

pub fn synthesize_full(inputs: FullIntegrationInputs<'_>) -> FullIntegration {
    let FullIntegrationInputs {
        coherence,
        memory,
        salience,
        current_attention_focus,
    } = inputs;

    let past_present = clamp01(salience.knowledge_confidence * coherence.coherence_score);
    let present_future = clamp01(salience.attention_confidence * salience.simulation_confidence);
    let past_future = clamp01(salience.integration_health * salience.top_possibility_success);
    let past_apex = clamp01(memory.memory_efficiency * (salience.consolidation_insights.len() as f64 / 5.0).min(1.0));
    let present_apex = clamp01(coherence.coherence_score * (1.0 - (salience.coherence_issues.len() as f64 / 5.0).min(1.0)));
    let novelty_mean = if salience.novelty_scores.is_empty() {
        0.0
    } else {
        salience.novelty_scores.iter().sum::<f64>() / salience.novelty_scores.len() as f64
    };
    let future_apex = clamp01(novelty_mean * salience.top_possibility_goal_alignment);

    let aspiration_face = mean3(present_future, present_apex, future_apex);
    let vision_face = mean3(past_future, past_apex, future_apex);
    let grounding_face = mean3(past_present, past_apex, present_apex);
    let learning_face = mean3(past_present, present_future, past_future);

    let past_weight = mean3(past_present, past_future, past_apex);
    let present_weight = mean3(past_present, present_future, present_apex);
    let future_weight = mean3(present_future, past_future, future_apex);

    let unified_attention = if present_weight > past_weight && present_weight > future_weight {
        current_attention_focus
            .map(String::from)
            .unwrap_or_else(|| "reflection".to_string())
    } else if future_weight > past_weight {
        salience
            .top_possibility_description
            .clone()
            .unwrap_or_else(|| "reflection".to_string())
    } else {
        match salience.active_knowledge_items.first() {
            Some(item) => format!("consolidating: {item}"),
            None => "consolidating: reflection".to_string(),
        }
    };

    let unified_intention = salience
        .top_possibility_next_step
        .clone()
        .or_else(|| salience.simulation_recommended_action.clone())
        .unwrap_or_else(|| "continue exploration".to_string());

    let action_confidence = clamp01(0.4 * aspiration_face + 0.3 * grounding_face + 0.3 * learning_face);
    let overall_coherence = clamp01(mean4(aspiration_face, vision_face, grounding_face, learning_face));

    let energy_recommendation = if overall_coherence < 0.4 {
        EnergyRecommendation::RestRecommended
    } else if overall_coherence < 0.6 {
        EnergyRecommendation::LightActivity
    } else {
        EnergyRecommendation::FullEngagement
    };

    let wisdom_delta = WisdomDelta {
        knowledge_depth: 0.01 * salience.integration_health,
        reasoning_quality: 0.01 * coherence.coherence_score,
        insight_frequency: if salience.novelty_scores.iter().any(|n| *n > 0.7) { 0.02 } else { 0.0 },
        behavioral_coherence: 0.01 * grounding_face,
    };

    FullIntegration {
        unified_attention,
        unified_intention,
        action_confidence,
        overall_coherence,
        rest_indicator: energy_recommendation.rest_indicator(),
        energy_recommendation,
        wisdom_delta,
    }
}

fn mean3(a: f64, b: f64, c: f64) -> f64 {
    (a + b + c) / 3.0
}

fn mean4(a: f64, b: f64, c: f64, d: f64) -> f64 {
    (a + b + c + d) / 4.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coherence::CoherenceSynthesis;
    use crate::memory::MemorySynthesis;
    use std::collections::BTreeMap;

    fn full_coherence() -> CoherenceSynthesis {
        CoherenceSynthesis {
            salience_landscape: BTreeMap::new(),
            coherence_score: 1.0,
            triadic_coherence: 1.0,
        }
    }

    fn full_memory() -> MemorySynthesis {
        MemorySynthesis {
            triadic_flow: 1.0,
            memory_efficiency: 1.0,
        }
    }

    #[test]
    fn low_coherence_recommends_rest() {
        let coherence = CoherenceSynthesis {
            salience_landscape: BTreeMap::new(),
            coherence_score: 0.0,
            triadic_coherence: 0.0,
        };
        let memory = MemorySynthesis { triadic_flow: 0.0, memory_efficiency: 0.0 };
        let salience = SalienceStreamOutputs::default();

        let out = synthesize_full(FullIntegrationInputs {
            coherence: &coherence,
            memory: &memory,
            salience: &salience,
            current_attention_focus: None,
        });

        assert_eq!(out.energy_recommendation, EnergyRecommendation::RestRecommended);
        assert_eq!(out.rest_indicator, 0.7);
    }

    #[test]
    fn strong_streams_recommend_full_engagement_and_unify_on_present() {
        let coherence = full_coherence();
        let memory = full_memory();
        let mut salience = SalienceStreamOutputs::default();
        salience.knowledge_confidence = 1.0;
        salience.attention_confidence = 1.0;
        salience.simulation_confidence = 1.0;
        salience.integration_health = 1.0;
        salience.top_possibility_success = 1.0;
        salience.consolidation_insights = vec!["insight".into(); 5];
        salience.novelty_scores = vec![0.9];
        salience.top_possibility_goal_alignment = 1.0;

        let out = synthesize_full(FullIntegrationInputs {
            coherence: &coherence,
            memory: &memory,
            salience: &salience,
            current_attention_focus: Some("breathing"),
        });

        assert_eq!(out.energy_recommendation, EnergyRecommendation::FullEngagement);
        assert_eq!(out.unified_attention, "breathing");
        assert!(out.wisdom_delta.insight_frequency > 0.0);
    }

    #[test]
    fn unified_intention_prefers_the_top_possibilitys_next_step_over_its_description() {
        let coherence = full_coherence();
        let memory = full_memory();
        let mut salience = SalienceStreamOutputs::default();
        salience.top_possibility_description = Some("exploring the garden".to_string());
        salience.top_possibility_next_step = Some("begin:walk-to-garden".to_string());

        let out = synthesize_full(FullIntegrationInputs {
            coherence: &coherence,
            memory: &memory,
            salience: &salience,
            current_attention_focus: None,
        });

        assert_eq!(out.unified_intention, "begin:walk-to-garden");
    }

    #[test]
    fn wisdom_delta_components_stay_small_per_cycle() {
        let coherence = full_coherence();
        let memory = full_memory();
        let salience = SalienceStreamOutputs::default();

        let out = synthesize_full(FullIntegrationInputs {
            coherence: &coherence,
            memory: &memory,
            salience: &salience,
            current_attention_focus: None,
        });

        assert!(out.wisdom_delta.knowledge_depth <= 0.01);
        assert!(out.wisdom_delta.reasoning_quality <= 0.01);
        assert!(out.wisdom_delta.behavioral_coherence <= 0.01);
    }
}
