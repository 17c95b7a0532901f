//! Thought Generation Controller (spec section 4.6): the orchestrator
//! tying cadence, type selection, the Thought Producer, fallback
//! templates, scoring and association-matching together.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use noetic_events::{EventBus, NoeticEvent, Priority};
use noetic_llm::{GenerateOptions, ThoughtProducer};
use noetic_memory::{InterestTable, Thought, ThoughtOrigin, ThoughtSource, ThoughtType, TopicExtractor, WorkingMemory};
use noetic_state::CognitiveState;
use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tracing::warn;
use uuid::Uuid;

use crate::association::find_associations;
use crate::cadence::next_interval;
use crate::scoring::{emotional_valence, importance, interest_match_score};
use crate::selection::{select_thought_type, SelectionInputs};
use crate::stimulus::{Stimulus, StimulusType};
use crate::templates::fallback_text;

pub struct CadenceConfig {
    pub base: Duration,
    pub min: Duration,
    pub max: Duration,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(10),
            min: Duration::from_secs(2),
            max: Duration::from_secs(60),
        }
    }
}

pub struct ThoughtGenerationController {
    working_memory: Mutex<WorkingMemory>,
    interests: Mutex<InterestTable>,
    producer: Arc<dyn ThoughtProducer>,
    events: EventBus,
    topic_extractor: Box<dyn TopicExtractor + Send + Sync>,
    state_source: Box<dyn Fn() -> CognitiveState + Send + Sync>,
    attention_source: Box<dyn Fn() -> Option<String> + Send + Sync>,
    cadence: CadenceConfig,
}

impl ThoughtGenerationController {
    pub fn new(
        working_memory: WorkingMemory,
        interests: InterestTable,
        producer: Arc<dyn ThoughtProducer>,
        events: EventBus,
        topic_extractor: Box<dyn TopicExtractor + Send + Sync>,
        state_source: impl Fn() -> CognitiveState + Send + Sync + 'static,
        attention_source: impl Fn() -> Option<String> + Send + Sync + 'static,
        cadence: CadenceConfig,
    ) -> Self {
        Self {
            working_memory: Mutex::new(working_memory),
            interests: Mutex::new(interests),
            producer,
            events,
            topic_extractor,
            state_source: Box::new(state_source),
            attention_source: Box::new(attention_source),
            cadence,
        }
    }

    pub fn working_memory_snapshot(&self) -> noetic_memory::WorkingMemorySnapshot {
        self.working_memory.lock().snapshot()
    }

    /// Sleeps until the state-driven deadline, a cancellation signal, or a
    /// priority stimulus, then emits a Thought; loops until stopped.
    pub async fn run(&self, mut stop: watch::Receiver<bool>, mut stimuli: mpsc::Receiver<Stimulus>) {
        loop {
            let state = (self.state_source)();
            let deadline = next_interval(
                self.cadence.base,
                self.cadence.min,
                self.cadence.max,
                state.load,
                state.fatigue,
                state.curiosity,
                state.focus_depth,
            );

            tokio::select! {
                _ = stop.changed() => { if *stop.borrow() { return; } }
                _ = tokio::time::sleep(deadline) => {
                    self.emit_generated_thought(&state).await;
                }
                stimulus = stimuli.recv() => {
                    match stimulus {
                        Some(s) => self.handle_stimulus(s),
                        None => return,
                    }
                }
            }
        }
    }

    fn handle_stimulus(&self, stimulus: Stimulus) {
        self.events.publish(
            NoeticEvent::StimulusReceived { source: stimulus.source.clone() },
            Priority::Normal,
        );

        if stimulus.intensity <= 0.6 {
            return;
        }

        let kind = match stimulus.kind {
            StimulusType::Perception => ThoughtType::Perception,
            StimulusType::Question => ThoughtType::Question,
            StimulusType::Command => ThoughtType::Plan,
            StimulusType::Information => ThoughtType::Memory,
            StimulusType::Emotional => ThoughtType::Emotional,
        };

        let valence = emotional_valence(&stimulus.content);
        let thought = Thought::new(
            Uuid::new_v4().to_string(),
            stimulus.content,
            kind,
            ThoughtSource::External,
            ThoughtOrigin::External,
            stimulus.timestamp,
            stimulus.intensity,
            valence,
        );

        self.admit(thought);
    }

    async fn emit_generated_thought(&self, state: &CognitiveState) {
        let top_interests = self.interests.lock().top(5);
        let selection_inputs = SelectionInputs {
            clarity: state.clarity,
            openness: state.openness,
            load: state.load,
            past_weight: state.past_weight,
            future_weight: state.future_weight,
            fatigue: state.fatigue,
        };
        let kind = select_thought_type(&selection_inputs, &mut rand::thread_rng());

        let snapshot = self.working_memory_snapshot();
        let attention_target = (self.attention_source)();
        let prompt = build_prompt(kind, &snapshot, &top_interests, state, attention_target.as_deref());

        let now = Utc::now();
        let (content, fallback) = match self.producer.generate(&prompt, &GenerateOptions::default()).await {
            Ok(text) => (text, false),
            Err(err) => {
                warn!(error = %err, "thought producer failed, using fallback template");
                let top = top_interests.first().map(|(t, _)| t.as_str());
                (fallback_text(kind, top, state.focus_depth), true)
            }
        };

        let match_score = interest_match_score(&content, &top_interests);
        let is_insight_or_meta = matches!(kind, ThoughtType::Insight | ThoughtType::MetaCognitive);
        let importance_value = importance(match_score, is_insight_or_meta);
        let valence = emotional_valence(&content);

        let mut thought = Thought::new(
            Uuid::new_v4().to_string(),
            content,
            kind,
            ThoughtSource::Internal,
            ThoughtOrigin::Generated { fallback },
            now,
            importance_value,
            valence,
        );

        for id in find_associations(&thought.content, &snapshot.thoughts) {
            thought.add_association(id);
        }

        self.admit(thought);
    }

    fn admit(&self, thought: Thought) {
        self.interests.lock().process_thought(&thought, self.topic_extractor.as_ref());

        self.events.publish(
            NoeticEvent::ThoughtGenerated {
                thought_id: thought.id.clone(),
                kind: format!("{:?}", thought.kind),
                fallback: thought.is_fallback(),
            },
            Priority::Normal,
        );

        self.working_memory.lock().add_thought(thought);
    }
}

fn build_prompt(
    kind: ThoughtType,
    snapshot: &noetic_memory::WorkingMemorySnapshot,
    top_interests: &[(String, f64)],
    state: &CognitiveState,
    attention_target: Option<&str>,
) -> String {
    let interests = top_interests.iter().map(|(t, _)| t.as_str()).collect::<Vec<_>>().join(", ");
    let focus = snapshot.focus.as_deref().unwrap_or("nothing in particular");
    let attention = attention_target.unwrap_or("nothing in particular");

    format!(
        "Generate a {kind:?} thought. Current focus: {focus}. Attention target: {attention}. \
         Top interests: [{interests}]. Clarity {:.2}, openness {:.2}, load {:.2}.",
        state.clarity, state.openness, state.load,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use noetic_llm::{MockThoughtProducer, UnavailableThoughtProducer};
    use noetic_memory::WordTopicExtractor;

    fn controller(producer: Arc<dyn ThoughtProducer>) -> ThoughtGenerationController {
        ThoughtGenerationController::new(
            WorkingMemory::new(7),
            InterestTable::new(0.01, 0.01),
            producer,
            EventBus::new(10, 10),
            Box::new(WordTopicExtractor),
            CognitiveState::default,
            || None,
            CadenceConfig::default(),
        )
    }

    #[tokio::test]
    async fn successful_generation_admits_a_thought_without_fallback() {
        let controller = controller(Arc::new(MockThoughtProducer));
        let state = CognitiveState::default();
        controller.emit_generated_thought(&state).await;

        let snapshot = controller.working_memory_snapshot();
        assert_eq!(snapshot.thoughts.len(), 1);
        assert!(!snapshot.thoughts[0].is_fallback());
    }

    #[tokio::test]
    async fn producer_failure_falls_back_to_a_deterministic_template() {
        let controller = controller(Arc::new(UnavailableThoughtProducer));
        let state = CognitiveState::default();
        controller.emit_generated_thought(&state).await;

        let snapshot = controller.working_memory_snapshot();
        assert_eq!(snapshot.thoughts.len(), 1);
        assert!(snapshot.thoughts[0].is_fallback());
    }

    #[tokio::test]
    async fn high_intensity_stimulus_is_admitted_as_an_external_thought() {
        let controller = controller(Arc::new(MockThoughtProducer));
        let stimulus = Stimulus::new(StimulusType::Perception, "a loud noise", 0.9, Utc::now(), "microphone");
        controller.handle_stimulus(stimulus);

        let snapshot = controller.working_memory_snapshot();
        assert_eq!(snapshot.thoughts.len(), 1);
        assert_eq!(snapshot.thoughts[0].source, ThoughtSource::External);
    }

    #[tokio::test]
    async fn low_intensity_stimulus_is_not_admitted() {
        let controller = controller(Arc::new(MockThoughtProducer));
        let stimulus = Stimulus::new(StimulusType::Perception, "a faint sound", 0.2, Utc::now(), "microphone");
        controller.handle_stimulus(stimulus);

        assert!(controller.working_memory_snapshot().thoughts.is_empty());
    }

    #[tokio::test]
    async fn fallback_is_byte_identical_given_the_same_state_and_interests() {
        let c1 = controller(Arc::new(UnavailableThoughtProducer));
        let c2 = controller(Arc::new(UnavailableThoughtProducer));
        let state = CognitiveState::default();

        c1.emit_generated_thought(&state).await;
        c2.emit_generated_thought(&state).await;

        let s1 = c1.working_memory_snapshot();
        let s2 = c2.working_memory_snapshot();
        assert_eq!(s1.thoughts[0].content, s2.thoughts[0].content);
    }
}
