//! Centralized, typed configuration for the Noetic core (spec section 6.5).
//!
//! A single immutable record supplied at `start()`, split into one
//! sub-config per subsystem the way `beagle-config::model` splits
//! `LlmConfig` / `StorageConfig` / `GraphConfig`. Every field carries a
//! `#[serde(default = ...)]` so a caller can deserialize a partial JSON
//! document (or none at all) and still get the documented defaults. There
//! are no required environment variables; collaborator endpoints (LLM,
//! hypergraph store) are injected by the caller, not read from the process
//! environment.

mod error;
mod validate;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};

/// Top-level configuration record. Constructed once at `start()` and
/// never mutated afterward; subsystems clone the scalars they need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoeticConfig {
    #[serde(default)]
    pub step: StepConfig,
    #[serde(default)]
    pub thought: ThoughtConfig,
    #[serde(default)]
    pub working_memory: WorkingMemoryConfig,
    #[serde(default)]
    pub interest: InterestConfig,
    #[serde(default)]
    pub attention: AttentionConfig,
    #[serde(default)]
    pub fatigue: FatigueConfig,
    #[serde(default)]
    pub rest: RestConfig,
    #[serde(default)]
    pub phase_sync: PhaseSyncConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
    #[serde(default)]
    pub event_bus: EventBusConfig,
}

impl Default for NoeticConfig {
    fn default() -> Self {
        Self {
            step: StepConfig::default(),
            thought: ThoughtConfig::default(),
            working_memory: WorkingMemoryConfig::default(),
            interest: InterestConfig::default(),
            attention: AttentionConfig::default(),
            fatigue: FatigueConfig::default(),
            rest: RestConfig::default(),
            phase_sync: PhaseSyncConfig::default(),
            llm: LlmConfig::default(),
            persistence: PersistenceConfig::default(),
            event_bus: EventBusConfig::default(),
        }
    }
}

impl NoeticConfig {
    /// Deserialize a (possibly partial) JSON document, filling in documented
    /// defaults for anything omitted. A malformed document is a Fatal
    /// startup error (spec section 7): the core refuses to start rather
    /// than guess at a broken configuration.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants that a permissive per-field default
    /// cannot express on its own (e.g. `min <= base <= max`). Called
    /// automatically by [`NoeticConfig::from_json`]; callers constructing
    /// a config programmatically should call it too before passing the
    /// record to `start()`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate::validate(self)
    }
}

fn default_step_interval_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    #[serde(default = "default_step_interval_ms")]
    pub interval_ms: u64,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_step_interval_ms(),
        }
    }
}

fn default_thought_base_interval_ms() -> u64 {
    10_000
}
fn default_thought_min_interval_ms() -> u64 {
    2_000
}
fn default_thought_max_interval_ms() -> u64 {
    60_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThoughtConfig {
    #[serde(default = "default_thought_base_interval_ms")]
    pub base_interval_ms: u64,
    #[serde(default = "default_thought_min_interval_ms")]
    pub min_interval_ms: u64,
    #[serde(default = "default_thought_max_interval_ms")]
    pub max_interval_ms: u64,
}

impl Default for ThoughtConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: default_thought_base_interval_ms(),
            min_interval_ms: default_thought_min_interval_ms(),
            max_interval_ms: default_thought_max_interval_ms(),
        }
    }
}

fn default_working_memory_capacity() -> usize {
    7
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingMemoryConfig {
    #[serde(default = "default_working_memory_capacity")]
    pub capacity: usize,
}

impl Default for WorkingMemoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_working_memory_capacity(),
        }
    }
}

fn default_interest_decay_rate() -> f64 {
    0.01
}
fn default_interest_min_score() -> f64 {
    0.01
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestConfig {
    #[serde(default = "default_interest_decay_rate")]
    pub decay_rate: f64,
    #[serde(default = "default_interest_min_score")]
    pub min_score: f64,
}

impl Default for InterestConfig {
    fn default() -> Self {
        Self {
            decay_rate: default_interest_decay_rate(),
            min_score: default_interest_min_score(),
        }
    }
}

fn default_attention_shift_timeout_ms() -> u64 {
    30_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttentionConfig {
    #[serde(default = "default_attention_shift_timeout_ms")]
    pub shift_timeout_ms: u64,
}

impl Default for AttentionConfig {
    fn default() -> Self {
        Self {
            shift_timeout_ms: default_attention_shift_timeout_ms(),
        }
    }
}

fn default_fatigue_rate() -> f64 {
    0.01
}
fn default_fatigue_rest_threshold() -> f64 {
    0.75
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueConfig {
    #[serde(default = "default_fatigue_rate")]
    pub rate: f64,
    #[serde(default = "default_fatigue_rest_threshold")]
    pub rest_threshold: f64,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            rate: default_fatigue_rate(),
            rest_threshold: default_fatigue_rest_threshold(),
        }
    }
}

fn default_rest_min_wake_ms() -> u64 {
    1_800_000
}
fn default_rest_min_sleep_ms() -> u64 {
    300_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    #[serde(default = "default_rest_min_wake_ms")]
    pub min_wake_ms: u64,
    #[serde(default = "default_rest_min_sleep_ms")]
    pub min_sleep_ms: u64,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            min_wake_ms: default_rest_min_wake_ms(),
            min_sleep_ms: default_rest_min_sleep_ms(),
        }
    }
}

fn default_phase_sync_timeout_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseSyncConfig {
    #[serde(default = "default_phase_sync_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for PhaseSyncConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_phase_sync_timeout_ms(),
        }
    }
}

fn default_llm_timeout_ms() -> u64 {
    30_000
}
fn default_llm_temperature_default() -> f64 {
    0.7
}
fn default_llm_max_tokens_default() -> u32 {
    150
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_llm_temperature_default")]
    pub temperature_default: f64,
    #[serde(default = "default_llm_max_tokens_default")]
    pub max_tokens_default: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_llm_timeout_ms(),
            temperature_default: default_llm_temperature_default(),
            max_tokens_default: default_llm_max_tokens_default(),
        }
    }
}

fn default_persistence_interval_ms() -> u64 {
    300_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    #[serde(default = "default_persistence_interval_ms")]
    pub interval_ms: u64,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_persistence_interval_ms(),
        }
    }
}

fn default_event_bus_queue_size() -> usize {
    1000
}
fn default_event_bus_history_size() -> usize {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventBusConfig {
    #[serde(default = "default_event_bus_queue_size")]
    pub queue_size: usize,
    #[serde(default = "default_event_bus_history_size")]
    pub history_size: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            queue_size: default_event_bus_queue_size(),
            history_size: default_event_bus_history_size(),
        }
    }
}
