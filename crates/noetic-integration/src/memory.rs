//! Memory Synthesis, step 8 of each cycle (spec section 4.9.2).

use noetic_common::clamp::clamp01;
use noetic_engines::MemoryStreamOutputs;

#[derive(Debug, Clone)]
pub struct MemorySynthesis {
    pub triadic_flow: f64,
    pub memory_efficiency: f64,
}

const FLOOR: f64 = 0.01;

fn harmonic_mean_floored(values: [f64; 3]) -> f64 {
    let floored: Vec<f64> = values.iter().map(|v| v.max(FLOOR)).collect();
    let reciprocal_sum: f64 = floored.iter().map(|v| 1.0 / v).sum();
    floored.len() as f64 / reciprocal_sum
}

pub fn synthesize_memory(inputs: &MemoryStreamOutputs) -> MemorySynthesis {
    let f1 = clamp01(inputs.integration_quality * inputs.retrieval_confidence);
    let f2 = inputs.new_connections.len() as f64 / (inputs.strengthened_memories.len().max(1) as f64);
    let f3 = inputs.strengthened_memories.len() as f64 / (inputs.retrieved_memories.len().max(1) as f64);

    let triadic_flow = harmonic_mean_floored([f1, f2, f3]);

    let retrieved = inputs.retrieved_memories.len() as f64;
    let pruned = inputs.pruned.len() as f64;
    let memory_efficiency = (retrieved - pruned) / (retrieved + pruned).max(1.0);

    MemorySynthesis {
        triadic_flow,
        memory_efficiency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_do_not_divide_by_zero() {
        let inputs = MemoryStreamOutputs::default();
        let out = synthesize_memory(&inputs);
        assert!(out.triadic_flow.is_finite());
        assert_eq!(out.memory_efficiency, 0.0);
    }

    #[test]
    fn floor_prevents_a_single_zero_term_from_zeroing_the_mean() {
        let inputs = MemoryStreamOutputs {
            integration_quality: 0.0,
            retrieval_confidence: 1.0,
            new_connections: vec!["a".into()],
            strengthened_memories: vec!["b".into()],
            retrieved_memories: vec!["c".into()],
            pruned: vec![],
        };
        let out = synthesize_memory(&inputs);
        assert!(out.triadic_flow > 0.0);
    }

    #[test]
    fn efficiency_reflects_retrieved_minus_pruned_ratio() {
        let inputs = MemoryStreamOutputs {
            retrieved_memories: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            pruned: vec!["a".into()],
            ..Default::default()
        };
        let out = synthesize_memory(&inputs);
        assert!((out.memory_efficiency - 0.6).abs() < 1e-9);
    }
}
