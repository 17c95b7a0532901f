//! Pure step-classification functions the scheduler and the Control
//! Surface's status metadata both use (spec section 4.8, steps 1-3).

pub use noetic_engines::Phase;

/// Expressive for 0..3 and 6..9; Reflective for 4,5,10,11.
pub fn phase_for(step: u8) -> Phase {
    match step % 12 {
        0..=3 | 6..=9 => Phase::Expressive,
        _ => Phase::Reflective,
    }
}

/// The four triads partition 0..11 into {0,4,8}, {1,5,9}, {2,6,10}, {3,7,11}.
pub fn triad_of(step: u8) -> u8 {
    step % 4
}

/// True exactly at the step whose *end* is the cycle boundary (step 11);
/// the scheduler overlays `Phase::Meta` on this transition in addition to
/// the step's ordinary phase (spec section 4.8 step 2).
pub fn is_cycle_transition(step: u8) -> bool {
    step % 12 == 11
}

/// Which engine(s) are active for a given global step (spec section 4.8
/// step 1). Relevance is additionally active, but only at the pivotal
/// steps {0,6}; it is reported separately since it is not tied to a
/// contiguous range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveStream {
    Affordance,
    Salience,
}

pub fn active_stream(step: u8) -> ActiveStream {
    if step <= 5 {
        ActiveStream::Affordance
    } else {
        ActiveStream::Salience
    }
}

pub fn is_pivotal(step: u8) -> bool {
    step == 0 || step == 6
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepMetadata {
    pub step: u8,
    pub phase: Phase,
    pub triad: u8,
    pub active_stream: ActiveStream,
    pub is_pivotal: bool,
    pub is_cycle_transition: bool,
}

pub fn metadata_for(step: u8) -> StepMetadata {
    StepMetadata {
        step,
        phase: phase_for(step),
        triad: triad_of(step),
        active_stream: active_stream(step),
        is_pivotal: is_pivotal(step),
        is_cycle_transition: is_cycle_transition(step),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_matches_the_documented_ranges() {
        for step in [0, 1, 2, 3, 6, 7, 8, 9] {
            assert_eq!(phase_for(step), Phase::Expressive, "step {step}");
        }
        for step in [4, 5, 10, 11] {
            assert_eq!(phase_for(step), Phase::Reflective, "step {step}");
        }
    }

    #[test]
    fn triads_partition_the_cycle_into_four_groups_of_three() {
        let mut groups: Vec<Vec<u8>> = vec![Vec::new(); 4];
        for step in 0..12 {
            groups[triad_of(step) as usize].push(step);
        }
        assert_eq!(groups[0], vec![0, 4, 8]);
        assert_eq!(groups[1], vec![1, 5, 9]);
        assert_eq!(groups[2], vec![2, 6, 10]);
        assert_eq!(groups[3], vec![3, 7, 11]);
    }

    #[test]
    fn only_step_eleven_is_a_cycle_transition() {
        assert!(is_cycle_transition(11));
        assert!(!is_cycle_transition(0));
        assert!(!is_cycle_transition(10));
    }

    #[test]
    fn pivotal_steps_are_zero_and_six() {
        assert!(is_pivotal(0));
        assert!(is_pivotal(6));
        assert!(!is_pivotal(3));
    }
}
