//! Phase Synchronizer (spec section 4.7.4): a barrier with a label,
//! required arrivals of 3, and a bounded timeout. Grounded in
//! `beagle-triad`'s multi-agent rendezvous shape (three named
//! participants producing independent outputs later arbitrated),
//! generalized from a sequential await-chain into a genuine concurrent
//! barrier. Deadlocks are impossible by construction: the timeout
//! strictly bounds the wait (spec section 4.7.4).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use noetic_events::{EventBus, NoeticEvent, Priority};
use parking_lot::Mutex;
use tokio::sync::Notify;
use tracing::warn;

pub const REQUIRED_ARRIVALS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendezvousOutcome {
    Cleared { arrived: usize },
    TimedOut { arrived: usize },
}

struct Gate {
    notify: Arc<Notify>,
    arrived: usize,
    cleared: bool,
}

impl Gate {
    fn new() -> Self {
        Self {
            notify: Arc::new(Notify::new()),
            arrived: 0,
            cleared: false,
        }
    }
}

/// One barrier per label, shared across the three engine workers. A label
/// clears as soon as `REQUIRED_ARRIVALS` engines have called
/// [`PhaseSynchronizer::rendezvous`] with it; absentees after `timeout`
/// cause the barrier to release anyway, with a `PhaseSyncTimeout` event
/// published for observability (spec section 4.7.4, boundary B3).
pub struct PhaseSynchronizer {
    timeout: Duration,
    gates: Mutex<HashMap<String, Gate>>,
    events: EventBus,
}

impl PhaseSynchronizer {
    pub fn new(timeout: Duration, events: EventBus) -> Self {
        Self {
            timeout,
            gates: Mutex::new(HashMap::new()),
            events,
        }
    }

    /// Arrive at the barrier labeled `label`. Resolves once `REQUIRED_ARRIVALS`
    /// engines have arrived for this label, or once `timeout` elapses,
    /// whichever comes first.
    pub async fn rendezvous(&self, label: &str) -> RendezvousOutcome {
        let notify = {
            let mut gates = self.gates.lock();
            let gate = gates.entry(label.to_string()).or_insert_with(Gate::new);
            gate.arrived += 1;

            if gate.arrived >= REQUIRED_ARRIVALS {
                gate.cleared = true;
                gate.notify.notify_waiters();
                return RendezvousOutcome::Cleared {
                    arrived: gate.arrived,
                };
            }

            gate.notify.clone()
        };

        let notified = notify.notified();
        tokio::select! {
            _ = notified => {
                let arrived = self.gates.lock().get(label).map(|g| g.arrived).unwrap_or(REQUIRED_ARRIVALS);
                RendezvousOutcome::Cleared { arrived }
            }
            _ = tokio::time::sleep(self.timeout) => {
                let arrived = self.reset_and_release(label);
                warn!(label, arrived, "phase sync timed out, releasing barrier");
                self.events.publish(
                    NoeticEvent::PhaseSyncTimeout {
                        step: step_from_label(label),
                        arrived,
                        required: REQUIRED_ARRIVALS,
                    },
                    Priority::High,
                );
                RendezvousOutcome::TimedOut { arrived }
            }
        }
    }

    fn reset_and_release(&self, label: &str) -> usize {
        let mut gates = self.gates.lock();
        if let Some(gate) = gates.get_mut(label) {
            let arrived = gate.arrived;
            gate.notify.notify_waiters();
            gates.remove(label);
            arrived
        } else {
            0
        }
    }
}

/// Recovers the global step number a barrier label identifies (`"step0"`
/// -> `0`, `"step6"` -> `6`), so a `PhaseSyncTimeout` event carries which
/// of the two per-cycle barriers timed out instead of always reporting
/// step 0 (spec section 4.7.4 / scenario 6).
fn step_from_label(label: &str) -> u8 {
    label.strip_prefix("step").and_then(|s| s.parse().ok()).unwrap_or(0)
}
