//! The Event-bus dispatcher worker (spec section 5): drains the bus and
//! maintains the subsystem counters `status()` reports (spec section 6.4).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use noetic_events::{EventBus, NoeticEvent};
use tokio::sync::watch;

#[derive(Default)]
struct Counts {
    thoughts_emitted: AtomicU64,
    integrations_run: AtomicU64,
    phase_sync_timeouts: AtomicU64,
    dream_cycles: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SubsystemCounters {
    pub thoughts_emitted: u64,
    pub integrations_run: u64,
    pub phase_sync_timeouts: u64,
    pub dropped_events: u64,
    pub dream_cycles: u64,
}

/// Subscribes to every event and tallies the counters the Control Surface
/// needs; `dropped_events` is read live from the bus's own metrics rather
/// than tallied here, since the bus already counts drops at the point of
/// loss.
pub struct EventDispatcher {
    events: EventBus,
    counts: Arc<Counts>,
}

impl EventDispatcher {
    pub fn new(events: EventBus) -> Self {
        Self { events, counts: Arc::new(Counts::default()) }
    }

    pub fn counters(&self) -> SubsystemCounters {
        SubsystemCounters {
            thoughts_emitted: self.counts.thoughts_emitted.load(Ordering::Relaxed),
            integrations_run: self.counts.integrations_run.load(Ordering::Relaxed),
            phase_sync_timeouts: self.counts.phase_sync_timeouts.load(Ordering::Relaxed),
            dropped_events: self.events.metrics().dropped_total() as u64,
            dream_cycles: self.counts.dream_cycles.load(Ordering::Relaxed),
        }
    }

    pub async fn run(&self, mut stop: watch::Receiver<bool>) {
        let mut rx = self.events.subscribe();
        loop {
            tokio::select! {
                _ = stop.changed() => { if *stop.borrow() { return; } }
                envelope = rx.recv() => {
                    match envelope {
                        Some(envelope) => self.tally(&envelope.event),
                        None => return,
                    }
                }
            }
        }
    }

    fn tally(&self, event: &NoeticEvent) {
        match event {
            NoeticEvent::ThoughtGenerated { .. } => {
                self.counts.thoughts_emitted.fetch_add(1, Ordering::Relaxed);
            }
            NoeticEvent::FullIntegrationComplete { .. } => {
                self.counts.integrations_run.fetch_add(1, Ordering::Relaxed);
            }
            NoeticEvent::PhaseSyncTimeout { .. } => {
                self.counts.phase_sync_timeouts.fetch_add(1, Ordering::Relaxed);
            }
            NoeticEvent::DreamEnded { .. } => {
                self.counts.dream_cycles.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noetic_events::Priority;

    #[test]
    fn tally_counts_the_expected_event_kinds() {
        let events = EventBus::new(10, 10);
        let dispatcher = EventDispatcher::new(events);

        dispatcher.tally(&NoeticEvent::ThoughtGenerated { thought_id: "t1".into(), kind: "Insight".into(), fallback: false });
        dispatcher.tally(&NoeticEvent::PhaseSyncTimeout { step: 0, arrived: 1, required: 3 });
        dispatcher.tally(&NoeticEvent::DreamEnded { insights: 2 });
        dispatcher.tally(&NoeticEvent::StepStart { cycle: 0, step: 0 });

        let counters = dispatcher.counters();
        assert_eq!(counters.thoughts_emitted, 1);
        assert_eq!(counters.phase_sync_timeouts, 1);
        assert_eq!(counters.dream_cycles, 1);
    }

    #[tokio::test]
    async fn run_drains_published_events_until_stopped() {
        let events = EventBus::new(10, 10);
        let dispatcher = EventDispatcher::new(events.clone());
        let (stop_tx, stop_rx) = watch::channel(false);

        let handle = tokio::spawn(async move { dispatcher.run(stop_rx).await });

        events.publish(NoeticEvent::ThoughtGenerated { thought_id: "t1".into(), kind: "Insight".into(), fallback: false }, Priority::Normal);
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let _ = stop_tx.send(true);
        handle.await.unwrap();
    }
}
