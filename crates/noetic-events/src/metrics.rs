use std::sync::atomic::{AtomicU64, Ordering};

use prometheus::{Counter, CounterVec, Histogram, HistogramOpts, IntGauge, Opts, Registry};

lazy_static::lazy_static! {
    static ref EVENTS_PUBLISHED: Counter = Counter::new(
        "noetic_events_published_total",
        "Total number of events published to the bus"
    ).unwrap();

    static ref EVENTS_DROPPED: CounterVec = CounterVec::new(
        Opts::new(
            "noetic_events_dropped_total",
            "Total number of events dropped because a subscriber queue was full"
        ),
        &["event_type"]
    ).unwrap();

    static ref PUBLISH_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "noetic_event_publish_duration_seconds",
            "Wall-clock time spent dispatching one publish() call"
        )
    ).unwrap();

    static ref ACTIVE_SUBSCRIBERS: IntGauge = IntGauge::new(
        "noetic_active_subscribers",
        "Number of currently registered event subscribers"
    ).unwrap();
}

/// In-process metrics registry for the event bus (spec section 6.5's
/// ambient counters: thoughts emitted, dropped events, etc. are derived
/// from these at `status()` time). Not served over HTTP; the registry
/// exists purely for introspection by the Control Surface.
pub struct EventMetrics {
    registry: Registry,
}

impl EventMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        registry
            .register(Box::new(EVENTS_PUBLISHED.clone()))
            .expect("metric registration is infallible for a fresh registry");
        registry
            .register(Box::new(EVENTS_DROPPED.clone()))
            .expect("metric registration is infallible for a fresh registry");
        registry
            .register(Box::new(PUBLISH_DURATION.clone()))
            .expect("metric registration is infallible for a fresh registry");
        registry
            .register(Box::new(ACTIVE_SUBSCRIBERS.clone()))
            .expect("metric registration is infallible for a fresh registry");
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn inc_published(&self) {
        EVENTS_PUBLISHED.inc();
    }

    pub fn inc_dropped(&self, event_type: &str) {
        EVENTS_DROPPED.with_label_values(&[event_type]).inc();
    }

    pub fn dropped_total(&self) -> f64 {
        EVENTS_DROPPED.collect()[0]
            .get_metric()
            .iter()
            .map(|m| m.get_counter().get_value())
            .sum()
    }

    pub fn published_total(&self) -> f64 {
        EVENTS_PUBLISHED.get()
    }

    pub fn observe_publish_duration(&self, seconds: f64) {
        PUBLISH_DURATION.observe(seconds);
    }

    pub fn set_active_subscribers(&self, count: i64) {
        ACTIVE_SUBSCRIBERS.set(count);
    }
}

impl Default for EventMetrics {
    fn default() -> Self {
        Self::new()
    }
}
