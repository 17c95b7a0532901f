//! Clock & Ticker Fabric (spec section 4.1).
//!
//! A small set of periodic drivers — step tick, thought tick, monitoring
//! tick, persistence tick — each delivering a tick at most every configured
//! interval, with strictly monotonic timestamps. Stopping the fabric halts
//! all emitters; in-flight handlers are allowed to finish but no new ticks
//! are delivered. A time-source regression is treated as "no tick" (skip),
//! never as a panic or a burst of catch-up ticks.
//!
//! Grounded in the periodic-loop shape used throughout the teacher
//! workspace's long-lived workers (the `sleep(Duration::from_secs(...))`
//! loop in the eternal-evolution binary, and the tick-driven monitors in
//! the observer crate), generalized into a reusable, cancellable primitive.

use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::trace;

/// A single periodic emitter. Call [`Ticker::tick`] in a loop; it resolves
/// once per interval, or never again once the fabric has been stopped.
pub struct Ticker {
    interval: Duration,
    last: Instant,
    stop_rx: watch::Receiver<bool>,
}

impl Ticker {
    fn new(interval: Duration, stop_rx: watch::Receiver<bool>) -> Self {
        Self {
            interval,
            last: Instant::now(),
            stop_rx,
        }
    }

    /// Wait for the next tick. Returns `None` once the fabric has stopped.
    /// A clock regression relative to the previous tick is skipped rather
    /// than fired early or treated as an error.
    pub async fn tick(&mut self) -> Option<Instant> {
        loop {
            if *self.stop_rx.borrow() {
                return None;
            }

            let now = Instant::now();
            let elapsed = now.checked_duration_since(self.last);
            let remaining = match elapsed {
                Some(e) if e >= self.interval => Duration::ZERO,
                Some(e) => self.interval - e,
                None => {
                    // Time source regressed. Skip this round entirely and
                    // re-arm against "now" rather than firing immediately.
                    trace!("ticker observed a clock regression, skipping");
                    self.last = now;
                    self.interval
                }
            };

            tokio::select! {
                _ = tokio::time::sleep(remaining) => {
                    let fire_time = Instant::now();
                    if fire_time >= self.last {
                        self.last = fire_time;
                        return Some(fire_time);
                    }
                    // Regressed again mid-sleep; loop and re-evaluate.
                }
                changed = self.stop_rx.changed() => {
                    if changed.is_err() || *self.stop_rx.borrow() {
                        return None;
                    }
                }
            }
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Owns the single global cancellation signal (spec section 5) and vends
/// independent [`Ticker`]s, each with its own interval but sharing the
/// same stop signal.
#[derive(Clone)]
pub struct TickerFabric {
    stop_tx: watch::Sender<bool>,
    stop_rx: watch::Receiver<bool>,
}

impl TickerFabric {
    pub fn new() -> Self {
        let (stop_tx, stop_rx) = watch::channel(false);
        Self { stop_tx, stop_rx }
    }

    /// Start a new periodic emitter with the given interval.
    pub fn spawn(&self, interval: Duration) -> Ticker {
        Ticker::new(interval, self.stop_rx.clone())
    }

    /// Halt every ticker vended by this fabric. Idempotent.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.stop_rx.borrow()
    }

    /// A receiver workers can poll independently of calling `tick()`, for
    /// the "bounded rendezvous" and "channel send" suspension kinds that
    /// also need to observe cancellation (spec section 5).
    pub fn stop_signal(&self) -> watch::Receiver<bool> {
        self.stop_rx.clone()
    }
}

impl Default for TickerFabric {
    fn default() -> Self {
        Self::new()
    }
}
