//! The Noetic core binary: loads configuration, wires every collaborator
//! named in spec section 6, and runs until interrupted. Grounded in
//! `beagle-bin`'s `tokio::main` + `tracing_subscriber` startup shape,
//! generalized from a single eternal loop into a supervised worker set
//! driven by the Control Surface.

mod wiring;

use std::sync::Arc;
use std::time::Duration;

use noetic_config::NoeticConfig;
use noetic_llm::{HttpThoughtProducer, MockThoughtProducer, ThoughtProducer};
use noetic_persistence::Identity;
use tracing::info;
use wiring::Collaborators;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = load_config()?;
    let collaborators = Collaborators {
        producer: load_producer(),
        identity: Identity {
            name: std::env::var("NOETIC_NAME").unwrap_or_else(|_| "noetic".to_string()),
            serial: std::env::var("NOETIC_SERIAL").unwrap_or_else(|_| uuid::Uuid::new_v4().to_string()),
        },
    };

    info!("wiring noetic core");
    let core = wiring::build(config, collaborators);

    let (_stimuli_tx, stimuli_rx) = tokio::sync::mpsc::channel(32);
    let handles = core.start(stimuli_rx).await;
    info!("noetic core running, press ctrl-c to stop");

    wait_for_shutdown(&core).await;

    core.stop().await;
    for handle in handles {
        let _ = handle.await;
    }
    info!("noetic core stopped");

    Ok(())
}

/// Reads `NOETIC_CONFIG_PATH` if set, otherwise runs with documented
/// defaults (spec section 6.5: no required environment variables).
fn load_config() -> anyhow::Result<NoeticConfig> {
    match std::env::var("NOETIC_CONFIG_PATH") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)?;
            Ok(NoeticConfig::from_json(&raw)?)
        }
        Err(_) => {
            let config = NoeticConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

/// `NOETIC_LLM_ENDPOINT` selects an HTTP-backed producer; its absence
/// falls back to the deterministic mock (spec section 6.5: collaborator
/// endpoints are injected by the caller, never required).
fn load_producer() -> Arc<dyn ThoughtProducer> {
    match std::env::var("NOETIC_LLM_ENDPOINT") {
        Ok(endpoint) => Arc::new(HttpThoughtProducer::new(endpoint, Duration::from_secs(30))),
        Err(_) => Arc::new(MockThoughtProducer),
    }
}

/// Blocks until ctrl-c, logging a status line every thirty seconds so the
/// core's progress is visible without a separate observability surface.
async fn wait_for_shutdown(core: &wiring::WiredCore) {
    let mut status_tick = tokio::time::interval(Duration::from_secs(30));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => return,
            _ = status_tick.tick() => {
                let status = core.control.status();
                info!(
                    state = %status.state,
                    cycle = status.cycle_count,
                    step = status.global_step,
                    thoughts = status.counters.thoughts_emitted,
                    dreams = status.counters.dream_cycles,
                    "status"
                );
            }
        }
    }
}
