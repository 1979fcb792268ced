//! `sightline` - assistive-navigation console.
//!
//! This binary wires the full pipeline together:
//!
//! 1. Initialises structured logging and loads `~/.sightline/config.toml`
//!    (defaults apply when the file is absent).
//! 2. Constructs the single [`StateStore`] and registers the consumers:
//!    terminal gauge, spoken-alert announcer, and (optionally) the guidance
//!    enrichment client.
//! 3. Spawns the sensor-link listener - which falls back to the simulator if
//!    the link cannot be established - and, when enabled, the secondary
//!    gateway poller.
//! 4. Runs until Ctrl-C.

mod config;
mod display;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use colored::Colorize;
use tracing::{info, warn};

use sightline_middleware::{GatewayPoller, StateStore, TransportListener, WsTransport};
use sightline_runtime::{Announcer, GuidanceClient, LogSpeaker, init_tracing};

#[tokio::main]
async fn main() {
    init_tracing();

    let cfg = match config::load() {
        Ok(Some(cfg)) => {
            info!(path = %config::config_path().display(), "configuration loaded");
            cfg
        }
        Ok(None) => {
            info!("no config file found, using defaults");
            let mut cfg = config::Config::default();
            config::apply_env_overrides(&mut cfg);
            cfg
        }
        Err(e) => {
            warn!(error = %e, "configuration unreadable, using defaults");
            config::Config::default()
        }
    };

    println!("{}", "Sightline navigation console".bold());
    println!("sensor link: {}", cfg.link_url);

    let store = Arc::new(StateStore::new());

    // Terminal gauge: one rendered line per published state.
    let dashboard = Mutex::new(display::Dashboard::new());
    store.subscribe(move |state| {
        let mut dashboard = dashboard.lock().unwrap_or_else(PoisonError::into_inner);
        println!("{}", dashboard.render(state));
    });

    // Spoken alerts, deduplicated at this boundary.
    let announcer = Announcer::new(LogSpeaker);
    store.subscribe(move |state| announcer.observe(state));

    // Guidance enrichment: fire-and-forget, throttled inside the client.
    if cfg.guidance_enabled {
        let guidance = Arc::new(GuidanceClient::new(
            cfg.ollama_url.as_str(),
            cfg.guidance_model.as_str(),
        ));
        store.subscribe(move |state| {
            let guidance = Arc::clone(&guidance);
            let (left_m, right_m) = (state.obstacle_m, state.trench_m);
            tokio::spawn(async move {
                guidance.refresh(left_m, right_m).await;
            });
        });
    }

    let mut tasks = Vec::new();

    if cfg.gateway_enabled {
        let poller = GatewayPoller::new(
            cfg.gateway_url.as_str(),
            Arc::clone(&store),
            Duration::from_millis(cfg.gateway_poll_ms),
        );
        tasks.push(tokio::spawn(poller.run()));
    }

    let listener = TransportListener::new(
        Box::new(WsTransport::new(cfg.link_url.as_str())),
        Arc::clone(&store),
        Duration::from_millis(cfg.sim_tick_ms),
    );
    tasks.push(tokio::spawn(listener.run()));

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Ctrl-C handler unavailable, shutting down");
    }

    println!();
    println!("{}", "Shutting down.".yellow());
    for task in tasks {
        task.abort();
    }
}
