//! Synthetic reading generator.
//!
//! When no real sensor link is available the [`Simulator`] keeps the rest of
//! the pipeline - store, display, announcer - exercised with plausible data:
//! every tick it synthesizes a [`Reading`] with uniformly random distances in
//! `[0, 2)` meters and a heading in `[0, 180)` degrees, classifies it with
//! the proximity/trench policy, and publishes it like any real reading.
//!
//! The simulator runs until process shutdown; it has no termination
//! condition tied to the real transport recovering.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use sightline_perception::{Classifier, ProximityClassifier};
use sightline_types::{CanonicalState, Reading};
use tracing::debug;

use crate::store::StateStore;

/// Reference tick interval.
pub const DEFAULT_TICK: Duration = Duration::from_millis(1000);

/// Timer-driven synthetic reading source.
pub struct Simulator {
    store: Arc<StateStore>,
    tick: Duration,
    classifier: ProximityClassifier,
}

impl Simulator {
    pub fn new(store: Arc<StateStore>, tick: Duration) -> Self {
        Self {
            store,
            tick,
            classifier: ProximityClassifier,
        }
    }

    /// One synthetic sample.
    pub fn synth_reading() -> Reading {
        let mut rng = rand::thread_rng();
        Reading {
            obstacle_m: rng.gen_range(0.0..2.0),
            trench_m: rng.gen_range(0.0..2.0),
            angle_deg: rng.gen_range(0.0..180.0),
        }
    }

    /// Publish one synthetic reading per tick, forever.
    pub async fn run(self) {
        debug!(tick_ms = self.tick.as_millis() as u64, "simulator started");
        let mut ticker = tokio::time::interval(self.tick);
        loop {
            ticker.tick().await;
            let reading = Self::synth_reading();
            let alert = self
                .classifier
                .classify(reading.obstacle_m, reading.trench_m);
            self.store
                .publish(CanonicalState::from_reading(&reading, alert));
        }
    }
}
