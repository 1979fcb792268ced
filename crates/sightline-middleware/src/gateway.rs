//! Secondary gateway polling.
//!
//! Some deployments relay the left/right ranging unit through a small HTTP
//! gateway instead of the direct sensor link. The [`GatewayPoller`] fetches
//! the latest sample from that gateway at a fixed interval (reference:
//! 500 ms), classifies it with the left/right policy, and publishes the
//! result. A failed poll is logged and skipped; the canonical state keeps
//! its previous value until the next successful tick.
//!
//! The gateway reports meters directly:
//!
//! ```json
//! {"horizontal": 0.8, "height": 1.4}
//! ```
//!
//! `horizontal` is the left range and `height` the right range; missing
//! fields default to 0.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use sightline_perception::{Classifier, LateralClassifier};
use sightline_types::{CanonicalState, SightError};
use tracing::warn;

use crate::store::StateStore;

/// Reference poll interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Deserialize)]
struct GatewaySample {
    #[serde(default)]
    horizontal: f64,
    #[serde(default)]
    height: f64,
}

/// Fixed-interval poller for the left/right gateway.
pub struct GatewayPoller {
    client: reqwest::Client,
    url: String,
    store: Arc<StateStore>,
    classifier: LateralClassifier,
    interval: Duration,
}

impl GatewayPoller {
    /// `url` is the gateway's latest-sample endpoint
    /// (e.g. `"http://localhost:3000/data/latest"`).
    pub fn new(url: impl Into<String>, store: Arc<StateStore>, interval: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            store,
            classifier: LateralClassifier,
            interval,
        }
    }

    /// Poll forever. Individual failures are logged and skipped.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            if let Err(e) = self.poll_once().await {
                warn!(error = %e, "gateway poll failed");
            }
        }
    }

    /// Fetch and publish one sample.
    pub async fn poll_once(&self) -> Result<(), SightError> {
        let sample: GatewaySample = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SightError::Gateway(e.to_string()))?
            .error_for_status()
            .map_err(|e| SightError::Gateway(e.to_string()))?
            .json()
            .await
            .map_err(|e| SightError::Gateway(e.to_string()))?;

        self.store.publish(self.state_from(&sample));
        Ok(())
    }

    fn state_from(&self, sample: &GatewaySample) -> CanonicalState {
        let (left_m, right_m) = (sample.horizontal, sample.height);
        let alert = self.classifier.classify(left_m, right_m);
        CanonicalState::lateral(left_m, right_m, alert)
    }
}
