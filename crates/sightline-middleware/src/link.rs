//! Sensor-link lifecycle.
//!
//! The [`TransportListener`] owns the inbound data path: it connects a
//! [`Transport`], feeds every inbound frame through the decoder, classifies
//! accepted readings with the proximity/trench policy, and publishes the
//! result to the [`StateStore`]. Decode failures are logged and dropped
//! without touching the canonical state.
//!
//! If the link cannot be established the listener hands off to the
//! [`Simulator`] and never attempts to reconnect - a deliberate, preserved
//! limitation of the reference behavior. A link that drops after listening
//! began ends in [`LinkState::Disconnected`] without starting the simulator.
//!
//! The concrete production transport is [`WsTransport`]: the sensor unit
//! streams one JSON frame per WebSocket message.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use sightline_perception::{Classifier, ProximityClassifier};
use sightline_types::{CanonicalState, SightError};
use tokio::sync::watch;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{info, warn};

use crate::decode::decode_frame;
use crate::sim::Simulator;
use crate::store::StateStore;

/// Lifecycle of the sensor link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    Listening,
    /// The link could not be established; synthetic readings are flowing.
    Simulating,
}

/// Source of raw sensor frames.
///
/// `connect` performs the full link setup and yields the inbound frame
/// stream; the stream ending means the link dropped.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn connect(&self) -> Result<BoxStream<'static, Vec<u8>>, SightError>;
}

/// WebSocket transport to the wearable sensor unit.
pub struct WsTransport {
    url: String,
}

impl WsTransport {
    /// `url` is the sensor unit's WebSocket endpoint
    /// (e.g. `"ws://sightline.local:9001/telemetry"`).
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The endpoint this transport connects to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn connect(&self) -> Result<BoxStream<'static, Vec<u8>>, SightError> {
        let (socket, _response) = connect_async(self.url.clone())
            .await
            .map_err(|e| SightError::Transport(e.to_string()))?;

        let frames = socket
            .filter_map(|message| async move {
                match message {
                    Ok(Message::Text(text)) => Some(text.as_bytes().to_vec()),
                    Ok(Message::Binary(bytes)) => Some(bytes.to_vec()),
                    // Control frames carry no readings.
                    Ok(_) => None,
                    Err(e) => {
                        warn!(error = %e, "sensor link read error");
                        None
                    }
                }
            })
            .boxed();
        Ok(frames)
    }
}

/// Drives the Decoder -> Classifier -> Store path for one sensor link.
pub struct TransportListener {
    transport: Box<dyn Transport>,
    store: Arc<StateStore>,
    classifier: ProximityClassifier,
    link_state: watch::Sender<LinkState>,
    sim_tick: Duration,
}

impl TransportListener {
    /// `sim_tick` is the interval the fallback [`Simulator`] will use if the
    /// link cannot be established.
    pub fn new(transport: Box<dyn Transport>, store: Arc<StateStore>, sim_tick: Duration) -> Self {
        let (link_state, _) = watch::channel(LinkState::Disconnected);
        Self {
            transport,
            store,
            classifier: ProximityClassifier,
            link_state,
            sim_tick,
        }
    }

    /// Observe link-state transitions.
    pub fn link_state(&self) -> watch::Receiver<LinkState> {
        self.link_state.subscribe()
    }

    /// Run the link to completion. Returns when the link drops after
    /// listening began; never returns if the connection fails, because the
    /// simulator takes over indefinitely.
    pub async fn run(self) {
        self.link_state.send_replace(LinkState::Connecting);
        info!("connecting to sensor link");

        let mut frames = match self.transport.connect().await {
            Ok(frames) => frames,
            Err(e) => {
                warn!(error = %e, "sensor link unavailable, falling back to synthetic readings");
                self.link_state.send_replace(LinkState::Simulating);
                Simulator::new(Arc::clone(&self.store), self.sim_tick)
                    .run()
                    .await;
                return;
            }
        };

        self.link_state.send_replace(LinkState::Listening);
        info!("sensor link established, listening for frames");

        while let Some(frame) = frames.next().await {
            self.handle_frame(&frame);
        }

        warn!("sensor link closed");
        self.link_state.send_replace(LinkState::Disconnected);
    }

    fn handle_frame(&self, frame: &[u8]) {
        match decode_frame(frame) {
            Ok(reading) => {
                let alert = self
                    .classifier
                    .classify(reading.obstacle_m, reading.trench_m);
                self.store
                    .publish(CanonicalState::from_reading(&reading, alert));
            }
            Err(e) => warn!(error = %e, "dropping malformed frame"),
        }
    }
}
