//! `sightline-middleware` - moves sensor data from the outside world into the
//! single canonical state every consumer trusts.
//!
//! # Modules
//!
//! - [`store`] - [`StateStore`][store::StateStore]: the process-wide canonical
//!   state with synchronous, registration-ordered publish/subscribe fan-out.
//! - [`decode`] - frame decoder: raw transport bytes to a validated
//!   [`Reading`][sightline_types::Reading], or a logged rejection.
//! - [`link`] - [`TransportListener`][link::TransportListener]: owns the
//!   sensor-link lifecycle and drives decode, classify, publish. On
//!   connection failure it hands off to the simulator and never retries.
//! - [`sim`] - [`Simulator`][sim::Simulator]: timer-driven synthetic readings
//!   used when no real link is available.
//! - [`gateway`] - [`GatewayPoller`][gateway::GatewayPoller]: fixed-interval
//!   HTTP polling of the secondary left/right gateway.

pub mod decode;
pub mod gateway;
pub mod link;
pub mod sim;
pub mod store;

pub use decode::decode_frame;
pub use gateway::GatewayPoller;
pub use link::{LinkState, Transport, TransportListener, WsTransport};
pub use sim::Simulator;
pub use store::{StateStore, SubscriberId};
