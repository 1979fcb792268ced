//! `sightline-runtime` - consumer-side services around the canonical state.
//!
//! # Modules
//!
//! - [`guidance`] - [`GuidanceClient`][guidance::GuidanceClient]: asks a
//!   locally running Ollama instance for a calm, human-phrased navigation
//!   instruction. Fire-and-forget enrichment; never on the safety path.
//! - [`announcer`] - [`Announcer`][announcer::Announcer]: forwards alert
//!   phrases to a [`SpeechSink`][announcer::SpeechSink], announcing only on
//!   change and never vocalizing `clear`.
//! - [`telemetry`] - [`init_tracing`][telemetry::init_tracing]: wires up the
//!   global `tracing` subscriber.

pub mod announcer;
pub mod guidance;
pub mod telemetry;

pub use announcer::{Announcer, LogSpeaker, SpeechSink};
pub use guidance::{Guidance, GuidanceClient, GuidanceError};
pub use telemetry::init_tracing;
