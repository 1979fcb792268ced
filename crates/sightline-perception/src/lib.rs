//! `sightline-perception` - turns noisy range readings into stable, displayable
//! signals and discrete safety alerts.
//!
//! # Modules
//!
//! - [`smoothing`] - [`SlidingWindow`][smoothing::SlidingWindow]: bounded FIFO
//!   mean filter with drop-out holdoff, instantiated once per channel.
//! - [`classify`] - [`Classifier`][classify::Classifier]: the threshold rules
//!   that map range readings to the [`Alert`][sightline_types::Alert]
//!   vocabulary. Two policies are in use, one per data path.
//! - [`gauge`] - [`BarChannel`][gauge::BarChannel]: one rendered bar's worth
//!   of smoothed height plus its [`GaugeBand`][gauge::GaugeBand] color band.
//!
//! Smoothing is a display concern only: the classifiers operate on raw
//! per-frame distances, never on windowed averages.

pub mod classify;
pub mod gauge;
pub mod smoothing;

pub use classify::{Classifier, LateralClassifier, ProximityClassifier};
pub use gauge::{BarChannel, GaugeBand};
pub use smoothing::SlidingWindow;
