//! `sightline-types` - shared value types for the assistive-navigation
//! telemetry pipeline.
//!
//! Everything that crosses a crate boundary lives here: the decoded sensor
//! [`Reading`], the authoritative [`CanonicalState`] snapshot, the fixed
//! [`Alert`] vocabulary, and the global [`SightError`] taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One validated sensor sample, produced by decoding a transport frame or by
/// one simulator tick. Distances are meters, angle is degrees (0-360,
/// unnormalized).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub obstacle_m: f64,
    pub trench_m: f64,
    pub angle_deg: f64,
}

impl Reading {
    /// Build a reading from the centimeter fields the sensor unit transmits.
    pub fn from_centimeters(obstacle_cm: f64, trench_cm: f64, angle_deg: f64) -> Self {
        Self {
            obstacle_m: obstacle_cm / 100.0,
            trench_m: trench_cm / 100.0,
            angle_deg,
        }
    }
}

/// Fixed alert vocabulary shared by every classifier and consumer.
///
/// Two classification policies are in use (see `sightline-perception`):
/// the proximity/trench variant produces `ObstacleAhead` / `TrenchAhead` /
/// `Clear`, the left/right variant produces `Stop` / `TurnRight` / `Clear`.
/// `Waiting` only ever appears in the initial state, before the first
/// accepted reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alert {
    Waiting,
    Clear,
    ObstacleAhead,
    TrenchAhead,
    Stop,
    TurnRight,
}

impl Alert {
    /// The spoken/displayed form of the alert. Never empty.
    pub fn phrase(&self) -> &'static str {
        match self {
            Alert::Waiting => "waiting...",
            Alert::Clear => "clear",
            Alert::ObstacleAhead => "obstacle ahead",
            Alert::TrenchAhead => "trench ahead",
            Alert::Stop => "stop",
            Alert::TurnRight => "turn right",
        }
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.phrase())
    }
}

/// The single authoritative snapshot of derived sensor state.
///
/// There is exactly one live instance at any time, owned by the state store;
/// a publish replaces it wholesale, it is never mutated in place. Numeric
/// fields are finite or `f64::NAN` as the "unknown" sentinel (rendered as
/// `--` by displays).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalState {
    pub obstacle_m: f64,
    pub trench_m: f64,
    pub angle_deg: f64,
    pub alert: Alert,
}

impl CanonicalState {
    /// State derived from a sensor-link or simulator reading.
    pub fn from_reading(reading: &Reading, alert: Alert) -> Self {
        Self {
            obstacle_m: reading.obstacle_m,
            trench_m: reading.trench_m,
            angle_deg: reading.angle_deg,
            alert,
        }
    }

    /// State derived from the secondary gateway's left/right ranges. The
    /// left range occupies the obstacle channel and the right range the
    /// trench channel; the gateway reports no angle, so it is unknown.
    pub fn lateral(left_m: f64, right_m: f64, alert: Alert) -> Self {
        Self {
            obstacle_m: left_m,
            trench_m: right_m,
            angle_deg: f64::NAN,
            alert,
        }
    }
}

impl Default for CanonicalState {
    /// The process-start state, before any reading has been accepted.
    fn default() -> Self {
        Self {
            obstacle_m: 0.0,
            trench_m: 0.0,
            angle_deg: 0.0,
            alert: Alert::Waiting,
        }
    }
}

/// Global error taxonomy. No variant is fatal to the process; the worst-case
/// outcome of any of these is a stale or default state persisting.
#[derive(Error, Debug)]
pub enum SightError {
    /// A transport frame could not be decoded into a [`Reading`]. The frame
    /// is dropped and the canonical state left untouched.
    #[error("frame decode failed: {0}")]
    Decode(String),

    /// The sensor link could not be established or was lost. Recovered by
    /// falling back to the simulator.
    #[error("transport failure: {0}")]
    Transport(String),

    /// A poll of the secondary gateway failed. The tick is skipped.
    #[error("gateway poll failed: {0}")]
    Gateway(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_converts_centimeters() {
        let r = Reading::from_centimeters(48.0, 230.0, 95.5);
        assert!((r.obstacle_m - 0.48).abs() < 1e-9);
        assert!((r.trench_m - 2.3).abs() < 1e-9);
        assert!((r.angle_deg - 95.5).abs() < 1e-9);
    }

    #[test]
    fn default_state_is_waiting() {
        let state = CanonicalState::default();
        assert_eq!(state.alert, Alert::Waiting);
        assert_eq!(state.obstacle_m, 0.0);
        assert_eq!(state.trench_m, 0.0);
        assert_eq!(state.angle_deg, 0.0);
    }

    #[test]
    fn lateral_state_has_unknown_angle() {
        let state = CanonicalState::lateral(0.8, 1.4, Alert::TurnRight);
        assert!((state.obstacle_m - 0.8).abs() < 1e-9);
        assert!((state.trench_m - 1.4).abs() < 1e-9);
        assert!(state.angle_deg.is_nan());
    }

    #[test]
    fn alert_phrases_never_empty() {
        let all = [
            Alert::Waiting,
            Alert::Clear,
            Alert::ObstacleAhead,
            Alert::TrenchAhead,
            Alert::Stop,
            Alert::TurnRight,
        ];
        for alert in all {
            assert!(!alert.phrase().is_empty());
        }
    }

    #[test]
    fn alert_display_matches_reference_vocabulary() {
        assert_eq!(Alert::ObstacleAhead.to_string(), "obstacle ahead");
        assert_eq!(Alert::TrenchAhead.to_string(), "trench ahead");
        assert_eq!(Alert::Stop.to_string(), "stop");
        assert_eq!(Alert::TurnRight.to_string(), "turn right");
        assert_eq!(Alert::Clear.to_string(), "clear");
        assert_eq!(Alert::Waiting.to_string(), "waiting...");
    }

    #[test]
    fn reading_roundtrip() {
        let r = Reading {
            obstacle_m: 0.5,
            trench_m: 1.25,
            angle_deg: 180.0,
        };
        let json = serde_json::to_string(&r).unwrap();
        let back: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }

    #[test]
    fn sight_error_display() {
        let err = SightError::Decode("bad json".to_string());
        assert!(err.to_string().contains("decode"));
        assert!(err.to_string().contains("bad json"));

        let err = SightError::Transport("device not found".to_string());
        assert!(err.to_string().contains("device not found"));
    }
}
