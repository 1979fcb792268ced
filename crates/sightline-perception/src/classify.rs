//! Threshold-based alert classification.
//!
//! Two classification policies are in production use, one per data path, and
//! they are deliberately kept as two named implementations of one
//! [`Classifier`] trait rather than merged: which rule set is authoritative
//! is an open product question, and merging them silently would hide it.
//!
//! | Variant | Path | Rule |
//! |---|---|---|
//! | [`ProximityClassifier`] | sensor link + simulator | obstacle < 0.5 m, then trench < 0.5 m |
//! | [`LateralClassifier`] | secondary gateway | either side < 0.5 m stops, left < 1.0 m veers |
//!
//! Both are pure, total functions over finite inputs. The heading angle is
//! never consulted; it is surfaced for display only.

use sightline_types::Alert;

/// Range below which the proximity variant raises an obstacle or trench
/// alert, and below which the lateral variant commands a stop.
pub const NEAR_THRESHOLD_M: f64 = 0.5;

/// Range below which the lateral variant steers away from the left side.
pub const VEER_THRESHOLD_M: f64 = 1.0;

/// Maps a pair of range readings to a discrete [`Alert`].
///
/// Implementations must be pure: no internal state, same inputs always give
/// the same alert.
pub trait Classifier: Send + Sync {
    /// Classify one pair of distances (meters). The meaning of the two
    /// parameters is fixed by the implementation.
    fn classify(&self, first_m: f64, second_m: f64) -> Alert;
}

/// Proximity/trench policy used on the sensor-link path: `first_m` is the
/// obstacle distance, `second_m` the trench distance. The obstacle check
/// strictly precedes the trench check.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProximityClassifier;

impl Classifier for ProximityClassifier {
    fn classify(&self, obstacle_m: f64, trench_m: f64) -> Alert {
        if obstacle_m < NEAR_THRESHOLD_M {
            Alert::ObstacleAhead
        } else if trench_m < NEAR_THRESHOLD_M {
            Alert::TrenchAhead
        } else {
            Alert::Clear
        }
    }
}

/// Left/right policy used on the secondary gateway path: `first_m` is the
/// left range, `second_m` the right range.
#[derive(Debug, Clone, Copy, Default)]
pub struct LateralClassifier;

impl Classifier for LateralClassifier {
    fn classify(&self, left_m: f64, right_m: f64) -> Alert {
        if left_m < NEAR_THRESHOLD_M || right_m < NEAR_THRESHOLD_M {
            Alert::Stop
        } else if left_m < VEER_THRESHOLD_M {
            Alert::TurnRight
        } else {
            Alert::Clear
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proximity_obstacle_takes_priority() {
        let c = ProximityClassifier;
        // Both channels near: the obstacle check wins.
        assert_eq!(c.classify(0.3, 0.2), Alert::ObstacleAhead);
        assert_eq!(c.classify(0.3, 1.0), Alert::ObstacleAhead);
    }

    #[test]
    fn proximity_trench_when_obstacle_clear() {
        let c = ProximityClassifier;
        assert_eq!(c.classify(1.0, 0.2), Alert::TrenchAhead);
    }

    #[test]
    fn proximity_clear_when_both_far() {
        let c = ProximityClassifier;
        assert_eq!(c.classify(1.0, 1.0), Alert::Clear);
    }

    #[test]
    fn proximity_boundary_is_exclusive() {
        let c = ProximityClassifier;
        // Exactly 0.5 m is not "< 0.5", so classification falls through to
        // the trench branch.
        assert_eq!(c.classify(0.5, 0.2), Alert::TrenchAhead);
        assert_eq!(c.classify(0.5, 0.5), Alert::Clear);
    }

    #[test]
    fn lateral_stop_on_either_side() {
        let c = LateralClassifier;
        assert_eq!(c.classify(0.4, 2.0), Alert::Stop);
        assert_eq!(c.classify(2.0, 0.4), Alert::Stop);
    }

    #[test]
    fn lateral_veers_right_when_left_crowded() {
        let c = LateralClassifier;
        assert_eq!(c.classify(0.8, 2.0), Alert::TurnRight);
    }

    #[test]
    fn lateral_clear_when_both_open() {
        let c = LateralClassifier;
        assert_eq!(c.classify(1.5, 1.5), Alert::Clear);
    }
}
