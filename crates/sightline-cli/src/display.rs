//! Terminal distance gauge.
//!
//! Renders each published state as one console line: two smoothed,
//! color-banded bars (obstacle and trench channels), the raw metrics, and
//! the current alert. Non-finite values render as `--`.

use colored::{ColoredString, Colorize};
use sightline_perception::{BarChannel, GaugeBand};
use sightline_types::CanonicalState;

/// Bar width in character cells; each cell covers 10 height units.
const BAR_CELLS: usize = 10;

/// Owns the smoothing state of the two rendered channels.
pub struct Dashboard {
    obstacle: BarChannel,
    trench: BarChannel,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            obstacle: BarChannel::new(),
            trench: BarChannel::new(),
        }
    }

    /// Fold one state into the gauges and return the rendered line.
    pub fn render(&mut self, state: &CanonicalState) -> String {
        let obstacle_h = self.obstacle.update(state.obstacle_m);
        let trench_h = self.trench.update(state.trench_m);
        format!(
            "obstacle {} {:>5} m  trench {} {:>5} m  angle {:>4}  alert: {}",
            bar(obstacle_h),
            fmt_metric(state.obstacle_m),
            bar(trench_h),
            fmt_metric(state.trench_m),
            fmt_angle(state.angle_deg),
            state.alert,
        )
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a distance, `--` when unknown.
fn fmt_metric(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        "--".to_string()
    }
}

/// Format the heading angle, `--` when unknown.
fn fmt_angle(value: f64) -> String {
    if value.is_finite() {
        format!("{:.0}°", value)
    } else {
        "--".to_string()
    }
}

/// A fixed-width bar colored by urgency band.
fn bar(height: f64) -> ColoredString {
    let cells = ((height / 100.0) * BAR_CELLS as f64).round() as usize;
    let cells = cells.min(BAR_CELLS);
    let filled = format!("[{:<width$}]", "#".repeat(cells), width = BAR_CELLS);
    match GaugeBand::for_height(height) {
        GaugeBand::Danger => filled.red(),
        GaugeBand::Caution => filled.yellow(),
        GaugeBand::Safe => filled.green(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_types::Alert;

    #[test]
    fn metrics_format_with_two_decimals() {
        assert_eq!(fmt_metric(0.25), "0.25");
        assert_eq!(fmt_metric(2.0), "2.00");
    }

    #[test]
    fn unknown_values_render_as_dashes() {
        assert_eq!(fmt_metric(f64::NAN), "--");
        assert_eq!(fmt_metric(f64::INFINITY), "--");
        assert_eq!(fmt_angle(f64::NAN), "--");
    }

    #[test]
    fn render_includes_alert_and_metrics() {
        let mut dashboard = Dashboard::new();
        let line = dashboard.render(&CanonicalState {
            obstacle_m: 0.30,
            trench_m: 1.50,
            angle_deg: 90.0,
            alert: Alert::ObstacleAhead,
        });
        assert!(line.contains("obstacle ahead"));
        assert!(line.contains("0.30"));
        assert!(line.contains("1.50"));
        assert!(line.contains("90°"));
    }

    #[test]
    fn lateral_state_renders_unknown_angle() {
        let mut dashboard = Dashboard::new();
        let line = dashboard.render(&CanonicalState::lateral(0.8, 1.4, Alert::TurnRight));
        assert!(line.contains("--"));
        assert!(line.contains("turn right"));
    }

    #[test]
    fn bar_fills_proportionally() {
        // Height 50 -> half the cells.
        let rendered = bar(50.0).to_string();
        assert!(rendered.contains(&"#".repeat(5)));
        assert!(!rendered.contains(&"#".repeat(6)));
    }
}
