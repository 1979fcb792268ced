//! One rendered distance bar's worth of state.
//!
//! A [`BarChannel`] owns the [`SlidingWindow`] for a single displayed
//! channel and translates raw range readings into a smoothed 0-100 height.
//! [`GaugeBand`] is the color banding a display applies to that height.

use crate::smoothing::SlidingWindow;

/// Window size used for displayed channels.
pub const CHANNEL_WINDOW: usize = 10;

/// Urgency banding for a bar height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeBand {
    /// Height above 75: the obstacle is close.
    Danger,
    /// Height above 35.
    Caution,
    /// Everything else, including an empty channel.
    Safe,
}

impl GaugeBand {
    /// Band for a smoothed height in `[0, 100]`.
    pub fn for_height(height: f64) -> Self {
        if height > 75.0 {
            GaugeBand::Danger
        } else if height > 35.0 {
            GaugeBand::Caution
        } else {
            GaugeBand::Safe
        }
    }
}

/// One independently smoothed display channel.
///
/// Channels are created once at the consumer's construction time and live for
/// the consumer's lifetime; the window is never shared across channels.
#[derive(Debug)]
pub struct BarChannel {
    window: SlidingWindow,
    height: f64,
}

impl BarChannel {
    pub fn new() -> Self {
        Self {
            window: SlidingWindow::new(CHANNEL_WINDOW),
            height: 0.0,
        }
    }

    /// Feed the next raw range reading (meters) and return the smoothed
    /// height.
    pub fn update(&mut self, value_m: f64) -> f64 {
        self.height = self.window.height_for(value_m);
        self.height
    }

    /// The most recently computed height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The color band for the most recent height.
    pub fn band(&self) -> GaugeBand {
        GaugeBand::for_height(self.height)
    }
}

impl Default for BarChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_thresholds() {
        assert_eq!(GaugeBand::for_height(0.0), GaugeBand::Safe);
        assert_eq!(GaugeBand::for_height(35.0), GaugeBand::Safe);
        assert_eq!(GaugeBand::for_height(36.0), GaugeBand::Caution);
        assert_eq!(GaugeBand::for_height(75.0), GaugeBand::Caution);
        assert_eq!(GaugeBand::for_height(76.0), GaugeBand::Danger);
        assert_eq!(GaugeBand::for_height(100.0), GaugeBand::Danger);
    }

    #[test]
    fn near_reading_drives_danger_band() {
        let mut bar = BarChannel::new();
        // 0.2 m -> height 90 -> danger.
        let h = bar.update(0.2);
        assert!((h - 90.0).abs() < 1e-9);
        assert_eq!(bar.band(), GaugeBand::Danger);
    }

    #[test]
    fn far_reading_stays_safe() {
        let mut bar = BarChannel::new();
        bar.update(1.9);
        assert_eq!(bar.band(), GaugeBand::Safe);
    }

    #[test]
    fn height_tracks_last_update() {
        let mut bar = BarChannel::new();
        let h = bar.update(1.0);
        assert_eq!(bar.height(), h);
    }
}
