//! Per-channel sliding-window smoothing with drop-out holdoff.
//!
//! A [`SlidingWindow`] sits between raw readings and any consumer that needs
//! a de-noised value for rendering. It keeps the last `capacity` samples,
//! exposes their arithmetic mean, and converts the mean into a 0-100 bar
//! height with an inverted normalization (near obstacle = tall bar).
//!
//! A single zero reading (sensor glitch, momentary miss) must not cause the
//! displayed bar to flicker to empty: when the window average collapses to
//! zero, [`height_for`][SlidingWindow::height_for] keeps returning the
//! previous height until [`DROPOUT_HOLDOFF`] consecutive zero-average ticks
//! have passed, and only then decays to `0.0`.
//!
//! # Example
//!
//! ```rust
//! use sightline_perception::smoothing::SlidingWindow;
//!
//! let mut window = SlidingWindow::new(10);
//! window.enqueue(1.0);
//! window.enqueue(1.5);
//! assert!((window.average() - 1.25).abs() < 1e-9);
//! ```

use std::collections::VecDeque;

use tracing::debug;

/// Consecutive zero-average ticks tolerated before a displayed height decays
/// to empty.
pub const DROPOUT_HOLDOFF: u32 = 5;

/// Maximum meaningful range in meters; averages at or beyond this render as
/// an empty bar.
pub const MAX_RANGE_M: f64 = 2.0;

/// Bounded FIFO numeric buffer with mean and drop-out holdoff.
///
/// One window per channel (obstacle/trench or left/right), owned exclusively
/// by its consumer and never reset mid-life; drop-out recovery is handled by
/// the stale counter, not by clearing the buffer.
#[derive(Debug)]
pub struct SlidingWindow {
    capacity: usize,
    contents: VecDeque<f64>,
    stale_ticks: u32,
    last_height: f64,
}

impl SlidingWindow {
    /// Create a window holding at most `capacity` samples (floored at 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            contents: VecDeque::with_capacity(capacity),
            stale_ticks: 0,
            last_height: 0.0,
        }
    }

    /// Append `value`, evicting the oldest sample first when full.
    pub fn enqueue(&mut self, value: f64) {
        if self.contents.len() + 1 > self.capacity {
            self.contents.pop_front();
        }
        self.contents.push_back(value);
    }

    /// Arithmetic mean of the current contents; `0.0` when empty.
    pub fn average(&self) -> f64 {
        if self.contents.is_empty() {
            return 0.0;
        }
        self.contents.iter().sum::<f64>() / self.contents.len() as f64
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Whether no samples have been enqueued yet.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Enqueue `value` and return the smoothed bar height in `[0, 100]`.
    ///
    /// While the window average is positive the height is recomputed as
    /// `(1 - clamp(avg, 0, MAX_RANGE_M) / MAX_RANGE_M) * 100` and the stale
    /// counter resets. When the average collapses to zero the previous
    /// height is held for up to [`DROPOUT_HOLDOFF`] consecutive ticks, after
    /// which the channel reads as empty.
    pub fn height_for(&mut self, value: f64) -> f64 {
        self.enqueue(value);
        let avg = self.average();
        if avg > 0.0 {
            self.last_height = (1.0 - avg.clamp(0.0, MAX_RANGE_M) / MAX_RANGE_M) * 100.0;
            self.stale_ticks = 0;
            self.last_height
        } else {
            self.stale_ticks = self.stale_ticks.saturating_add(1);
            if self.stale_ticks >= DROPOUT_HOLDOFF {
                if self.stale_ticks == DROPOUT_HOLDOFF {
                    debug!("channel stale beyond holdoff, decaying to empty");
                }
                0.0
            } else {
                self.last_height
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_fresh_window_is_zero() {
        let window = SlidingWindow::new(10);
        assert_eq!(window.average(), 0.0);
        assert!(window.is_empty());
    }

    #[test]
    fn average_matches_mean_below_capacity() {
        let mut window = SlidingWindow::new(5);
        for v in [0.5, 1.0, 1.5] {
            window.enqueue(v);
        }
        assert_eq!(window.len(), 3);
        assert!((window.average() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn overflow_keeps_only_last_capacity_values() {
        let mut window = SlidingWindow::new(3);
        for v in [10.0, 20.0, 1.0, 2.0, 3.0] {
            window.enqueue(v);
        }
        // Only [1.0, 2.0, 3.0] remain.
        assert_eq!(window.len(), 3);
        assert!((window.average() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn capacity_is_floored_at_one() {
        let mut window = SlidingWindow::new(0);
        window.enqueue(1.0);
        window.enqueue(2.0);
        assert_eq!(window.len(), 1);
        assert!((window.average() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn height_inverts_and_normalizes_average() {
        let mut window = SlidingWindow::new(4);
        // Average 1.0 m over a 2.0 m range -> half-full bar.
        assert!((window.height_for(1.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn height_clamps_beyond_max_range() {
        let mut window = SlidingWindow::new(1);
        // 5 m is clamped to the 2 m range -> empty bar.
        assert!((window.height_for(5.0) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn dropout_holds_height_then_collapses() {
        let mut window = SlidingWindow::new(1);
        let held = window.height_for(1.0);
        assert!((held - 50.0).abs() < 1e-9);

        // Four consecutive zero readings keep returning the held height.
        for _ in 0..4 {
            assert!((window.height_for(0.0) - held).abs() < 1e-9);
        }
        // The fifth collapses the channel to empty.
        assert_eq!(window.height_for(0.0), 0.0);
    }

    #[test]
    fn nonzero_reading_recovers_after_collapse() {
        let mut window = SlidingWindow::new(1);
        window.height_for(1.0);
        for _ in 0..5 {
            window.height_for(0.0);
        }
        // A real reading resets the stale counter and recomputes.
        assert!((window.height_for(0.5) - 75.0).abs() < 1e-9);
        // And the holdoff starts over from scratch.
        assert!((window.height_for(0.0) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn mixed_window_with_positive_average_is_not_stale() {
        let mut window = SlidingWindow::new(4);
        window.height_for(1.0);
        // A zero sample that leaves the average positive recomputes normally.
        let h = window.height_for(0.0);
        // Average is 0.5 -> height 75.
        assert!((h - 75.0).abs() < 1e-9);
    }
}
