//! Exponential smoothing filters for output stability.
//!
//! Raw boat velocity and stroke rate jitter with every tick; the readouts and
//! broadcast payloads use smoothed values instead. The smoother is a simple
//! exponential moving average with a configurable effective window:
//!
//! ```text
//! smoothed = (smoothed * N + raw) / (N + 1)
//! ```
//!
//! applied once per physics step. Larger `N` means slower response and less
//! jitter. The defaults are `N = 512` steps for velocity and `N = 128` steps
//! for stroke rate (see [`crate::config::CalibrationConfig`]).

/// Exponential moving average with a configurable effective window.
///
/// # Example
///
/// ```rust
/// use bluerow::SmoothingFilter;
///
/// let mut filter = SmoothingFilter::new(1.0);
/// assert_eq!(filter.update(2.0), 1.0); // (0 * 1 + 2) / 2
/// assert_eq!(filter.update(2.0), 1.5);
/// ```
#[derive(Clone, Debug)]
pub struct SmoothingFilter {
    window: f32,
    value: f32,
}

impl SmoothingFilter {
    /// Creates a filter with the given effective window, starting at zero.
    pub fn new(window: f32) -> Self {
        Self { window, value: 0.0 }
    }

    /// Folds a raw sample into the average and returns the smoothed value.
    pub fn update(&mut self, raw: f32) -> f32 {
        self.value = (self.value * self.window + raw) / (self.window + 1.0);
        self.value
    }

    /// Returns the current smoothed value without updating.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Resets the filter back to zero.
    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}
