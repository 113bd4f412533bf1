//! Hardware abstraction traits for the quadrature sensor and time source.
//!
//! This module defines the platform-facing interfaces that allow bluerow to
//! work across different targets (ESP32, desktop mocks, etc.).
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`QuadratureInput`] | Samples the two flywheel sensor channels |
//! | [`Clock`] | Monotonic microsecond time source |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For ESP32 hardware, use the
//! implementations from `hal::esp32` (requires `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use bluerow::traits::{Clock, QuadratureInput};
//! use bluerow::hal::{MockClock, MockQuadrature};
//!
//! let mut quad = MockQuadrature::new();
//! let clock = MockClock::new();
//!
//! let (a, b) = quad.sample();
//! assert!(a && b); // idle level: both channels pulled high
//! assert_eq!(clock.now_us(), 0);
//! ```

/// Quadrature sensor input trait.
///
/// Abstracts the two digital channels of the flywheel sensor. The sensor is
/// active-low: each channel is pulled high at idle and pulled low while the
/// magnet passes, so `(true, true)` is the idle level.
///
/// # Implementation Notes
///
/// - Both channels must be read in the same call so a single poll sees one
///   consistent sample
/// - No debouncing is required here; the decoder rejects mechanical chatter
///   with its own edge-timestamp window
pub trait QuadratureInput {
    /// Samples both channel levels as `(a, b)`, `true` = electrically high.
    fn sample(&mut self) -> (bool, bool);
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in microseconds for edge timestamping, physics
/// step gating, and publish rate gating. On desktop, this can wrap
/// `std::time::Instant`. On embedded, use a hardware timer.
///
/// # Example
///
/// ```rust
/// use bluerow::traits::Clock;
/// use bluerow::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_us(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_us(), 100);
/// ```
pub trait Clock {
    /// Returns current time in microseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_us(&self) -> u64;
}
