//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for the hardware and collaborator
//! traits, enabling development and testing on desktop without a rowing
//! machine attached.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockQuadrature`] | [`QuadratureInput`] | Settable/scripted channel levels |
//! | [`MockClock`] | [`Clock`] | Controllable microsecond time source |
//! | [`MockBroadcaster`] | [`FitnessBroadcaster`] | Captures published records |
//! | [`MockDisplay`] | [`RowerDisplay`] | Tracks render calls |
//!
//! # Example
//!
//! ```rust
//! use bluerow::{Config, RowerMonitor};
//! use bluerow::hal::{MockClock, MockQuadrature};
//! use bluerow::traits::{Clock, QuadratureInput};
//!
//! let mut quad = MockQuadrature::new();
//! let mut clock = MockClock::new();
//! let mut monitor = RowerMonitor::new(&Config::default());
//!
//! quad.set_levels(false, true); // channel A pulled low
//! clock.advance(100_000);
//!
//! let (a, b) = quad.sample();
//! monitor.poll(a, b, clock.now_us());
//! ```
//!
//! [`QuadratureInput`]: crate::traits::QuadratureInput
//! [`Clock`]: crate::traits::Clock
//! [`FitnessBroadcaster`]: crate::traits::FitnessBroadcaster
//! [`RowerDisplay`]: crate::traits::RowerDisplay

use crate::traits::{Clock, FitnessBroadcaster, QuadratureInput, RowerDisplay};
use crate::wire::{CadenceRecord, MotionRecord};

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

// ============================================================================
// Hardware Mocks
// ============================================================================

/// Mock quadrature sensor for testing.
///
/// Holds a current level pair and an optional script of upcoming samples.
/// Scripted samples are consumed first, in queue order; once the script is
/// empty, `sample()` keeps returning the current levels.
///
/// # Example
///
/// ```rust
/// use bluerow::hal::MockQuadrature;
/// use bluerow::traits::QuadratureInput;
///
/// let mut quad = MockQuadrature::new();
/// assert_eq!(quad.sample(), (true, true)); // idle level by default
///
/// quad.queue_samples(&[(false, true), (false, false)]);
/// assert_eq!(quad.sample(), (false, true));
/// assert_eq!(quad.sample(), (false, false));
/// assert_eq!(quad.sample(), (false, false)); // script drained: last held
/// ```
#[derive(Debug)]
pub struct MockQuadrature {
    levels: (bool, bool),
    script: Vec<(bool, bool)>,
    next: usize,
}

impl MockQuadrature {
    /// Creates a mock sensor at idle level (both channels high).
    pub fn new() -> Self {
        Self {
            levels: (true, true),
            script: Vec::new(),
            next: 0,
        }
    }

    /// Sets the current channel levels.
    pub fn set_levels(&mut self, a: bool, b: bool) {
        self.levels = (a, b);
    }

    /// Queues samples to be returned in order before the current levels.
    pub fn queue_samples(&mut self, samples: &[(bool, bool)]) {
        self.script.extend_from_slice(samples);
    }
}

impl Default for MockQuadrature {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadratureInput for MockQuadrature {
    fn sample(&mut self) -> (bool, bool) {
        if self.next < self.script.len() {
            self.levels = self.script[self.next];
            self.next += 1;
        }
        self.levels
    }
}

/// Mock clock for testing.
///
/// Provides a controllable microsecond time source for testing
/// time-dependent behavior.
///
/// # Example
///
/// ```rust
/// use bluerow::hal::MockClock;
/// use bluerow::traits::Clock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_us(), 0);
///
/// clock.set(1_000_000);
/// assert_eq!(clock.now_us(), 1_000_000);
///
/// clock.advance(500);
/// assert_eq!(clock.now_us(), 1_000_500);
/// ```
#[derive(Debug)]
pub struct MockClock {
    current_us: u64,
}

impl MockClock {
    /// Creates a new mock clock starting at 0 µs.
    pub fn new() -> Self {
        Self { current_us: 0 }
    }

    /// Sets the current time in microseconds.
    pub fn set(&mut self, us: u64) {
        self.current_us = us;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, us: u64) {
        self.current_us += us;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now_us(&self) -> u64 {
        self.current_us
    }
}

// ============================================================================
// Collaborator Mocks
// ============================================================================

/// Mock broadcast collaborator for testing.
///
/// Records every published payload for verification, and can be configured
/// to fail for error-path tests.
///
/// # Example
///
/// ```rust
/// use bluerow::hal::MockBroadcaster;
/// use bluerow::traits::FitnessBroadcaster;
/// use bluerow::wire::MotionRecord;
///
/// let mut broadcaster = MockBroadcaster::new();
/// broadcaster.publish_motion(&MotionRecord::new(1.0, 20.0, 100.0)).unwrap();
/// assert_eq!(broadcaster.motion.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockBroadcaster {
    /// Motion records that have been published.
    pub motion: Vec<MotionRecord>,
    /// Cadence records that have been published.
    pub cadence: Vec<CadenceRecord>,
    /// When set, every publish fails.
    pub fail: bool,
}

impl MockBroadcaster {
    /// Creates a new mock broadcaster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every publish return an error.
    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl FitnessBroadcaster for MockBroadcaster {
    type Error = ();

    fn publish_motion(&mut self, record: &MotionRecord) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.motion.push(*record);
        Ok(())
    }

    fn publish_cadence(&mut self, record: &CadenceRecord) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.cadence.push(*record);
        Ok(())
    }
}

// ============================================================================
// Display Mocks
// ============================================================================

/// Mock display for testing readout rendering.
///
/// Tracks render calls and stores the last rendered readouts for
/// verification.
///
/// # Example
///
/// ```rust
/// use bluerow::hal::MockDisplay;
/// use bluerow::traits::RowerDisplay;
///
/// let mut display = MockDisplay::new();
/// display.init().unwrap();
/// display.render(24.0, 2.5).unwrap();
/// assert_eq!(display.last_readouts, Some((24.0, 2.5)));
/// ```
#[derive(Debug, Default)]
pub struct MockDisplay {
    /// The last `(stroke_rate, velocity)` pair that was rendered.
    pub last_readouts: Option<(f32, f32)>,
    /// Number of times render() was called.
    pub render_count: usize,
    /// Last message shown via show_message().
    pub last_message: Option<(String, Option<String>)>,
    /// Whether init() was called.
    pub initialized: bool,
}

impl MockDisplay {
    /// Creates a new mock display.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RowerDisplay for MockDisplay {
    type Error = ();

    fn init(&mut self) -> Result<(), ()> {
        self.initialized = true;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ()> {
        self.last_readouts = None;
        Ok(())
    }

    fn render(&mut self, stroke_rate_spm: f32, velocity_mps: f32) -> Result<(), ()> {
        self.last_readouts = Some((stroke_rate_spm, velocity_mps));
        self.render_count += 1;
        Ok(())
    }

    fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), ()> {
        self.last_message = Some((line1.into(), line2.map(Into::into)));
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // MockQuadrature Tests
    // =========================================================================

    #[test]
    fn mock_quadrature_starts_at_idle_level() {
        let mut quad = MockQuadrature::new();
        assert_eq!(quad.sample(), (true, true));
    }

    #[test]
    fn mock_quadrature_set_levels() {
        let mut quad = MockQuadrature::new();
        quad.set_levels(false, true);
        assert_eq!(quad.sample(), (false, true));
        assert_eq!(quad.sample(), (false, true));
    }

    #[test]
    fn mock_quadrature_script_plays_in_order_then_holds() {
        let mut quad = MockQuadrature::new();
        quad.queue_samples(&[(false, true), (false, false), (true, true)]);

        assert_eq!(quad.sample(), (false, true));
        assert_eq!(quad.sample(), (false, false));
        assert_eq!(quad.sample(), (true, true));
        assert_eq!(quad.sample(), (true, true));
    }

    // =========================================================================
    // MockClock Tests
    // =========================================================================

    #[test]
    fn mock_clock_default() {
        let clock = MockClock::new();
        assert_eq!(clock.now_us(), 0);
    }

    #[test]
    fn mock_clock_set_and_advance() {
        let mut clock = MockClock::new();
        clock.set(1_000);
        assert_eq!(clock.now_us(), 1_000);
        clock.advance(250);
        assert_eq!(clock.now_us(), 1_250);
    }

    // =========================================================================
    // MockBroadcaster Tests
    // =========================================================================

    #[test]
    fn mock_broadcaster_captures_records() {
        let mut broadcaster = MockBroadcaster::new();
        broadcaster
            .publish_motion(&MotionRecord::new(2.0, 24.0, 150.0))
            .unwrap();
        broadcaster
            .publish_cadence(&CadenceRecord::new(10, 1_000_000, 30, 900_000))
            .unwrap();

        assert_eq!(broadcaster.motion.len(), 1);
        assert_eq!(broadcaster.cadence.len(), 1);
        assert_eq!(broadcaster.cadence[0].wheel_count, 10);
    }

    #[test]
    fn mock_broadcaster_failure_mode() {
        let mut broadcaster = MockBroadcaster::new().with_failure();
        assert!(broadcaster
            .publish_motion(&MotionRecord::new(0.0, 0.0, 0.0))
            .is_err());
        assert!(broadcaster
            .publish_cadence(&CadenceRecord::new(0, 0, 0, 0))
            .is_err());
        assert!(broadcaster.motion.is_empty());
    }

    // =========================================================================
    // MockDisplay Tests
    // =========================================================================

    #[test]
    fn mock_display_default() {
        let display = MockDisplay::new();
        assert!(display.last_readouts.is_none());
        assert_eq!(display.render_count, 0);
        assert!(!display.initialized);
    }

    #[test]
    fn mock_display_render_tracks_calls() {
        let mut display = MockDisplay::new();
        display.init().unwrap();
        assert!(display.initialized);

        display.render(22.5, 3.1).unwrap();
        display.render(23.0, 3.2).unwrap();
        assert_eq!(display.render_count, 2);
        assert_eq!(display.last_readouts, Some((23.0, 3.2)));

        display.clear().unwrap();
        assert!(display.last_readouts.is_none());
    }

    #[test]
    fn mock_display_show_message() {
        let mut display = MockDisplay::new();
        display.show_message("BlueRow", Some("Starting...")).unwrap();

        let (line1, line2) = display.last_message.as_ref().unwrap();
        assert_eq!(line1, "BlueRow");
        assert_eq!(line2.as_deref(), Some("Starting..."));
    }
}
