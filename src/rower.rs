//! Main monitor that coordinates decoding, stroke timing, and physics.
//!
//! This module provides [`RowerMonitor`], the central component driven from
//! the hot loop, and [`RowerState`], the snapshot handed to the display and
//! publisher.
//!
//! # Overview
//!
//! Each loop iteration calls [`poll()`] with one sample of the two sensor
//! channels and the microsecond clock. The monitor:
//!
//! 1. Advances the boat model (gated to its minimum step) using the stroke
//!    tracker's current force and rate,
//! 2. Feeds the sample to the quadrature decoder,
//! 3. Routes the decoded tick, or the absence of one, to the stroke
//!    tracker.
//!
//! There are no suspension points and no allocation on this path; the two
//! rate gates (physics step, publish interval) skip work rather than block.
//!
//! [`poll()`]: RowerMonitor::poll
//!
//! # Example
//!
//! ```rust
//! use bluerow::{Config, RowerMonitor};
//!
//! let mut monitor = RowerMonitor::new(&Config::default());
//!
//! // Idle level, then one positive pulse window (A falls before B).
//! monitor.poll(true, true, 0);
//! monitor.poll(false, true, 100_000);
//! let result = monitor.poll(false, false, 105_000);
//! assert_eq!(result.tick.unwrap().delta_us, 5_000);
//! ```
//!
//! # Thread Safety
//!
//! The monitor is not thread-safe and is not meant to be: decoder writes,
//! stroke updates, and state reads must stay on one logical thread, or the
//! sign-reversal stroke detection would see torn state. Drive it from a
//! single task and copy [`RowerState`] snapshots out.

use core::fmt::Write as _;

use crate::config::Config;
use crate::decoder::{QuadratureDecoder, Tick};
use crate::physics::BoatModel;
use crate::stroke::StrokeTracker;

/// Outcome of one loop iteration, for callers that log or test.
#[derive(Clone, Copy, Debug, Default)]
pub struct Poll {
    /// The tick decoded from this sample, if any.
    pub tick: Option<Tick>,
    /// True when this iteration started a new stroke.
    pub stroke_started: bool,
    /// True when the physics step actually ran.
    pub physics_stepped: bool,
}

/// Main rowing monitor.
///
/// Owns the decoder, stroke tracker, and boat model, and drives them in
/// order once per loop iteration. This is the primary interface of the core.
pub struct RowerMonitor {
    decoder: QuadratureDecoder,
    stroke: StrokeTracker,
    boat: BoatModel,
}

impl RowerMonitor {
    /// Creates a monitor from the given configuration.
    pub fn new(config: &Config) -> Self {
        let cal = &config.calibration;
        Self {
            decoder: QuadratureDecoder::new(cal.debounce_us),
            stroke: StrokeTracker::new(cal.min_tick_us, cal.idle_timeout_us),
            boat: BoatModel::new(
                cal.drift_rate,
                cal.drag_coefficient,
                cal.physics_step_us,
                cal.vel_smoothing,
                cal.spm_smoothing,
            ),
        }
    }

    /// Drives one loop iteration.
    ///
    /// `a` and `b` are the sampled channel levels (`true` = high, the idle
    /// level), `now_us` the monotonic microsecond clock.
    pub fn poll(&mut self, a: bool, b: bool, now_us: u64) -> Poll {
        // Physics first, consuming the force the previous ticks left behind.
        let physics_stepped = self
            .boat
            .step(self.stroke.oar_force(), self.stroke.spm_x10(), now_us);

        let tick = self.decoder.poll(a, b, now_us);
        let stroke_started = match tick {
            Some(tick) => self.stroke.on_tick(tick.delta_us, now_us),
            None => {
                self.stroke.on_no_tick(now_us);
                false
            }
        };

        Poll {
            tick,
            stroke_started,
            physics_stepped,
        }
    }

    /// Returns a snapshot of the current readouts.
    pub fn state(&self) -> RowerState {
        RowerState {
            velocity_mps: self.boat.smoothed_velocity(),
            raw_velocity_mps: self.boat.velocity(),
            stroke_rate_spm: self.boat.smoothed_spm_x10() / 10.0,
            stroke_power: self.stroke.stroke_power(),
            distance_m: self.boat.distance_m(),
            stroke_ticks: self.stroke.stroke_ticks(),
            tick_count: self.stroke.tick_count(),
            last_tick_us: self.stroke.tick_time_us(),
        }
    }
}

/// Readout snapshot for the display, publisher, and diagnostics.
///
/// Implements `serde::Serialize` when the `serde` feature is enabled.
///
/// # Example
///
/// ```rust
/// use bluerow::{Config, RowerMonitor};
///
/// let monitor = RowerMonitor::new(&Config::default());
/// let state = monitor.state();
/// assert_eq!(state.distance_m, 0.0);
/// assert_eq!(state.tick_count, 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowerState {
    /// Smoothed boat velocity, m/s.
    pub velocity_mps: f32,
    /// Raw boat velocity, m/s.
    pub raw_velocity_mps: f32,
    /// Smoothed stroke rate, strokes/minute.
    pub stroke_rate_spm: f32,
    /// Accumulated force over the current stroke.
    pub stroke_power: f32,
    /// Cumulative distance, meters.
    pub distance_m: f32,
    /// Drive ticks in the current stroke.
    pub stroke_ticks: u32,
    /// Cumulative count of completed drive runs.
    pub tick_count: u32,
    /// Timestamp of the most recent counted tick, µs.
    pub last_tick_us: u64,
}

impl RowerState {
    /// Renders the snapshot as a comma-separated diagnostic line.
    ///
    /// Field order: stroke rate, cumulative ticks, smoothed velocity, stroke
    /// power, distance. Allocation-free, so binaries can log it from the hot
    /// loop's slow path.
    pub fn telemetry_line(&self) -> heapless::String<96> {
        let mut line = heapless::String::new();
        // 96 bytes always fits the formatted fields; a write error would
        // only truncate the line.
        let _ = write!(
            &mut line,
            "{:.1},{},{:.1},{:.0},{:.1}",
            self.stroke_rate_spm,
            self.tick_count,
            self.velocity_mps,
            self.stroke_power,
            self.distance_m,
        );
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> RowerMonitor {
        RowerMonitor::new(&Config::default())
    }

    /// Drives one pulse window producing a tick of the given signed delta,
    /// ending at `end_us`.
    fn pulse(monitor: &mut RowerMonitor, end_us: u64, delta_us: i64) -> Poll {
        let magnitude = delta_us.unsigned_abs();
        let start = end_us - magnitude;
        if delta_us > 0 {
            monitor.poll(false, true, start);
            let result = monitor.poll(false, false, end_us);
            monitor.poll(true, true, end_us + 1_000);
            result
        } else {
            monitor.poll(true, false, start);
            let result = monitor.poll(false, false, end_us);
            monitor.poll(true, true, end_us + 1_000);
            result
        }
    }

    #[test]
    fn poll_decodes_and_routes_ticks() {
        let mut monitor = monitor();
        monitor.poll(true, true, 0);

        let result = pulse(&mut monitor, 100_000, 5_000);
        assert_eq!(result.tick.unwrap().delta_us, 5_000);
        assert_eq!(monitor.state().stroke_ticks, 1);
        assert!(monitor.state().stroke_power > 0.0);
    }

    #[test]
    fn stroke_boundary_reported_on_sign_reversal() {
        let mut monitor = monitor();
        monitor.poll(true, true, 0);

        assert!(!pulse(&mut monitor, 200_000, 5_000).stroke_started);
        assert!(!pulse(&mut monitor, 400_000, -6_000).stroke_started);
        assert!(pulse(&mut monitor, 2_200_000, 5_000).stroke_started);
    }

    #[test]
    fn physics_runs_even_without_ticks() {
        let mut monitor = monitor();
        let mut stepped = 0;
        for i in 1..=100u64 {
            if monitor.poll(true, true, i * 2_000).physics_stepped {
                stepped += 1;
            }
        }
        // 2 ms polls against a 10 ms gate: roughly every sixth poll steps.
        assert!(stepped > 10 && stepped < 25);
    }

    #[test]
    fn idle_monitor_reports_zeroes() {
        let mut monitor = monitor();
        for i in 0..2_000u64 {
            monitor.poll(true, true, i * 5_000);
        }
        let state = monitor.state();
        assert_eq!(state.velocity_mps, 0.0);
        assert_eq!(state.stroke_rate_spm, 0.0);
        assert_eq!(state.stroke_power, 0.0);
        assert_eq!(state.distance_m, 0.0);
    }

    #[test]
    fn rowing_builds_velocity_and_distance() {
        let mut monitor = monitor();
        let mut now = 10_000u64;
        monitor.poll(true, true, now);

        // A minute of steady strokes: six drive ticks then four recovery
        // ticks, 100 ms apart.
        for _ in 0..60 {
            for _ in 0..6 {
                now += 100_000;
                pulse(&mut monitor, now, 5_000);
            }
            for _ in 0..4 {
                now += 100_000;
                pulse(&mut monitor, now, -5_000);
            }
        }

        let state = monitor.state();
        assert!(state.raw_velocity_mps > 0.0);
        assert!(state.velocity_mps > 0.0);
        assert!(state.stroke_rate_spm > 0.0);
        assert!(state.distance_m > 0.0);
        assert_eq!(state.tick_count, 60);
    }

    #[test]
    fn telemetry_line_formats_fields() {
        let state = RowerState {
            velocity_mps: 2.25,
            raw_velocity_mps: 2.3,
            stroke_rate_spm: 23.96,
            stroke_power: 180.4,
            distance_m: 1234.56,
            stroke_ticks: 3,
            tick_count: 42,
            last_tick_us: 0,
        };
        assert_eq!(state.telemetry_line().as_str(), "24.0,42,2.2,180,1234.6");
    }
}
