//! Boat velocity model.
//!
//! A first-order approximation of the boat under decay, drag, and oar force,
//! advanced on a fixed minimum time step so the computational rate stays
//! bounded no matter how fast the loop polls. It is intentionally not
//! physically exact: the goal is a stable, responsive readout, not a
//! hydrodynamic simulation.
//!
//! Per eligible step with `dt` seconds elapsed:
//!
//! 1. `velocity -= velocity * drift_rate * dt` (hull decay)
//! 2. `drag = velocity² * drag_coefficient`
//! 3. `velocity += (oar_force - drag) * dt`
//! 4. Smoothed velocity and stroke rate update; distance accumulates from
//!    the *smoothed* velocity so tick noise is not amplified into distance
//!    error.
//!
//! Velocity is clamped at zero after integration: the Euler decay term can
//! overshoot through zero on a long poll gap, and the sign-less drag term
//! would then push the state further negative every step.

use crate::filter::SmoothingFilter;

/// Drift/drag/force integrator with output smoothing.
///
/// Call [`step()`] every loop iteration; the update runs only when more than
/// the minimum step interval has elapsed.
///
/// [`step()`]: Self::step
#[derive(Clone, Debug)]
pub struct BoatModel {
    drift_rate: f32,
    drag_coefficient: f32,
    min_step_us: u64,

    velocity: f32,
    distance_m: f32,
    last_step_us: u64,

    vel_filter: SmoothingFilter,
    spm_filter: SmoothingFilter,
}

impl BoatModel {
    /// Creates a model at rest.
    ///
    /// `vel_window` and `spm_window` are the effective smoothing windows for
    /// the velocity and stroke-rate filters, in physics steps.
    pub fn new(
        drift_rate: f32,
        drag_coefficient: f32,
        min_step_us: u64,
        vel_window: f32,
        spm_window: f32,
    ) -> Self {
        Self {
            drift_rate,
            drag_coefficient,
            min_step_us,
            velocity: 0.0,
            distance_m: 0.0,
            last_step_us: 0,
            vel_filter: SmoothingFilter::new(vel_window),
            spm_filter: SmoothingFilter::new(spm_window),
        }
    }

    /// Advances the model when the minimum step interval has elapsed.
    ///
    /// `oar_force` is the stroke tracker's force proxy (zero during
    /// recovery), `spm_x10` its current stroke rate. Returns `true` when an
    /// update actually ran.
    pub fn step(&mut self, oar_force: f32, spm_x10: u32, now_us: u64) -> bool {
        let dt_us = now_us.saturating_sub(self.last_step_us);
        if dt_us <= self.min_step_us {
            return false;
        }
        let dt = dt_us as f32 * 1.0e-6;
        self.last_step_us = now_us;

        // Decay the boat velocity, then integrate oar force against drag.
        self.velocity -= self.velocity * self.drift_rate * dt;
        let drag = self.velocity * self.velocity * self.drag_coefficient;
        self.velocity += (oar_force - drag) * dt;
        if self.velocity < 0.0 {
            self.velocity = 0.0;
        }

        self.vel_filter.update(self.velocity);
        self.spm_filter.update(spm_x10 as f32);

        self.distance_m += self.vel_filter.value() * dt;
        true
    }

    /// Raw (unsmoothed) boat velocity, m/s.
    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Smoothed boat velocity, m/s.
    #[inline]
    pub fn smoothed_velocity(&self) -> f32 {
        self.vel_filter.value()
    }

    /// Smoothed stroke rate, strokes/minute scaled by ten.
    #[inline]
    pub fn smoothed_spm_x10(&self) -> f32 {
        self.spm_filter.value()
    }

    /// Cumulative distance, meters.
    #[inline]
    pub fn distance_m(&self) -> f32 {
        self.distance_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP_US: u64 = 10_000;

    fn model() -> BoatModel {
        BoatModel::new(0.2, 0.002, STEP_US, 512.0, 128.0)
    }

    #[test]
    fn step_is_gated_to_minimum_interval() {
        let mut model = model();
        assert!(model.step(100.0, 0, 20_000));

        // Two calls within 5 ms of the last step: at most one update runs.
        assert!(!model.step(100.0, 0, 23_000));
        assert!(!model.step(100.0, 0, 25_000));

        assert!(model.step(100.0, 0, 31_000));
    }

    #[test]
    fn exact_boundary_does_not_step() {
        let mut model = model();
        model.step(0.0, 0, 20_000);
        // Elapsed exactly equal to the minimum interval is not enough.
        assert!(!model.step(0.0, 0, 20_000 + STEP_US));
        assert!(model.step(0.0, 0, 20_001 + STEP_US));
    }

    #[test]
    fn force_accelerates_and_decay_slows() {
        let mut model = model();
        let mut now = 0;
        for _ in 0..50 {
            now += 10_001;
            model.step(100.0, 0, now);
        }
        let driven = model.velocity();
        assert!(driven > 0.0);

        // Force removed: velocity decays monotonically.
        let mut prev = driven;
        for _ in 0..50 {
            now += 10_001;
            model.step(0.0, 0, now);
            assert!(model.velocity() <= prev);
            prev = model.velocity();
        }
        assert!(model.velocity() < driven);
    }

    #[test]
    fn velocity_never_goes_negative() {
        let mut model = model();
        model.step(50.0, 0, 20_000);
        // A 30 second gap would drive the Euler decay well past zero.
        model.step(0.0, 0, 30_020_000);
        assert!(model.velocity() >= 0.0);
    }

    #[test]
    fn distance_accumulates_from_smoothed_velocity() {
        let mut model = model();
        model.step(100.0, 0, 20_000);
        let d1 = model.distance_m();
        // One step's worth of smoothed velocity times dt.
        let expected = model.smoothed_velocity() * 0.02;
        assert!((d1 - expected).abs() < 1e-6);
    }

    #[test]
    fn distance_is_monotonic() {
        let mut model = model();
        let mut now = 0;
        let mut prev = 0.0;
        for i in 0..400 {
            now += 10_001;
            let force = if i % 3 == 0 { 80.0 } else { 0.0 };
            model.step(force, 200, now);
            assert!(model.distance_m() >= prev);
            prev = model.distance_m();
        }
        // Long idle gap, still monotone.
        model.step(0.0, 0, now + 60_000_000);
        assert!(model.distance_m() >= prev);
    }

    #[test]
    fn stroke_rate_filter_tracks_input() {
        let mut model = model();
        let mut now = 0;
        for _ in 0..2_000 {
            now += 10_001;
            model.step(0.0, 250, now);
        }
        assert!((model.smoothed_spm_x10() - 250.0).abs() < 1.0);
    }
}
