//! Stroke timing, stroke rate, and power accounting.
//!
//! The tracker consumes the decoder's signed tick deltas. Positive deltas are
//! oar-loaded drive motion; non-positive deltas are the recovery back toward
//! the catch. A stroke begins exactly when the delta sign flips from
//! non-positive to positive, and strokes/minute comes from the elapsed time
//! between consecutive stroke starts.
//!
//! Per drive tick, the tracker derives an oar velocity proxy `1e5 / delta_us`
//! and an oar force proxy `oar_vel²`. These are empirical tuning constants
//! calibrated against the machine, not a physical model; the physics
//! integrator consumes the force proxy as-is.
//!
//! # Idle timeout
//!
//! A machine left alone produces no ticks. After one second without a tick
//! the tracker degrades to a reported idle state (zero stroke rate, zero
//! stroke power) rather than freezing the last nonzero reading. Cumulative
//! counters are untouched, and repeating the timeout is idempotent.

/// Stroke boundary, stroke power, and cadence state.
///
/// Feed decoded ticks via [`on_tick()`] and no-tick iterations via
/// [`on_no_tick()`]; read the derived values through the accessors.
///
/// [`on_tick()`]: Self::on_tick
/// [`on_no_tick()`]: Self::on_no_tick
#[derive(Clone, Debug)]
pub struct StrokeTracker {
    /// Ticks shorter than this are sensor noise.
    min_tick_us: i64,
    /// No ticks for this long forces the idle state.
    idle_timeout_us: u64,

    last_delta_us: i64,
    /// Set once the first real tick has been consumed; the first drive tick
    /// anchors the stroke start without reporting a boundary.
    seen_tick: bool,
    stroke_start_us: u64,
    stroke_power: f32,
    spm_x10: u32,
    /// Drive ticks in the current stroke.
    ticks: u32,
    /// Drive ticks in the previous stroke.
    last_ticks: u32,
    /// Cumulative count of completed drive runs.
    tick_count: u32,
    /// Timestamp of the most recent counted tick.
    tick_time_us: u64,
    /// Timestamp of the last accepted tick or timeout event.
    last_update_us: u64,

    oar_vel: f32,
    oar_force: f32,
}

impl StrokeTracker {
    /// Creates a tracker with the given noise floor and idle timeout.
    pub fn new(min_tick_us: i64, idle_timeout_us: u64) -> Self {
        Self {
            min_tick_us,
            idle_timeout_us,
            last_delta_us: 0,
            seen_tick: false,
            stroke_start_us: 0,
            stroke_power: 0.0,
            spm_x10: 0,
            ticks: 0,
            last_ticks: 0,
            tick_count: 0,
            tick_time_us: 0,
            last_update_us: 0,
            oar_vel: 0.0,
            oar_force: 0.0,
        }
    }

    /// Consumes one decoded tick delta.
    ///
    /// Returns `true` when this tick starts a new stroke. Deltas below the
    /// noise floor are discarded with no state change at all.
    pub fn on_tick(&mut self, delta_us: i64, now_us: u64) -> bool {
        if delta_us.unsigned_abs() < self.min_tick_us as u64 {
            return false;
        }

        let mut boundary = false;
        if delta_us > 0 {
            self.oar_vel = 1.0e5 / delta_us as f32;
            self.oar_force = self.oar_vel * self.oar_vel;

            if self.last_delta_us <= 0 {
                if self.seen_tick {
                    // Sign change: this is the start of a new stroke.
                    let stroke_delta = now_us - self.stroke_start_us;
                    if stroke_delta > 0 {
                        self.spm_x10 = (600_000_000 / stroke_delta) as u32;
                    }
                    self.stroke_start_us = now_us;
                    self.stroke_power = 0.0;
                    self.last_ticks = self.ticks;
                    self.ticks = 0;
                    boundary = true;
                } else {
                    // First tick ever: anchor the stroke clock, nothing to
                    // report a rate against yet.
                    self.stroke_start_us = now_us;
                }
            }

            self.stroke_power += self.oar_force;
            self.ticks += 1;
        } else {
            self.mark_recovery(now_us);
        }

        self.seen_tick = true;
        self.last_delta_us = delta_us;
        self.last_update_us = now_us;
        boundary
    }

    /// Called on iterations that produced no tick.
    ///
    /// Once a full second has passed since the last accepted tick, the
    /// reported stroke rate and power are forced to zero. The timeout then
    /// re-fires every second while the machine stays idle, which changes
    /// nothing further.
    pub fn on_no_tick(&mut self, now_us: u64) {
        if now_us.saturating_sub(self.last_update_us) < self.idle_timeout_us {
            return;
        }
        self.spm_x10 = 0;
        self.stroke_power = 0.0;
        self.mark_recovery(now_us);
        self.last_delta_us = 0;
        self.last_update_us = now_us;
    }

    /// Recovery-phase bookkeeping: the first call after a drive run counts
    /// the completed run and stamps it; oar proxies drop to zero.
    fn mark_recovery(&mut self, now_us: u64) {
        if self.oar_vel > 0.0 {
            self.tick_time_us = now_us;
            self.tick_count += 1;
        }
        self.oar_vel = 0.0;
        self.oar_force = 0.0;
    }

    /// Strokes per minute, scaled by ten.
    #[inline]
    pub fn spm_x10(&self) -> u32 {
        self.spm_x10
    }

    /// Oar force proxy for the physics integrator; zero during recovery.
    #[inline]
    pub fn oar_force(&self) -> f32 {
        self.oar_force
    }

    /// Accumulated force over the current stroke.
    #[inline]
    pub fn stroke_power(&self) -> f32 {
        self.stroke_power
    }

    /// Drive tick count of the current stroke.
    #[inline]
    pub fn stroke_ticks(&self) -> u32 {
        self.ticks
    }

    /// Drive tick count of the previous stroke.
    #[inline]
    pub fn previous_stroke_ticks(&self) -> u32 {
        self.last_ticks
    }

    /// Cumulative count of completed drive runs.
    #[inline]
    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    /// Timestamp of the most recent counted tick, microseconds.
    #[inline]
    pub fn tick_time_us(&self) -> u64 {
        self.tick_time_us
    }
}
