//! Shared configuration system for desktop and ESP32.
//!
//! All tunables are compile-time constants in spirit: a [`Config`] is built
//! once at startup and never mutated afterwards. Uses `heapless::String` for
//! `no_std` compatibility while remaining ergonomic on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use bluerow::{BroadcastConfig, CalibrationConfig, Config};
//!
//! // Use defaults
//! let config = Config::default();
//!
//! // Or customize
//! let config = Config::default()
//!     .with_calibration(CalibrationConfig::default().with_drift_rate(0.25))
//!     .with_broadcast(BroadcastConfig::default().with_active_interval_us(500_000));
//! ```

use heapless::String as HString;

/// Maximum length for short config strings (device names)
pub const MAX_SHORT_STRING: usize = 64;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    // Take only what fits
    let take = s.len().min(MAX_SHORT_STRING);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, _)| *i < take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Sensing and physics calibration constants
    pub calibration: CalibrationConfig,
    /// Broadcast rate and protocol scaling
    pub broadcast: BroadcastConfig,
    /// Device identification
    pub device: DeviceConfig,
}

impl Config {
    /// Set calibration configuration
    pub fn with_calibration(mut self, calibration: CalibrationConfig) -> Self {
        self.calibration = calibration;
        self
    }

    /// Set broadcast configuration
    pub fn with_broadcast(mut self, broadcast: BroadcastConfig) -> Self {
        self.broadcast = broadcast;
        self
    }

    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }
}

// ============================================================================
// Calibration Config
// ============================================================================

/// Sensing and physics calibration constants.
///
/// The decay, drag, and smoothing values are empirical, calibrated against
/// the machine; they are carried verbatim rather than derived.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationConfig {
    /// Fraction of velocity lost per second to hull decay.
    pub drift_rate: f32,
    /// Quadratic drag coefficient.
    pub drag_coefficient: f32,
    /// Velocity smoothing window, in physics steps.
    pub vel_smoothing: f32,
    /// Stroke-rate smoothing window, in physics steps.
    pub spm_smoothing: f32,
    /// Falling-edge debounce window against mechanical chatter, µs.
    pub debounce_us: u64,
    /// Tick deltas below this magnitude are sensor noise, µs.
    pub min_tick_us: i64,
    /// Minimum physics step interval, µs.
    pub physics_step_us: u64,
    /// No ticks for this long forces the idle state, µs.
    pub idle_timeout_us: u64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            drift_rate: 0.2,
            drag_coefficient: 0.002,
            vel_smoothing: 512.0,
            spm_smoothing: 128.0,
            debounce_us: 20_000,
            min_tick_us: 2_500,
            physics_step_us: 10_000,
            idle_timeout_us: 1_000_000,
        }
    }
}

impl CalibrationConfig {
    /// Set the hull decay rate
    pub fn with_drift_rate(mut self, drift_rate: f32) -> Self {
        self.drift_rate = drift_rate;
        self
    }

    /// Set the quadratic drag coefficient
    pub fn with_drag_coefficient(mut self, drag_coefficient: f32) -> Self {
        self.drag_coefficient = drag_coefficient;
        self
    }

    /// Set the velocity smoothing window
    pub fn with_vel_smoothing(mut self, vel_smoothing: f32) -> Self {
        self.vel_smoothing = vel_smoothing;
        self
    }

    /// Set the stroke-rate smoothing window
    pub fn with_spm_smoothing(mut self, spm_smoothing: f32) -> Self {
        self.spm_smoothing = spm_smoothing;
        self
    }
}

// ============================================================================
// Broadcast Config
// ============================================================================

/// Broadcast rate gating and protocol scaling.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BroadcastConfig {
    /// Publish interval while moving, µs (4 Hz).
    pub active_interval_us: u64,
    /// Publish interval while idle, µs (0.2 Hz).
    pub idle_interval_us: u64,
    /// Smoothed speed below this counts as idle, m/s.
    pub idle_speed_mps: f32,
    /// Assumed wheel circumference for the distance-to-revolutions
    /// conversion, meters (700x25c road wheel).
    pub wheel_circumference_m: f32,
    /// Wheel revolutions are scaled down by this factor.
    pub wheel_divisor: u32,
    /// Crank revolutions are scaled up by this factor.
    pub crank_multiplier: u32,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            active_interval_us: 250_000,
            idle_interval_us: 5_000_000,
            idle_speed_mps: 0.5,
            wheel_circumference_m: 2.105,
            wheel_divisor: 3,
            crank_multiplier: 3,
        }
    }
}

impl BroadcastConfig {
    /// Set the publish interval while moving
    pub fn with_active_interval_us(mut self, active_interval_us: u64) -> Self {
        self.active_interval_us = active_interval_us;
        self
    }

    /// Set the publish interval while idle
    pub fn with_idle_interval_us(mut self, idle_interval_us: u64) -> Self {
        self.idle_interval_us = idle_interval_us;
        self
    }

    /// Set the idle speed threshold
    pub fn with_idle_speed_mps(mut self, idle_speed_mps: f32) -> Self {
        self.idle_speed_mps = idle_speed_mps;
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Advertised device name
    pub name: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("BlueRow-143"),
        }
    }
}

impl DeviceConfig {
    /// Set the advertised device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_machine_calibration() {
        let config = Config::default();
        assert_eq!(config.calibration.drift_rate, 0.2);
        assert_eq!(config.calibration.drag_coefficient, 0.002);
        assert_eq!(config.calibration.vel_smoothing, 512.0);
        assert_eq!(config.calibration.spm_smoothing, 128.0);
        assert_eq!(config.calibration.debounce_us, 20_000);
        assert_eq!(config.calibration.min_tick_us, 2_500);
        assert_eq!(config.calibration.physics_step_us, 10_000);
        assert_eq!(config.calibration.idle_timeout_us, 1_000_000);
    }

    #[test]
    fn broadcast_defaults() {
        let broadcast = BroadcastConfig::default();
        assert_eq!(broadcast.active_interval_us, 250_000);
        assert_eq!(broadcast.idle_interval_us, 5_000_000);
        assert_eq!(broadcast.idle_speed_mps, 0.5);
        assert_eq!(broadcast.wheel_circumference_m, 2.105);
    }

    #[test]
    fn builders_override_fields() {
        let config = Config::default()
            .with_calibration(CalibrationConfig::default().with_drift_rate(0.3))
            .with_broadcast(BroadcastConfig::default().with_idle_speed_mps(1.0))
            .with_device(DeviceConfig::default().with_name("BlueRow-7"));

        assert_eq!(config.calibration.drift_rate, 0.3);
        assert_eq!(config.broadcast.idle_speed_mps, 1.0);
        assert_eq!(config.device.name.as_str(), "BlueRow-7");
    }

    #[test]
    fn short_string_truncates_at_capacity() {
        let long = "x".repeat(MAX_SHORT_STRING + 10);
        let s = short_string(&long);
        assert_eq!(s.len(), MAX_SHORT_STRING);
    }
}
