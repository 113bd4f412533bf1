//! Fixed binary broadcast records and fixed-point unit conversions.
//!
//! The broadcast collaborator notifies two little-endian records, laid out
//! exactly as the fitness protocol's characteristics expect:
//!
//! | Record | Bytes | Fields |
//! |--------|-------|--------|
//! | [`MotionRecord`] | 8 | flags:u16, speed:u16, cadence:u16, power:i16 |
//! | [`CadenceRecord`] | 11 | flags:u8, wheel_count:u32, wheel_event:u16, crank_count:u16, crank_event:u16 |
//!
//! Unit conversions reproduced from the protocol:
//!
//! - speed: m/s into the protocol's speed units, `round(mps * 3600 / 1000 / 100)`
//! - cadence: rev/min into 0.5 rev/min units, `round(rpm * 2)`
//! - event times: microseconds into 1/1024 s ticks, `round(us * 1024 / 1e6)`,
//!   wrapping modulo 2^16 per the protocol's rollover convention
//!
//! Negative speed and cadence inputs clamp to zero before encoding; power
//! saturates into `i16`.

#[cfg(not(feature = "std"))]
use micromath::F32Ext;

/// Motion record flag bits: instantaneous speed, cadence, and power present.
pub const MOTION_FLAGS: u16 = (1 << 0) | (1 << 2) | (1 << 6);

/// Cadence record feature/flag bits: wheel and crank revolution data present.
pub const CADENCE_FLAGS: u8 = (1 << 0) | (1 << 1);

/// Instantaneous motion payload: speed, cadence, power.
///
/// # Example
///
/// ```rust
/// use bluerow::wire::{MotionRecord, MOTION_FLAGS};
///
/// let record = MotionRecord::new(2.5, 24.0, 150.0);
/// assert_eq!(record.flags, MOTION_FLAGS);
/// assert_eq!(record.cadence, 48); // 0.5 rev/min units
/// assert_eq!(record.encode().len(), 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotionRecord {
    /// Field-presence flags.
    pub flags: u16,
    /// Speed in protocol units.
    pub speed: u16,
    /// Cadence in 0.5 rev/min units.
    pub cadence: u16,
    /// Power in watts.
    pub power: i16,
}

impl MotionRecord {
    /// Builds a record from SI-ish values, clamping and converting.
    ///
    /// Negative speed or cadence clamps to zero; power rounds and saturates
    /// into the field.
    pub fn new(speed_mps: f32, cadence_rpm: f32, power_w: f32) -> Self {
        Self {
            flags: MOTION_FLAGS,
            speed: speed_to_wire(speed_mps),
            cadence: cadence_to_wire(cadence_rpm),
            power: power_w.round() as i16,
        }
    }

    /// Encodes the record as the protocol's 8-byte little-endian payload.
    pub fn encode(&self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[0..2].copy_from_slice(&self.flags.to_le_bytes());
        out[2..4].copy_from_slice(&self.speed.to_le_bytes());
        out[4..6].copy_from_slice(&self.cadence.to_le_bytes());
        out[6..8].copy_from_slice(&self.power.to_le_bytes());
        out
    }
}

/// Wheel and crank revolution payload.
///
/// The counters are cumulative and wrap at their field width; consumers
/// difference successive records, so rollover is part of the protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CadenceRecord {
    /// Feature flags.
    pub flags: u8,
    /// Cumulative wheel revolutions.
    pub wheel_count: u32,
    /// Last wheel event time, 1/1024 s ticks.
    pub wheel_event: u16,
    /// Cumulative crank revolutions.
    pub crank_count: u16,
    /// Last crank event time, 1/1024 s ticks.
    pub crank_event: u16,
}

impl CadenceRecord {
    /// Builds a record from raw counts and microsecond event times.
    pub fn new(wheel_count: u32, wheel_event_us: u64, crank_count: u16, crank_event_us: u64) -> Self {
        Self {
            flags: CADENCE_FLAGS,
            wheel_count,
            wheel_event: timestamp_to_wire(wheel_event_us),
            crank_count,
            crank_event: timestamp_to_wire(crank_event_us),
        }
    }

    /// Encodes the record as the protocol's 11-byte little-endian payload.
    pub fn encode(&self) -> [u8; 11] {
        let mut out = [0u8; 11];
        out[0] = self.flags;
        out[1..5].copy_from_slice(&self.wheel_count.to_le_bytes());
        out[5..7].copy_from_slice(&self.wheel_event.to_le_bytes());
        out[7..9].copy_from_slice(&self.crank_count.to_le_bytes());
        out[9..11].copy_from_slice(&self.crank_event.to_le_bytes());
        out
    }
}

/// Converts m/s into the protocol's speed units, clamping negatives to zero.
pub fn speed_to_wire(speed_mps: f32) -> u16 {
    let clamped = if speed_mps < 0.0 { 0.0 } else { speed_mps };
    (clamped * 3600.0 / 1000.0 / 100.0).round() as u16
}

/// Inverse of [`speed_to_wire`], m/s per protocol unit.
pub fn wire_to_speed(units: u16) -> f32 {
    units as f32 * 100.0 * 1000.0 / 3600.0
}

/// Converts rev/min into 0.5 rev/min units, clamping negatives to zero.
pub fn cadence_to_wire(cadence_rpm: f32) -> u16 {
    let clamped = if cadence_rpm < 0.0 { 0.0 } else { cadence_rpm };
    (clamped * 2.0).round() as u16
}

/// Inverse of [`cadence_to_wire`].
pub fn wire_to_cadence(units: u16) -> f32 {
    units as f32 / 2.0
}

/// Converts a microsecond timestamp into 1/1024 s ticks, rounding to nearest
/// and wrapping modulo 2^16.
pub fn timestamp_to_wire(us: u64) -> u16 {
    ((us * 1024 + 500_000) / 1_000_000) as u16
}
