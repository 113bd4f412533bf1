//! Rate-gated publisher adapter for the broadcast collaborator.
//!
//! The publisher is the only component that talks to the
//! [`FitnessBroadcaster`]. On each poll it decides whether a publish is due,
//! converts the monitor's smoothed state into the protocol's fixed-point
//! records, and hands both payloads to the collaborator.
//!
//! The publish rate depends on motion state: 4 Hz while the boat is moving,
//! stretched to one update every five seconds once the smoothed speed drops
//! below the idle threshold, so an unattended machine doesn't spam the air.
//!
//! # Example
//!
//! ```rust
//! use bluerow::{BroadcastConfig, BroadcastPublisher, RowerState};
//! use bluerow::hal::MockBroadcaster;
//!
//! let mut publisher = BroadcastPublisher::new(MockBroadcaster::new(), BroadcastConfig::default());
//!
//! let state = RowerState::default();
//! // First due poll publishes both records.
//! assert!(publisher.poll(&state, 6_000_000).unwrap());
//! assert_eq!(publisher.broadcaster().motion.len(), 1);
//! assert_eq!(publisher.broadcaster().cadence.len(), 1);
//! ```

use crate::config::BroadcastConfig;
use crate::rower::RowerState;
use crate::traits::FitnessBroadcaster;
use crate::wire::{CadenceRecord, MotionRecord};

/// Publisher adapter owning the broadcast collaborator.
///
/// # Type Parameter
///
/// - `B`: The broadcast collaborator implementation ([`FitnessBroadcaster`])
pub struct BroadcastPublisher<B: FitnessBroadcaster> {
    broadcaster: B,
    config: BroadcastConfig,
    last_publish_us: u64,
}

impl<B: FitnessBroadcaster> BroadcastPublisher<B> {
    /// Creates a publisher around the given collaborator.
    pub fn new(broadcaster: B, config: BroadcastConfig) -> Self {
        Self {
            broadcaster,
            config,
            last_publish_us: 0,
        }
    }

    /// Publishes the current state when an update is due.
    ///
    /// Returns `Ok(true)` when both records were published, `Ok(false)` when
    /// the rate gate skipped this poll. Broadcast errors propagate.
    pub fn poll(&mut self, state: &RowerState, now_us: u64) -> Result<bool, B::Error> {
        let interval = if state.velocity_mps < self.config.idle_speed_mps {
            self.config.idle_interval_us
        } else {
            self.config.active_interval_us
        };
        if now_us.saturating_sub(self.last_publish_us) <= interval {
            return Ok(false);
        }
        self.last_publish_us = now_us;

        let motion = MotionRecord::new(
            state.velocity_mps,
            state.stroke_rate_spm,
            state.stroke_power,
        );
        self.broadcaster.publish_motion(&motion)?;

        // The head unit expects wheel revolutions; derive them from the
        // distance estimate at the configured circumference and scaling.
        let wheel_count = (state.distance_m
            / self.config.wheel_circumference_m
            / self.config.wheel_divisor as f32) as u32;
        let crank_count = state.tick_count.wrapping_mul(self.config.crank_multiplier) as u16;
        let cadence = CadenceRecord::new(wheel_count, now_us, crank_count, state.last_tick_us);
        self.broadcaster.publish_cadence(&cadence)?;

        Ok(true)
    }

    /// Get a reference to the broadcast collaborator.
    pub fn broadcaster(&self) -> &B {
        &self.broadcaster
    }

    /// Get a mutable reference to the broadcast collaborator.
    pub fn broadcaster_mut(&mut self) -> &mut B {
        &mut self.broadcaster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockBroadcaster;

    fn moving_state() -> RowerState {
        RowerState {
            velocity_mps: 2.5,
            raw_velocity_mps: 2.6,
            stroke_rate_spm: 24.0,
            stroke_power: 180.0,
            distance_m: 631.5,
            stroke_ticks: 4,
            tick_count: 40,
            last_tick_us: 9_000_000,
        }
    }

    fn publisher() -> BroadcastPublisher<MockBroadcaster> {
        BroadcastPublisher::new(MockBroadcaster::new(), BroadcastConfig::default())
    }

    #[test]
    fn active_rate_is_four_hertz() {
        let mut publisher = publisher();
        let state = moving_state();

        assert!(publisher.poll(&state, 300_000).unwrap());
        // Within the 250 ms window: gated.
        assert!(!publisher.poll(&state, 400_000).unwrap());
        assert!(!publisher.poll(&state, 550_000).unwrap());
        // Past it: published again.
        assert!(publisher.poll(&state, 551_000).unwrap());
        assert_eq!(publisher.broadcaster().motion.len(), 2);
    }

    #[test]
    fn idle_rate_stretches_to_five_seconds() {
        let mut publisher = publisher();
        let mut state = moving_state();
        state.velocity_mps = 0.1;

        assert!(publisher.poll(&state, 6_000_000).unwrap());
        assert!(!publisher.poll(&state, 7_000_000).unwrap());
        assert!(!publisher.poll(&state, 11_000_000).unwrap());
        assert!(publisher.poll(&state, 11_000_001).unwrap());
    }

    #[test]
    fn motion_record_carries_converted_units() {
        let mut publisher = publisher();
        let state = moving_state();
        publisher.poll(&state, 300_000).unwrap();

        let record = &publisher.broadcaster().motion[0];
        assert_eq!(record.speed, crate::wire::speed_to_wire(2.5));
        assert_eq!(record.cadence, 48);
        assert_eq!(record.power, 180);
    }

    #[test]
    fn cadence_record_scales_wheel_and_crank() {
        let mut publisher = publisher();
        let state = moving_state();
        publisher.poll(&state, 300_000).unwrap();

        let record = &publisher.broadcaster().cadence[0];
        // ~100 revolutions: 631.5 m / 2.105 m / 3, truncated.
        let expected = (631.5f32 / 2.105 / 3.0) as u32;
        assert_eq!(record.wheel_count, expected);
        assert_eq!(record.crank_count, 120);
        assert_eq!(record.wheel_event, crate::wire::timestamp_to_wire(300_000));
        assert_eq!(
            record.crank_event,
            crate::wire::timestamp_to_wire(9_000_000)
        );
    }

    #[test]
    fn broadcast_errors_propagate() {
        let mut publisher = BroadcastPublisher::new(
            MockBroadcaster::new().with_failure(),
            BroadcastConfig::default(),
        );
        assert!(publisher.poll(&moving_state(), 300_000).is_err());
    }
}
