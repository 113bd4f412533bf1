//! Broadcast collaborator trait.
//!
//! The fitness broadcast collaborator (typically a GATT server notifying a
//! paired head unit) is external to the core. The core only converts its
//! state into the protocol's fixed binary records and hands them over through
//! [`FitnessBroadcaster`]; advertising, connection management, and the
//! wireless stack itself live behind the implementation.

use crate::wire::{CadenceRecord, MotionRecord};

/// Fitness broadcast collaborator.
///
/// Accepts the two fixed binary records described in [`crate::wire`]. Only
/// the [`BroadcastPublisher`] calls this trait; no other component invokes
/// the broadcast collaborator directly.
///
/// # Implementation Notes
///
/// - Implementations notify the records verbatim; all unit conversion and
///   clamping has already happened in the publisher
/// - A disconnected transport should return its own error rather than block;
///   the core never retries within an iteration
///
/// [`BroadcastPublisher`]: crate::publisher::BroadcastPublisher
pub trait FitnessBroadcaster {
    /// Error type for broadcast operations.
    type Error;

    /// Publishes a motion record (speed, cadence, power).
    fn publish_motion(&mut self, record: &MotionRecord) -> Result<(), Self::Error>;

    /// Publishes a cadence record (wheel and crank revolution data).
    fn publish_cadence(&mut self, record: &CadenceRecord) -> Result<(), Self::Error>;
}
