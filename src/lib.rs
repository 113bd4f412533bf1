//! # bluerow
//!
//! A rowing machine performance monitor: quadrature stroke sensing, boat
//! physics, and fitness-protocol broadcast records.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for the quadrature sensor, microsecond
//!   clock, broadcast collaborator, and display
//! - **Direction-sensitive decoding**: Edge-timestamp state machine with
//!   mechanical-chatter debounce
//! - **Stroke timing**: Sign-reversal stroke boundaries, strokes/minute, and
//!   per-stroke power accumulation
//! - **Boat model**: Drift/drag integration with exponential smoothing for
//!   stable readouts
//! - **Broadcast records**: Fixed little-endian motion and cadence payloads
//!   with the protocol's fixed-point unit conversions
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware, broadcast, and display abstractions
//! - `decoder` - Quadrature pulse decoding into signed tick deltas
//! - `stroke` - Stroke boundary detection and power/cadence accounting
//! - `physics` / `filter` - Boat velocity model and output smoothing
//! - `wire` / `publisher` - Broadcast payload encoding and rate-gated publish
//! - `rower` - Main monitor that ties everything together
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use bluerow::{Config, RowerMonitor};
//!
//! let mut monitor = RowerMonitor::new(&Config::default());
//!
//! // Main loop: sample both channels and feed the monitor. Both channels
//! // high means the sensor is at idle level.
//! let mut now_us = 0;
//! for _ in 0..100 {
//!     monitor.poll(true, true, now_us);
//!     now_us += 1_000;
//! }
//!
//! let state = monitor.state();
//! assert_eq!(state.velocity_mps, 0.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Shared configuration system for desktop and ESP32.
pub mod config;
/// Quadrature pulse decoding into signed, direction-encoding tick deltas.
pub mod decoder;
/// Exponential smoothing filters for output stability.
pub mod filter;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Boat velocity model: drift, drag, and oar force integration.
pub mod physics;
/// Rate-gated publisher adapter for the broadcast collaborator.
pub mod publisher;
/// Main monitor that coordinates decoding, stroke timing, and physics.
pub mod rower;
/// Stroke boundary detection, stroke rate, and power accounting.
pub mod stroke;
/// Core traits for hardware, broadcast, and display abstraction.
pub mod traits;
/// Fixed binary broadcast records and fixed-point unit conversions.
pub mod wire;

// Re-exports for convenience
pub use config::{BroadcastConfig, CalibrationConfig, Config, DeviceConfig};
pub use decoder::{DecodeState, QuadratureDecoder, Tick};
pub use filter::SmoothingFilter;
pub use physics::BoatModel;
pub use publisher::BroadcastPublisher;
pub use rower::{Poll, RowerMonitor, RowerState};
pub use stroke::StrokeTracker;
pub use traits::{Clock, FitnessBroadcaster, QuadratureInput, RowerDisplay};
pub use wire::{CadenceRecord, MotionRecord};
