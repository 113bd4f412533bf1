//! Quadrature pulse decoding.
//!
//! The flywheel sensor exposes two active-low channels, pulled high at idle
//! and pulled low while the magnet passes. One pass produces a pulse window:
//! both channels fall, in an order that encodes the flywheel direction, then
//! both return high. The decoder turns each completed window into a single
//! [`Tick`] whose signed delta is the microsecond interval between the two
//! falling edges: positive when A fell first (drive), negative when B fell
//! first (recovery).
//!
//! # State machine
//!
//! Decoding is an explicit three-state machine, polled with one level sample
//! per iteration:
//!
//! | State | On A fall | On B fall |
//! |-------|-----------|-----------|
//! | `Idle` | to `ArmedPositive` (B high) | to `ArmedNegative` (A high) |
//! | `ArmedPositive` | no change | emit `now - fall_a`, to `Idle` (A low) |
//! | `ArmedNegative` | emit `fall_b - now`, to `Idle` (B low) | no change |
//!
//! Arming requires the opposite channel to have been sampled high both before
//! and at the fall, so a tick can only be produced once per pulse window: the
//! sensor must return to its both-high idle level before the next window can
//! arm.
//!
//! # Debounce
//!
//! A falling edge updates the channel's fall timestamp only when more than
//! 20 ms have passed since that channel's rise. Mechanical chatter inside the
//! window therefore cannot move the reference edge a tick is measured from.
//!
//! # Example
//!
//! ```rust
//! use bluerow::QuadratureDecoder;
//!
//! let mut decoder = QuadratureDecoder::new(20_000);
//!
//! decoder.poll(true, true, 0); // idle level
//! assert!(decoder.poll(false, true, 100_000).is_none()); // A falls: armed
//! let tick = decoder.poll(false, false, 105_000).unwrap(); // B falls: tick
//! assert_eq!(tick.delta_us, 5_000);
//! ```

/// One decoded pulse.
///
/// The sign of `delta_us` encodes flywheel direction: positive means channel
/// A fell before channel B (oar-loaded drive motion), negative means the
/// reverse order (recovery).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    /// Microseconds between the two falling edges, signed by direction.
    pub delta_us: i64,
}

impl Tick {
    /// Returns true for positive-direction (drive) ticks.
    #[inline]
    pub fn is_drive(&self) -> bool {
        self.delta_us > 0
    }
}

/// Decoder state, advanced one level sample at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DecodeState {
    /// No pulse window in progress; waiting for a first fall from idle level.
    #[default]
    Idle,
    /// Channel A fell first; a B fall completes a positive tick.
    ArmedPositive,
    /// Channel B fell first; an A fall completes a negative tick.
    ArmedNegative,
}

/// Direction-sensitive quadrature decoder.
///
/// Feed one `(a, b)` level sample per loop iteration via [`poll()`]. At most
/// one [`Tick`] is produced per completed, debounced pulse window.
///
/// [`poll()`]: Self::poll
#[derive(Clone, Debug)]
pub struct QuadratureDecoder {
    debounce_us: u64,
    state: DecodeState,
    /// Last sampled levels, `true` = high.
    last_a: bool,
    last_b: bool,
    /// Edge timestamps, microseconds.
    rise_a: u64,
    rise_b: u64,
    fall_a: u64,
    fall_b: u64,
}

impl QuadratureDecoder {
    /// Creates a decoder with the given falling-edge debounce window.
    ///
    /// Levels start low, matching an unpowered sensor: the first high sample
    /// on each channel registers as a rising edge.
    pub fn new(debounce_us: u64) -> Self {
        Self {
            debounce_us,
            state: DecodeState::Idle,
            last_a: false,
            last_b: false,
            rise_a: 0,
            rise_b: 0,
            fall_a: 0,
            fall_b: 0,
        }
    }

    /// Returns the current machine state.
    #[inline]
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Advances the decoder with one level sample.
    ///
    /// `a` and `b` are the channel levels (`true` = high), `now_us` the
    /// monotonic microsecond clock. Returns a [`Tick`] when this sample
    /// completes a pulse window.
    pub fn poll(&mut self, a: bool, b: bool, now_us: u64) -> Option<Tick> {
        let fell_a = self.last_a && !a;
        let fell_b = self.last_b && !b;
        let rose_a = !self.last_a && a;
        let rose_b = !self.last_b && b;

        if rose_a {
            self.rise_a = now_us;
        }
        if rose_b {
            self.rise_b = now_us;
        }

        // A fall within the debounce window of the channel's own rise is
        // mechanical chatter; the recorded fall timestamp keeps its old
        // value so delta computation stays anchored to the real edge.
        if fell_a && now_us.saturating_sub(self.rise_a) > self.debounce_us {
            self.fall_a = now_us;
        }
        if fell_b && now_us.saturating_sub(self.rise_b) > self.debounce_us {
            self.fall_b = now_us;
        }

        let mut tick = None;

        if fell_a && fell_b {
            // Both channels falling in one sample is an undefined sensor
            // state: any delta would pair this edge with a stale timestamp
            // from the previous window. No tick, no transition.
        } else if fell_a {
            if b && self.last_b {
                self.state = DecodeState::ArmedPositive;
            } else if !b && self.state == DecodeState::ArmedNegative {
                tick = Some(Tick {
                    delta_us: self.fall_b as i64 - now_us as i64,
                });
                self.state = DecodeState::Idle;
            }
        } else if fell_b {
            if a && self.last_a {
                self.state = DecodeState::ArmedNegative;
            } else if !a && self.state == DecodeState::ArmedPositive {
                tick = Some(Tick {
                    delta_us: now_us as i64 - self.fall_a as i64,
                });
                self.state = DecodeState::Idle;
            }
        }

        self.last_a = a;
        self.last_b = b;
        tick
    }
}
