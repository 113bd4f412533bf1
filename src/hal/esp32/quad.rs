//! Flywheel quadrature sensor input for ESP32.
//!
//! The sensor is a pair of reed/hall channels, open to ground: each channel
//! reads high through its pull-up at idle and is pulled low while the magnet
//! passes. Decoding is polling-based; this type only samples the raw levels.
//!
//! # Wiring
//!
//! - Channel A → GPIO21
//! - Channel B → GPIO22
//! - Common → GND

use crate::traits::QuadratureInput;
use esp_idf_hal::gpio::{Input, InputPin, OutputPin, PinDriver, Pull};
use esp_idf_hal::peripheral::Peripheral;

/// Flywheel quadrature sensor on two GPIO inputs.
///
/// Sample both channels every loop iteration and feed the levels to the
/// decoder; the tighter the polling, the better the edge timestamps.
///
/// # Example
///
/// ```ignore
/// use bluerow::hal::esp32::Esp32Quadrature;
/// use bluerow::traits::QuadratureInput;
///
/// let peripherals = Peripherals::take()?;
/// let mut quad = Esp32Quadrature::new(
///     peripherals.pins.gpio21, // channel A
///     peripherals.pins.gpio22, // channel B
/// )?;
///
/// loop {
///     let (a, b) = quad.sample();
///     // feed the monitor...
/// }
/// ```
pub struct Esp32Quadrature<'d, A, B>
where
    A: InputPin + OutputPin,
    B: InputPin + OutputPin,
{
    /// Channel A input
    a: PinDriver<'d, A, Input>,
    /// Channel B input
    b: PinDriver<'d, B, Input>,
}

impl<'d, A, B> Esp32Quadrature<'d, A, B>
where
    A: InputPin + OutputPin,
    B: InputPin + OutputPin,
{
    /// Creates a new sensor instance.
    ///
    /// Configures both GPIO pins with internal pull-up resistors.
    ///
    /// # Arguments
    ///
    /// * `a_pin` - GPIO for channel A (typically GPIO21)
    /// * `b_pin` - GPIO for channel B (typically GPIO22)
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization fails.
    pub fn new(
        a_pin: impl Peripheral<P = A> + 'd,
        b_pin: impl Peripheral<P = B> + 'd,
    ) -> Result<Self, esp_idf_hal::sys::EspError> {
        let mut a = PinDriver::input(a_pin)?;
        let mut b = PinDriver::input(b_pin)?;

        // Enable internal pull-ups (the sensor channels are open-drain)
        a.set_pull(Pull::Up)?;
        b.set_pull(Pull::Up)?;

        Ok(Self { a, b })
    }
}

impl<A, B> QuadratureInput for Esp32Quadrature<'_, A, B>
where
    A: InputPin + OutputPin,
    B: InputPin + OutputPin,
{
    fn sample(&mut self) -> (bool, bool) {
        (self.a.is_high(), self.b.is_high())
    }
}
