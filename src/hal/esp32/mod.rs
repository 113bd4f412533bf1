//! ESP32 hardware implementations.
//!
//! Concrete implementations of the hardware traits for the TTGO ESP32 board
//! the rowing sensor is wired to. Requires the `esp32` feature and the
//! ESP-IDF toolchain.
//!
//! # Modules
//!
//! - `clock`: Microsecond clock from the ESP-IDF timer
//! - `quad`: Flywheel quadrature sensor on two pulled-up GPIOs

pub mod clock;
pub mod quad;

pub use clock::Esp32Clock;
pub use quad::Esp32Quadrature;
