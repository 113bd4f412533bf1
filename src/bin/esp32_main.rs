//! TTGO ESP32 rowing machine monitor.
//!
//! This is the main entry point for the physical hardware monitor. It runs
//! the sensing loop at full speed:
//! - Samples the flywheel quadrature channels every iteration
//! - Decodes ticks, tracks strokes, and advances the boat model
//! - Publishes motion and cadence records at the broadcast rate
//! - Prints a telemetry line per publish
//!
//! The loop never sleeps: edge timestamps are only as good as the polling
//! rate, and the rate gates inside the monitor bound the real work.
//!
//! # Build
//!
//! ```bash
//! cargo build --features esp32 --bin esp32_main
//! ```

use bluerow::hal::esp32::{Esp32Clock, Esp32Quadrature};
use bluerow::traits::{Clock, FitnessBroadcaster, QuadratureInput};
use bluerow::wire::{CadenceRecord, MotionRecord};
use bluerow::{BroadcastPublisher, Config, RowerMonitor};
use esp_idf_hal::peripherals::Peripherals;

/// Broadcast stub until the wireless stack is wired in: prints the encoded
/// payloads the GATT characteristics would notify.
struct SerialBroadcaster;

impl FitnessBroadcaster for SerialBroadcaster {
    type Error = ();

    fn publish_motion(&mut self, record: &MotionRecord) -> Result<(), ()> {
        println!("motion {:02x?}", record.encode());
        Ok(())
    }

    fn publish_cadence(&mut self, record: &CadenceRecord) -> Result<(), ()> {
        println!("cadence {:02x?}", record.encode());
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();

    let config = Config::default();

    println!();
    println!("================================");
    println!("  {} rowing monitor", config.device.name);
    println!("================================");
    println!();

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize the flywheel sensor (GPIO21/22)
    // =========================================================================
    let mut quad = Esp32Quadrature::new(peripherals.pins.gpio21, peripherals.pins.gpio22)?;
    println!("[OK] Quadrature sensor initialized (GPIO21/22)");

    // =========================================================================
    // Initialize clock, monitor, and publisher
    // =========================================================================
    let clock = Esp32Clock::new();
    let mut monitor = RowerMonitor::new(&config);
    let mut publisher = BroadcastPublisher::new(SerialBroadcaster, config.broadcast.clone());

    println!();
    println!("Starting sensing loop...");
    println!();

    // =========================================================================
    // Sensing loop
    // =========================================================================
    loop {
        let now = clock.now_us();
        let (a, b) = quad.sample();
        monitor.poll(a, b, now);

        let state = monitor.state();
        match publisher.poll(&state, now) {
            Ok(true) => println!("{}", state.telemetry_line()),
            Ok(false) => {}
            Err(_) => println!("[WARN] broadcast publish failed"),
        }
    }
}
