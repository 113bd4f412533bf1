//! Desktop simulation of a rowing session.
//!
//! Drives the monitor from mock hardware with a synthetic stroke pattern and
//! prints a telemetry line per publish, so the whole pipeline can be watched
//! without a rowing machine attached.
//!
//! Run with: `cargo run --example simulate`

use bluerow::hal::{MockBroadcaster, MockClock, MockDisplay, MockQuadrature};
use bluerow::traits::{Clock, QuadratureInput, RowerDisplay};
use bluerow::{BroadcastPublisher, Config, RowerMonitor};

/// Plays one pulse window through the sensor: first channel falls, the other
/// follows `gap_us` later, then both return high.
fn pulse(
    quad: &mut MockQuadrature,
    clock: &mut MockClock,
    monitor: &mut RowerMonitor,
    drive: bool,
    gap_us: u64,
) {
    let samples: [(bool, bool); 3] = if drive {
        [(false, true), (false, false), (true, true)]
    } else {
        [(true, false), (false, false), (true, true)]
    };

    for (i, levels) in samples.into_iter().enumerate() {
        quad.set_levels(levels.0, levels.1);
        clock.advance(if i == 1 { gap_us } else { 1_000 });
        let (a, b) = quad.sample();
        let result = monitor.poll(a, b, clock.now_us());
        if result.stroke_started {
            println!("--- stroke ---");
        }
    }
}

fn main() {
    let config = Config::default();
    let mut quad = MockQuadrature::new();
    let mut clock = MockClock::new();
    let mut monitor = RowerMonitor::new(&config);
    let mut publisher = BroadcastPublisher::new(MockBroadcaster::new(), config.broadcast.clone());
    let mut display = MockDisplay::new();
    display.init().unwrap();
    display.show_message(&config.device.name, Some("simulating")).unwrap();

    println!("simulating 30 strokes at ~30 spm");
    println!("spm,ticks,m/s,power,meters");

    for _ in 0..30 {
        // Drive: eight loaded ticks, ~5 ms fall-to-fall.
        for _ in 0..8 {
            pulse(&mut quad, &mut clock, &mut monitor, true, 5_000);
            idle(&mut quad, &mut clock, &mut monitor, &mut publisher, 120_000);
        }
        // Recovery: six return ticks, slower.
        for _ in 0..6 {
            pulse(&mut quad, &mut clock, &mut monitor, false, 9_000);
            idle(&mut quad, &mut clock, &mut monitor, &mut publisher, 150_000);
        }
    }

    let state = monitor.state();
    display
        .render(state.stroke_rate_spm, state.velocity_mps)
        .unwrap();

    println!();
    println!("final: {}", state.telemetry_line());
    println!(
        "readouts: {:?}, published {} motion / {} cadence records",
        display.last_readouts.unwrap(),
        publisher.broadcaster().motion.len(),
        publisher.broadcaster().cadence.len()
    );
}

/// Idles at the sensor's rest level for `duration_us`, polling at 2 kHz the
/// way the firmware loop would.
fn idle(
    quad: &mut MockQuadrature,
    clock: &mut MockClock,
    monitor: &mut RowerMonitor,
    publisher: &mut BroadcastPublisher<MockBroadcaster>,
    duration_us: u64,
) {
    quad.set_levels(true, true);
    let mut remaining = duration_us;
    while remaining > 0 {
        let step = remaining.min(500);
        clock.advance(step);
        remaining -= step;
        let (a, b) = quad.sample();
        monitor.poll(a, b, clock.now_us());

        let state = monitor.state();
        if publisher.poll(&state, clock.now_us()).unwrap() {
            println!("{}", state.telemetry_line());
        }
    }
}
