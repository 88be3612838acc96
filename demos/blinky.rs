//! Runs the blink loop stepwise against the simulated platform:
//!
//! ```
//! cargo run --example blinky --features sim
//! ```

use blink_periodic::sim::{SimPort, SimTimer};
use blink_periodic::{BlinkApp, Shared, BLINK_INTERVAL_MS, BLINK_PIN, HEARTBEAT_PIN};

fn main() {
    // - platform setup --------------------------------------------------------

    let port: &'static SimPort = Box::leak(Box::new(SimPort::new()));
    let timer: &'static SimTimer = Box::leak(Box::new(SimTimer::new()));
    let shared: &'static Shared<&'static SimPort> = Box::leak(Box::new(Shared::new(port)));

    let mut app = BlinkApp::new(port, timer, shared);
    app.init().expect("pin setup");

    println!("t=     0ms  outputs configured, all pins high");

    // - main loop -------------------------------------------------------------

    for _ in 0..8 {
        app.begin_cycle().expect("arm one-shot");
        timer.advance(BLINK_INTERVAL_MS as u64);
        if app.try_complete().is_err() {
            unreachable!("one-shot is due at the interval boundary");
        }
        println!(
            "t={:>6}ms  pin0={:<4} pin3={:<4}",
            timer.now_ms(),
            level(port.level(BLINK_PIN)),
            level(port.level(HEARTBEAT_PIN)),
        );
    }
}

fn level(high: bool) -> &'static str {
    if high {
        "high"
    } else {
        "low"
    }
}
