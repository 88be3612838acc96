//! Shared fixtures for the host-run integration tests.

use blink_periodic::sim::{SimPort, SimTimer};
use blink_periodic::{BlinkApp, Shared};

pub type SimApp = BlinkApp<&'static SimPort, &'static SimTimer>;

// - fixture ------------------------------------------------------------------

/// A fresh simulated platform with static lifetime, one per test.
pub struct Fixture {
    pub port: &'static SimPort,
    pub timer: &'static SimTimer,
    pub shared: &'static Shared<&'static SimPort>,
}

pub fn fixture() -> Fixture {
    let port: &'static SimPort = Box::leak(Box::new(SimPort::new()));
    let timer: &'static SimTimer = Box::leak(Box::new(SimTimer::new()));
    let shared: &'static Shared<&'static SimPort> = Box::leak(Box::new(Shared::new(port)));
    Fixture {
        port,
        timer,
        shared,
    }
}

impl Fixture {
    pub fn app(&self) -> SimApp {
        BlinkApp::new(self.port, self.timer, self.shared)
    }
}
