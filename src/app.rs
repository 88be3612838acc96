//! Main control loop: toggle, arm, spin, repeat.

use void::Void;

use crate::error::Error;
use crate::gpio::{GpioPort, Pin};
use crate::led::{Led, UserLed};
use crate::timer::{Completion, OneshotBridge, OneshotTimer};

// - constants ----------------------------------------------------------------

/// Pin toggled by the main loop on every cycle.
pub const BLINK_PIN: Pin = Pin::new(0);

/// Pin toggled from the timer callback on each firing.
pub const HEARTBEAT_PIN: Pin = Pin::new(3);

/// Number of pins configured as outputs at startup.
pub const OUTPUT_PINS: u8 = 4;

/// Blink half-period.
pub const BLINK_INTERVAL_MS: u32 = 500;

// - Shared -------------------------------------------------------------------

/// State the interrupt-context callback works on: the heartbeat LED and
/// the completion flag.
pub struct Shared<G> {
    heartbeat: UserLed<G>,
    done: Completion,
}

impl<G: GpioPort> Shared<G> {
    pub fn new(port: G) -> Self {
        Self {
            heartbeat: UserLed::new(port, HEARTBEAT_PIN),
            done: Completion::new(),
        }
    }

    pub fn done(&self) -> &Completion {
        &self.done
    }
}

/// Timer-fired callback. Runs in interrupt context: toggles the
/// heartbeat LED, signals the flag, nothing else. `user_data` is the
/// `&'static Shared` registered at subscription.
fn heartbeat_callback<G: GpioPort>(_: usize, _: usize, _: usize, user_data: *mut ()) {
    let shared = unsafe { &*(user_data as *const Shared<G>) };
    shared.heartbeat.toggle();
    shared.done.signal();
}

// - BlinkApp -----------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Toggling,
    Waiting,
}

/// The fixed blink pattern: toggle [`BLINK_PIN`], arm a one-shot for
/// [`BLINK_INTERVAL_MS`], spin until it fires, repeat forever.
pub struct BlinkApp<G: 'static, T> {
    port: G,
    bridge: OneshotBridge<T>,
    shared: &'static Shared<G>,
    phase: Phase,
}

impl<G, T> BlinkApp<G, T>
where
    G: GpioPort,
    T: OneshotTimer,
{
    pub fn new(port: G, timer: T, shared: &'static Shared<G>) -> Self {
        Self {
            port,
            bridge: OneshotBridge::new(timer),
            shared,
            phase: Phase::Toggling,
        }
    }

    /// Configure pins `0..OUTPUT_PINS` as outputs and drive them all
    /// high.
    pub fn init(&mut self) -> Result<(), Error> {
        for index in 0..OUTPUT_PINS {
            let pin = Pin::new(index);
            self.port.enable_output(pin)?;
            self.port.set(pin)?;
        }
        Ok(())
    }

    /// Toggling state: flip the blink pin and arm the next one-shot.
    pub fn begin_cycle(&mut self) -> Result<(), Error> {
        self.port.toggle(BLINK_PIN)?;
        self.bridge.subscribe(heartbeat_callback::<G>, self.shared)?;
        self.bridge.arm_oneshot(BLINK_INTERVAL_MS)?;
        self.phase = Phase::Waiting;
        Ok(())
    }

    /// Waiting state, non-blocking variant: `WouldBlock` until the
    /// one-shot has fired; on completion the flag is reset and the loop
    /// is back in its toggling state.
    pub fn try_complete(&mut self) -> nb::Result<(), Void> {
        self.bridge.poll_fired(&self.shared.done)?;
        self.phase = Phase::Toggling;
        Ok(())
    }

    /// Run the blink loop forever. Only an error escapes.
    pub fn run(&mut self) -> Result<Void, Error> {
        self.init()?;
        loop {
            self.begin_cycle()?;
            self.bridge.wait_for(&self.shared.done);
            self.phase = Phase::Toggling;
        }
    }

    /// True while blocked on an armed one-shot.
    pub fn is_waiting(&self) -> bool {
        self.phase == Phase::Waiting
    }
}

// - tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimPort, SimTimer};

    fn fixture() -> (
        &'static SimPort,
        &'static SimTimer,
        BlinkApp<&'static SimPort, &'static SimTimer>,
    ) {
        let port = &*Box::leak(Box::new(SimPort::new()));
        let timer = &*Box::leak(Box::new(SimTimer::new()));
        let shared = &*Box::leak(Box::new(Shared::new(port)));
        (port, timer, BlinkApp::new(port, timer, shared))
    }

    #[test]
    fn init_drives_all_pins_high() {
        let (port, _timer, mut app) = fixture();
        app.init().unwrap();

        for index in 0..OUTPUT_PINS {
            let pin = Pin::new(index);
            assert!(port.is_output(pin));
            assert!(port.level(pin));
        }
    }

    #[test]
    fn full_cycle_toggles_blink_and_heartbeat() {
        let (port, timer, mut app) = fixture();
        app.init().unwrap();

        app.begin_cycle().unwrap();
        assert!(!port.level(BLINK_PIN));
        assert!(app.is_waiting());
        assert_eq!(Err(nb::Error::WouldBlock), app.try_complete());

        timer.advance(499);
        assert_eq!(Err(nb::Error::WouldBlock), app.try_complete());
        assert_eq!(0, port.toggle_count(HEARTBEAT_PIN));

        timer.advance(1);
        assert_eq!(1, port.toggle_count(HEARTBEAT_PIN));
        assert_eq!(Ok(()), app.try_complete());
        assert!(!app.is_waiting());

        app.begin_cycle().unwrap();
        assert!(port.level(BLINK_PIN));
        timer.advance(500);
        assert_eq!(Ok(()), app.try_complete());
        assert_eq!(2, port.toggle_count(HEARTBEAT_PIN));
    }

    #[test]
    fn flag_resets_between_cycles() {
        let (_port, timer, mut app) = fixture();
        app.init().unwrap();

        app.begin_cycle().unwrap();
        timer.advance(500);
        assert!(app.shared.done().is_set());
        app.try_complete().unwrap();
        assert!(!app.shared.done().is_set());
    }

    #[test]
    fn cycle_cannot_be_rearmed_while_waiting() {
        let (_port, _timer, mut app) = fixture();
        app.init().unwrap();

        app.begin_cycle().unwrap();
        assert_eq!(Err(Error::AlreadyArmed), app.begin_cycle());
    }
}
