//! Simulated platform for host-run tests and demos.
//!
//! Time only passes when the caller advances the simulated clock, which
//! is what makes the one-shot firing protocol observable step by step.

use core::cell::Cell;

use crate::error::{Error, HardwareFault};
use crate::gpio::{GpioPort, Pin};
use crate::timer::{OneshotTimer, RawCallback};

// - SimPort ------------------------------------------------------------------

/// Number of GPIO lines the simulated port exposes.
pub const PIN_COUNT: usize = 4;

/// Simulated GPIO port.
///
/// Tracks direction, logical level and a toggle counter per line.
pub struct SimPort {
    outputs: [Cell<bool>; PIN_COUNT],
    levels: [Cell<bool>; PIN_COUNT],
    toggles: [Cell<u32>; PIN_COUNT],
}

impl SimPort {
    pub const fn new() -> Self {
        Self {
            outputs: [
                Cell::new(false),
                Cell::new(false),
                Cell::new(false),
                Cell::new(false),
            ],
            levels: [
                Cell::new(false),
                Cell::new(false),
                Cell::new(false),
                Cell::new(false),
            ],
            toggles: [Cell::new(0), Cell::new(0), Cell::new(0), Cell::new(0)],
        }
    }

    fn line(&self, pin: Pin) -> Result<usize, Error> {
        let index = pin.index() as usize;
        if index < PIN_COUNT {
            Ok(index)
        } else {
            Err(Error::InvalidPin(pin.index()))
        }
    }

    /// Logical level of `pin`.
    pub fn level(&self, pin: Pin) -> bool {
        self.levels[pin.index() as usize].get()
    }

    /// True once `pin` has been configured as an output.
    pub fn is_output(&self, pin: Pin) -> bool {
        self.outputs[pin.index() as usize].get()
    }

    /// Number of toggles observed on `pin`.
    pub fn toggle_count(&self, pin: Pin) -> u32 {
        self.toggles[pin.index() as usize].get()
    }
}

impl GpioPort for SimPort {
    fn enable_output(&self, pin: Pin) -> Result<(), Error> {
        let line = self.line(pin)?;
        self.outputs[line].set(true);
        Ok(())
    }

    fn set(&self, pin: Pin) -> Result<(), Error> {
        let line = self.line(pin)?;
        self.levels[line].set(true);
        Ok(())
    }

    fn clear(&self, pin: Pin) -> Result<(), Error> {
        let line = self.line(pin)?;
        self.levels[line].set(false);
        Ok(())
    }

    fn toggle(&self, pin: Pin) -> Result<(), Error> {
        let line = self.line(pin)?;
        self.levels[line].set(!self.levels[line].get());
        self.toggles[line].set(self.toggles[line].get() + 1);
        Ok(())
    }
}

// - SimTimer -----------------------------------------------------------------

#[derive(Clone, Copy)]
struct Pending {
    deadline_ms: u64,
    callback: RawCallback,
    user_data: *mut (),
}

/// Simulated one-shot timer driven by an explicit millisecond clock.
pub struct SimTimer {
    now_ms: Cell<u64>,
    subscriber: Cell<Option<(RawCallback, *mut ())>>,
    pending: Cell<Option<Pending>>,
    fired: Cell<u32>,
    fail_next: Cell<bool>,
}

impl SimTimer {
    pub const fn new() -> Self {
        Self {
            now_ms: Cell::new(0),
            subscriber: Cell::new(None),
            pending: Cell::new(None),
            fired: Cell::new(0),
            fail_next: Cell::new(false),
        }
    }

    /// Current simulated time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    /// Number of one-shots that have fired so far.
    pub fn fired_count(&self) -> u32 {
        self.fired.get()
    }

    /// Make the next `subscribe` or `oneshot` call fail.
    pub fn inject_fault(&self) {
        self.fail_next.set(true);
    }

    /// Advance the simulated clock by `ms`, firing a pending one-shot
    /// at its deadline. The callback runs with the clock set to that
    /// deadline, never earlier.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms.get() + ms;
        if let Some(pending) = self.pending.get() {
            if pending.deadline_ms <= target {
                self.now_ms.set(pending.deadline_ms);
                self.pending.set(None);
                self.fired.set(self.fired.get() + 1);
                (pending.callback)(0, 0, 0, pending.user_data);
            }
        }
        self.now_ms.set(target);
    }

    fn take_fault(&self) -> Result<(), HardwareFault> {
        if self.fail_next.take() {
            Err(HardwareFault)
        } else {
            Ok(())
        }
    }
}

impl OneshotTimer for SimTimer {
    unsafe fn subscribe(
        &self,
        callback: RawCallback,
        user_data: *mut (),
    ) -> Result<(), HardwareFault> {
        self.take_fault()?;
        self.subscriber.set(Some((callback, user_data)));
        Ok(())
    }

    fn oneshot(&self, delay_ms: u32) -> Result<(), HardwareFault> {
        self.take_fault()?;
        let (callback, user_data) = self.subscriber.take().ok_or(HardwareFault)?;
        self.pending.set(Some(Pending {
            deadline_ms: self.now_ms.get() + delay_ms as u64,
            callback,
            user_data,
        }));
        Ok(())
    }
}

// - tests --------------------------------------------------------------------
