//! One-shot timer bridge.
//!
//! Decouples the interrupt-context timer callback from the main control
//! flow: the callback signals an atomic completion flag and the main
//! flow spins on it. The hardware supports at most one pending one-shot
//! and the bridge enforces that invariant at the call boundary.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use void::Void;

use crate::delay::CycleDelay;
use crate::error::{Error, HardwareFault};

// - types --------------------------------------------------------------------

/// Callback signature the platform invokes when a one-shot fires.
///
/// The three integer arguments are implementation defined and unused by
/// this application; the last argument is the user-data pointer given
/// at subscription.
pub type RawCallback = fn(usize, usize, usize, *mut ());

// - traits -------------------------------------------------------------------

/// One-shot timer contract supplied by the platform.
pub trait OneshotTimer {
    /// Register the callback invoked from interrupt context when the
    /// next one-shot fires.
    ///
    /// # Safety
    ///
    /// `user_data` must stay valid until the subscribed callback has
    /// fired; a subscription cannot be cancelled.
    unsafe fn subscribe(
        &self,
        callback: RawCallback,
        user_data: *mut (),
    ) -> Result<(), HardwareFault>;

    /// Schedule the timer to fire once after `delay_ms` milliseconds.
    fn oneshot(&self, delay_ms: u32) -> Result<(), HardwareFault>;
}

impl<'a, T: OneshotTimer> OneshotTimer for &'a T {
    unsafe fn subscribe(
        &self,
        callback: RawCallback,
        user_data: *mut (),
    ) -> Result<(), HardwareFault> {
        (**self).subscribe(callback, user_data)
    }

    fn oneshot(&self, delay_ms: u32) -> Result<(), HardwareFault> {
        (**self).oneshot(delay_ms)
    }
}

// - Completion ---------------------------------------------------------------

/// Completion flag shared between the waiting context and the firing
/// context.
///
/// The firing context writes with release ordering and the waiter reads
/// with acquire ordering, so the wake-up is observed on weakly ordered
/// cores too. One flag per outstanding request; the owner resets it
/// before re-arming.
pub struct Completion {
    fired: AtomicBool,
}

impl Completion {
    pub const fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
        }
    }

    /// Mark the event as fired. Called from interrupt context.
    pub fn signal(&self) {
        self.fired.store(true, Ordering::Release);
    }

    pub fn is_set(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Clear the flag so the next request can be armed.
    pub fn reset(&self) {
        self.fired.store(false, Ordering::Release);
    }

    /// Non-blocking check: `WouldBlock` until the event has fired.
    pub fn poll(&self) -> nb::Result<(), Void> {
        if self.is_set() {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}

/// Spin until `flag` is set.
///
/// No timeout and no cancellation: if the timer never fires this never
/// returns. [`OneshotBridge::wait_timeout`] is the bounded variant.
pub fn wait_for(flag: &Completion) {
    while !flag.is_set() {
        core::hint::spin_loop();
    }
}

// - OneshotBridge ------------------------------------------------------------

/// Protocol layer over a platform one-shot timer.
///
/// Tracks the single request the hardware supports and rejects arming
/// another until the previous firing has been consumed.
pub struct OneshotBridge<T> {
    timer: T,
    armed: bool,
}

impl<T: OneshotTimer> OneshotBridge<T> {
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            armed: false,
        }
    }

    /// Register `callback` with `shared` as its user data.
    ///
    /// The `'static` bound keeps the user-data pointer handed to the
    /// platform valid for as long as the callback can fire.
    pub fn subscribe<S>(
        &mut self,
        callback: RawCallback,
        shared: &'static S,
    ) -> Result<(), Error> {
        if self.armed {
            return Err(Error::AlreadyArmed);
        }
        unsafe { self.timer.subscribe(callback, shared as *const S as *mut ()) }?;
        Ok(())
    }

    /// Arm the one-shot. Exactly one request may be outstanding.
    pub fn arm_oneshot(&mut self, delay_ms: u32) -> Result<(), Error> {
        if self.armed {
            return Err(Error::AlreadyArmed);
        }
        self.timer.oneshot(delay_ms)?;
        self.armed = true;
        Ok(())
    }

    /// Non-blocking completion check.
    ///
    /// On completion the flag is reset and the bridge accepts the next
    /// request.
    pub fn poll_fired(&mut self, flag: &Completion) -> nb::Result<(), Void> {
        flag.poll()?;
        flag.reset();
        self.armed = false;
        Ok(())
    }

    /// Block by spinning until `flag` is set, then reset it.
    pub fn wait_for(&mut self, flag: &Completion) {
        match nb::block!(self.poll_fired(flag)) {
            Ok(()) => (),
            Err(never) => void::unreachable(never),
        }
    }

    /// Bounded wait: poll `flag` at one-millisecond calibrated
    /// intervals for up to `timeout_ms`.
    ///
    /// Use this where a hung timer must surface as [`Error::TimedOut`]
    /// instead of blocking forever.
    pub fn wait_timeout(
        &mut self,
        flag: &Completion,
        timeout_ms: u32,
        delay: &CycleDelay,
    ) -> Result<(), Error> {
        let mut remaining = timeout_ms;
        loop {
            if self.poll_fired(flag).is_ok() {
                return Ok(());
            }
            if remaining == 0 {
                return Err(Error::TimedOut);
            }
            delay.delay_ms(1);
            remaining -= 1;
        }
    }

    /// True while a request is outstanding.
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

// - BusyWaitTimer ------------------------------------------------------------

/// Fallback timer for platforms without a hardware one-shot.
///
/// `oneshot` busy-waits the full delay on the calibrated spin primitive
/// and invokes the subscribed callback synchronously, from the caller's
/// own context, before returning.
pub struct BusyWaitTimer {
    delay: CycleDelay,
    subscriber: Cell<Option<(RawCallback, *mut ())>>,
}

impl BusyWaitTimer {
    pub const fn new(delay: CycleDelay) -> Self {
        Self {
            delay,
            subscriber: Cell::new(None),
        }
    }
}

impl OneshotTimer for BusyWaitTimer {
    unsafe fn subscribe(
        &self,
        callback: RawCallback,
        user_data: *mut (),
    ) -> Result<(), HardwareFault> {
        self.subscriber.set(Some((callback, user_data)));
        Ok(())
    }

    fn oneshot(&self, delay_ms: u32) -> Result<(), HardwareFault> {
        let (callback, user_data) = self.subscriber.take().ok_or(HardwareFault)?;
        self.delay.delay_ms(delay_ms);
        callback(0, 0, 0, user_data);
        Ok(())
    }
}

// - tests --------------------------------------------------------------------
