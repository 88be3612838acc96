//! Periodic blink core: a fixed four-pin blink pattern driven by a
//! one-shot hardware timer, with a busy-wait handshake between the
//! timer's interrupt-context callback and the main control flow.
//!
//! The GPIO port and the one-shot timer are supplied by the underlying
//! firmware SDK; this crate defines the contract it needs from them
//! ([`gpio::GpioPort`], [`timer::OneshotTimer`]) and everything built
//! on top: the calibrated busy-wait delay, the timer event bridge with
//! its completion flag, and the blink control loop.
//!
//! # Usage - see demos/

#![cfg_attr(not(test), no_std)]

// - modules ------------------------------------------------------------------

pub mod app;
pub mod delay;
pub mod error;
pub mod gpio;
pub mod led;
#[cfg(any(test, feature = "sim"))]
pub mod sim;
pub mod timer;

// - re-exports ---------------------------------------------------------------

pub use app::{BlinkApp, Shared, BLINK_INTERVAL_MS, BLINK_PIN, HEARTBEAT_PIN, OUTPUT_PINS};
pub use delay::CycleDelay;
pub use error::{Error, HardwareFault};
pub use gpio::{GpioPort, Pin};
pub use led::{Led, UserLed};
pub use timer::{
    wait_for, BusyWaitTimer, Completion, OneshotBridge, OneshotTimer, RawCallback,
};
