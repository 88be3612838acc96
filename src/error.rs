//! Error classification for the blink core.
//!
//! The underlying platform has no recoverable-error paths of its own, so
//! everything that can go wrong is rejected here, at the call boundary,
//! instead of corrupting state or hanging silently.

// - types --------------------------------------------------------------------

/// The timer hardware failed to subscribe or arm.
///
/// Fatal: this domain has no recovery strategy short of a watchdog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HardwareFault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Pin index outside the range exposed by the port.
    InvalidPin(u8),

    /// A one-shot request is still outstanding.
    AlreadyArmed,

    /// The timer hardware failed to subscribe or arm.
    Hardware(HardwareFault),

    /// The completion flag was not set within the wait budget.
    TimedOut,
}

impl From<HardwareFault> for Error {
    fn from(fault: HardwareFault) -> Self {
        Error::Hardware(fault)
    }
}
