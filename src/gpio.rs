//! GPIO contract between the blink core and the platform.
//!
//! The port hardware itself is supplied by the firmware SDK; this module
//! only defines the operations the core requires from it.

use crate::error::Error;

// - types --------------------------------------------------------------------

/// Index of a GPIO line on the platform port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin(u8);

impl Pin {
    pub const fn new(index: u8) -> Self {
        Pin(index)
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}

// - traits -------------------------------------------------------------------

/// Operations the core requires from the platform GPIO port.
///
/// Methods take `&self`: the port is driven from both the main flow and
/// interrupt context, so platform implementations go through interior
/// mutability. An index the port does not expose fails with
/// [`Error::InvalidPin`].
pub trait GpioPort {
    /// Configure `pin` as an output.
    fn enable_output(&self, pin: Pin) -> Result<(), Error>;

    /// Drive `pin` high.
    fn set(&self, pin: Pin) -> Result<(), Error>;

    /// Drive `pin` low.
    fn clear(&self, pin: Pin) -> Result<(), Error>;

    /// Invert the logical level of `pin`.
    fn toggle(&self, pin: Pin) -> Result<(), Error>;
}

impl<'a, G: GpioPort> GpioPort for &'a G {
    fn enable_output(&self, pin: Pin) -> Result<(), Error> {
        (**self).enable_output(pin)
    }

    fn set(&self, pin: Pin) -> Result<(), Error> {
        (**self).set(pin)
    }

    fn clear(&self, pin: Pin) -> Result<(), Error> {
        (**self).clear(pin)
    }

    fn toggle(&self, pin: Pin) -> Result<(), Error> {
        (**self).toggle(pin)
    }
}
