use crate::gpio::{GpioPort, Pin};

// - traits -------------------------------------------------------------------

/// Generic LED
pub trait Led {
    /// Turns the LED off
    fn off(&self);

    /// Turns the LED on
    fn on(&self);

    /// Inverts the LED
    fn toggle(&self);
}

// - UserLed ------------------------------------------------------------------

/// An LED reached through a numbered line on the platform port.
pub struct UserLed<G> {
    port: G,
    pin: Pin,
}

impl<G: GpioPort> UserLed<G> {
    pub fn new(port: G, pin: Pin) -> Self {
        Self { port, pin }
    }

    pub fn pin(&self) -> Pin {
        self.pin
    }
}

impl<G: GpioPort> Led for UserLed<G> {
    fn on(&self) {
        if let Ok(()) = self.port.set(self.pin) {}
    }

    fn off(&self) {
        if let Ok(()) = self.port.clear(self.pin) {}
    }

    fn toggle(&self) {
        if let Ok(()) = self.port.toggle(self.pin) {}
    }
}

// - tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimPort;

    #[test]
    fn led_drives_its_line() {
        let port = SimPort::new();
        port.enable_output(Pin::new(1)).unwrap();

        let led = UserLed::new(&port, Pin::new(1));
        led.on();
        assert!(port.level(Pin::new(1)));
        led.off();
        assert!(!port.level(Pin::new(1)));
        led.toggle();
        assert!(port.level(Pin::new(1)));
    }
}
