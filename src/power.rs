//! ADC power rail control.
//!
//! The ADC front end sits behind a GPIO-switched supply rail so the board
//! can power the converter down between measurement sessions. The switch
//! is driven through the sysfs GPIO interface.

use crate::error::{Error, Result};
use std::thread;
use std::time::Duration;
use sysfs_gpio::{Direction, Pin};
use tracing::{debug, instrument};

/// Delay between configuring the pin direction and driving it.
const SETTLE_DELAY: Duration = Duration::from_millis(200);

/// GPIO-switched supply rail for the ADC front end.
///
/// Holding a `PowerRail` claims nothing; the pin is exported only for the
/// duration of each [`set`](Self::set) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerRail {
    pin: u64,
}

impl PowerRail {
    /// Board default pin for the rail switch.
    pub const DEFAULT_PIN: u64 = 16;

    /// Address the rail switch on `pin`.
    #[must_use]
    pub const fn new(pin: u64) -> Self {
        Self { pin }
    }

    /// The sysfs pin number this rail is wired to.
    #[must_use]
    pub const fn pin(self) -> u64 {
        self.pin
    }

    /// Drive the rail on or off.
    ///
    /// Exports the pin, configures it as an output, waits for the switch
    /// to settle, then drives it.
    ///
    /// # Errors
    ///
    /// Returns an error if the sysfs GPIO interface rejects any step.
    #[instrument(level = "debug")]
    pub fn set(self, on: bool) -> Result<()> {
        debug!(pin = self.pin, on, "switching ADC power rail");
        let pin = Pin::new(self.pin);
        pin.with_exported(|| {
            pin.set_direction(Direction::Out)?;
            thread::sleep(SETTLE_DELAY);
            pin.set_value(u8::from(on))
        })
        .map_err(|e| Error::gpio(e.to_string()))
    }

    /// Power the rail on.
    ///
    /// # Errors
    ///
    /// Returns an error if the sysfs GPIO interface rejects any step.
    pub fn power_on(self) -> Result<()> {
        self.set(true)
    }

    /// Power the rail off.
    ///
    /// # Errors
    ///
    /// Returns an error if the sysfs GPIO interface rejects any step.
    pub fn power_off(self) -> Result<()> {
        self.set(false)
    }
}

impl Default for PowerRail {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PIN)
    }
}
