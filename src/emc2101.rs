//! EMC2101 fan controller driver.
//!
//! The EMC2101 drives the enclosure fan over PWM, measures fan speed
//! through its tachometer input, and carries an internal temperature
//! sensor plus an 8-entry temperature/speed lookup table.
//!
//! Datasheet: <https://ww1.microchip.com/downloads/en/DeviceDoc/2101.pdf>
//!
//! # Example
//!
//! ```no_run
//! use placa::emc2101::Emc2101;
//!
//! let mut fan = Emc2101::new(0)?;
//! fan.init()?;
//! fan.apply_default_config(30)?;
//! println!("fan speed: {} RPM", fan.fan_speed()?);
//! # Ok::<(), placa::Error>(())
//! ```

use crate::error::{Error, Result, Subsystem};
use crate::i2c::{self, I2cBus};
use bitflags::bitflags;
use tracing::{debug, instrument};

/// Fixed I2C address of the EMC2101.
pub const I2C_ADDR: u16 = 0x4C;

const REG_INTERNAL_TEMP: u8 = 0x00;
const REG_CONFIG: u8 = 0x03;
const REG_TEMP_FORCE: u8 = 0x0C;
const REG_TACH_LSB: u8 = 0x46;
const REG_TACH_MSB: u8 = 0x47;
const REG_TACH_LIMIT_LSB: u8 = 0x48;
const REG_TACH_LIMIT_MSB: u8 = 0x49;
const REG_FAN_CONFIG: u8 = 0x4A;
const REG_FAN_SETTING: u8 = 0x4C;
const REG_PWM_FREQ: u8 = 0x4D;
const REG_LUT_START: u8 = 0x50;
const REG_PRODUCT_ID: u8 = 0xFD;

const PRODUCT_ID_EMC2101: u8 = 0x16;
const PRODUCT_ID_EMC2101_R: u8 = 0x28;

/// Highest value the 6-bit fan setting register accepts.
const FAN_SETTING_MAX: u8 = 0x3F;

/// Tach count reported when the fan is stalled or disconnected.
const TACH_STALLED: u16 = 0x3FFF;

/// Tach clock constant: RPM = 5,400,000 / count.
const RPM_NUMERATOR: u32 = 5_400_000;

/// Number of lookup-table entries in the controller.
pub const LUT_ENTRIES: u8 = 8;

bitflags! {
    /// Main configuration register (0x03).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Config: u8 {
        /// Route the TACH pin as a tachometer input.
        const TACH_INPUT = 1 << 2;
    }
}

bitflags! {
    /// Fan configuration register (0x4A).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FanConfig: u8 {
        /// Override the PWM clock divider.
        const CLK_OVR = 1 << 2;
        /// Select the slow PWM base clock.
        const CLK_SEL = 1 << 3;
        /// Invert the PWM output polarity.
        const POLARITY = 1 << 4;
        /// Allow writes to the fan setting register instead of the LUT.
        const PROGRAM = 1 << 5;
        /// Use the forced-temperature register as the LUT input.
        const FORCE_TEMP = 1 << 6;
    }
}

/// Driver for one EMC2101 on a given I2C bus.
pub struct Emc2101 {
    bus: I2cBus,
}

impl Emc2101 {
    /// Open `bus` and select the controller's fixed address.
    ///
    /// # Errors
    ///
    /// Returns an error if the bus cannot be opened or addressed.
    pub fn new(bus: u8) -> Result<Self> {
        Ok(Self {
            bus: i2c::open(bus, I2C_ADDR)?,
        })
    }

    /// Probe the product ID register and confirm a supported controller.
    ///
    /// # Errors
    ///
    /// Returns an error on bus failure or when the device reports an
    /// unknown product ID.
    #[instrument(level = "debug", skip(self))]
    pub fn init(&mut self) -> Result<()> {
        let id = self.bus.read_reg(REG_PRODUCT_ID)?;
        if id != PRODUCT_ID_EMC2101 && id != PRODUCT_ID_EMC2101_R {
            return Err(Error::unexpected_device_id(Subsystem::Emc2101, id));
        }
        debug!(id, "fan controller present");
        Ok(())
    }

    /// Enable or disable the tachometer input.
    ///
    /// # Errors
    ///
    /// Returns an error on bus failure.
    pub fn enable_tach(&mut self, enable: bool) -> Result<()> {
        let bits = self.bus.read_reg(REG_CONFIG)?;
        let mut config = Config::from_bits_retain(bits);
        config.set(Config::TACH_INPUT, enable);
        self.bus.write_reg(REG_CONFIG, config.bits())
    }

    /// Invert the PWM output polarity.
    ///
    /// # Errors
    ///
    /// Returns an error on bus failure.
    pub fn invert_fan_output(&mut self, invert: bool) -> Result<()> {
        self.update_fan_config(FanConfig::POLARITY, invert)
    }

    /// Set the PWM frequency divider register.
    ///
    /// # Errors
    ///
    /// Returns an error on bus failure.
    pub fn set_pwm_frequency(&mut self, divider: u8) -> Result<()> {
        self.bus.write_reg(REG_PWM_FREQ, divider)
    }

    /// Select the PWM base clock and divider override.
    ///
    /// # Errors
    ///
    /// Returns an error on bus failure.
    pub fn set_pwm_clock(&mut self, slow_clock: bool, override_divider: bool) -> Result<()> {
        let bits = self.bus.read_reg(REG_FAN_CONFIG)?;
        let mut config = FanConfig::from_bits_retain(bits);
        config.set(FanConfig::CLK_SEL, slow_clock);
        config.set(FanConfig::CLK_OVR, override_divider);
        self.bus.write_reg(REG_FAN_CONFIG, config.bits())
    }

    /// Allow direct writes to the fan setting register (instead of the
    /// hardware lookup table).
    ///
    /// # Errors
    ///
    /// Returns an error on bus failure.
    pub fn enable_program(&mut self, enable: bool) -> Result<()> {
        self.update_fan_config(FanConfig::PROGRAM, enable)
    }

    /// Drive the fan at `percent` duty cycle.
    ///
    /// # Errors
    ///
    /// Returns an error on bus failure or when `percent` exceeds 100.
    #[instrument(level = "debug", skip(self))]
    pub fn set_duty_cycle(&mut self, percent: u8) -> Result<()> {
        if percent > 100 {
            return Err(Error::invalid_input(format!(
                "duty cycle {percent}% exceeds 100%"
            )));
        }
        self.bus.write_reg(REG_FAN_SETTING, duty_to_register(percent))
    }

    /// Write one lookup-table entry: at or above `temp_celsius`, run the
    /// fan at `duty_percent`.
    ///
    /// # Errors
    ///
    /// Returns an error on bus failure or for an entry index or duty out
    /// of range.
    pub fn set_lut(&mut self, index: u8, temp_celsius: u8, duty_percent: u8) -> Result<()> {
        if index >= LUT_ENTRIES {
            return Err(Error::invalid_input(format!(
                "LUT index {index} out of range 0..{LUT_ENTRIES}"
            )));
        }
        if duty_percent > 100 {
            return Err(Error::invalid_input(format!(
                "duty cycle {duty_percent}% exceeds 100%"
            )));
        }
        let offset = REG_LUT_START + index * 2;
        self.enable_program(true)?;
        self.bus.write_reg(offset, temp_celsius)?;
        self.bus.write_reg(offset + 1, lut_setting(duty_percent))?;
        self.enable_program(false)
    }

    /// Configure the minimum-RPM alert limit.
    ///
    /// # Errors
    ///
    /// Returns an error on bus failure or when `min_rpm` is zero.
    pub fn set_min_rpm(&mut self, min_rpm: u16) -> Result<()> {
        if min_rpm == 0 {
            return Err(Error::invalid_input("minimum RPM must be non-zero"));
        }
        let limit = rpm_to_tach_count(min_rpm);
        self.bus.write_reg(REG_TACH_LIMIT_LSB, (limit & 0xFF) as u8)?;
        self.bus.write_reg(REG_TACH_LIMIT_MSB, (limit >> 8) as u8)
    }

    /// Feed the lookup table from the forced-temperature register instead
    /// of the internal sensor.
    ///
    /// # Errors
    ///
    /// Returns an error on bus failure.
    pub fn enable_forced_temperature(&mut self, force: bool) -> Result<()> {
        self.update_fan_config(FanConfig::FORCE_TEMP, force)
    }

    /// Write the forced-temperature register.
    ///
    /// # Errors
    ///
    /// Returns an error on bus failure.
    pub fn force_temperature(&mut self, celsius: u8) -> Result<()> {
        self.bus.write_reg(REG_TEMP_FORCE, celsius)
    }

    /// Read the current fan speed in RPM.
    ///
    /// A stalled or disconnected fan reads as 0.
    ///
    /// # Errors
    ///
    /// Returns an error on bus failure.
    #[instrument(level = "debug", skip(self))]
    pub fn fan_speed(&mut self) -> Result<u16> {
        let lsb = self.bus.read_reg(REG_TACH_LSB)?;
        let msb = self.bus.read_reg(REG_TACH_MSB)?;
        Ok(tach_to_rpm(lsb, msb))
    }

    /// Read the controller's internal temperature in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns an error on bus failure.
    #[allow(clippy::cast_possible_wrap)] // register is two's complement
    pub fn temperature(&mut self) -> Result<i8> {
        Ok(self.bus.read_reg(REG_INTERNAL_TEMP)? as i8)
    }

    /// Apply the board's standard configuration and an initial duty cycle.
    ///
    /// # Errors
    ///
    /// Returns an error on bus failure or for a duty cycle above 100.
    #[instrument(level = "debug", skip(self))]
    pub fn apply_default_config(&mut self, duty_percent: u8) -> Result<()> {
        self.enable_tach(true)?;
        self.invert_fan_output(false)?;
        self.set_pwm_frequency(0x1F)?;
        self.enable_forced_temperature(true)?;
        self.set_pwm_clock(false, false)?;
        self.enable_program(true)?;
        self.set_duty_cycle(duty_percent)?;
        self.set_min_rpm(150)
    }

    fn update_fan_config(&mut self, flag: FanConfig, enable: bool) -> Result<()> {
        let bits = self.bus.read_reg(REG_FAN_CONFIG)?;
        let mut config = FanConfig::from_bits_retain(bits);
        config.set(flag, enable);
        self.bus.write_reg(REG_FAN_CONFIG, config.bits())
    }
}

/// Check if an EMC2101 answers on `bus`.
#[must_use]
pub fn is_available(bus: u8) -> bool {
    Emc2101::new(bus).and_then(|mut fan| fan.init()).is_ok()
}

/// Scale a 0-100 duty percentage into the 6-bit fan setting register.
#[allow(clippy::cast_possible_truncation)] // quotient is at most 64
fn duty_to_register(percent: u8) -> u8 {
    let setting = (u16::from(percent) * 64 / 100) as u8;
    setting.min(FAN_SETTING_MAX)
}

/// Scale a 0-100 duty percentage into a LUT speed setting.
#[allow(clippy::cast_possible_truncation)] // quotient is at most 63
fn lut_setting(percent: u8) -> u8 {
    (u16::from(percent) * u16::from(FAN_SETTING_MAX) / 100) as u8
}

/// Convert a tach register pair into RPM.
fn tach_to_rpm(lsb: u8, msb: u8) -> u16 {
    let count = u16::from(lsb) | (u16::from(msb & 0x3F) << 8);
    if count == TACH_STALLED || count == 0 {
        return 0;
    }
    u16::try_from(RPM_NUMERATOR / u32::from(count)).unwrap_or(u16::MAX)
}

/// Convert an RPM threshold into a tach count.
///
/// Callers guarantee `rpm` is non-zero.
fn rpm_to_tach_count(rpm: u16) -> u16 {
    u16::try_from(RPM_NUMERATOR / u32::from(rpm)).unwrap_or(u16::MAX)
}
