//! AHT20 temperature/humidity sensor driver.
//!
//! The AHT20 sits on the gateway board's I2C bus at address 0x38 and
//! reports relative humidity and temperature as 20-bit fields in a 7-byte
//! frame protected by a CRC-8.
//!
//! Datasheet: <http://www.aosong.com/en/products-32.html>
//!
//! # Example
//!
//! ```no_run
//! use placa::aht20::Aht20;
//!
//! let mut sensor = Aht20::new(0)?;
//! sensor.init()?;
//! let reading = sensor.measure()?;
//! println!("{:.1} degC, {:.1} %RH",
//!     reading.temperature_celsius, reading.humidity_percent);
//! # Ok::<(), placa::Error>(())
//! ```

use crate::error::{Error, Result, Subsystem};
use crate::i2c::{self, I2cBus};
use crc_all::CrcAlgo;
use std::thread;
use std::time::Duration;
use tracing::{debug, instrument};

/// Fixed I2C address of the AHT20.
pub const I2C_ADDR: u16 = 0x38;

const CMD_STATUS: u8 = 0x71;
const CMD_INITIALIZE: [u8; 3] = [0xBE, 0x08, 0x00];
const CMD_TRIGGER_MEASUREMENT: [u8; 3] = [0xAC, 0x33, 0x00];

const STATUS_BUSY: u8 = 0x80;
const STATUS_CALIBRATED: u8 = 0x08;

const INIT_DELAY: Duration = Duration::from_millis(10);
const MEASUREMENT_DELAY: Duration = Duration::from_millis(80);

const CRC8_INIT: u8 = 0xFF;

// CRC-8 with polynomial 0x31, init 0xFF, no reflection, no output XOR,
// per the sensor frame format.
const CRC8: CrcAlgo<u8> = CrcAlgo::<u8>::new(0x31, 8, CRC8_INIT, 0, false);

/// Scale divisor for the 20-bit humidity and temperature fields.
const FIELD_DIVISOR: f32 = 1_048_576.0;

fn crc8(data: &[u8]) -> u8 {
    let mut crc = CRC8_INIT;
    CRC8.update_crc(&mut crc, data);
    CRC8.finish_crc(&crc)
}

/// One decoded humidity/temperature measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aht20Reading {
    /// Relative humidity, 0-100 %RH.
    pub humidity_percent: f32,
    /// Temperature in degrees Celsius.
    pub temperature_celsius: f32,
}

/// Driver for one AHT20 on a given I2C bus.
pub struct Aht20 {
    bus: I2cBus,
}

impl Aht20 {
    /// Open `bus` and select the sensor's fixed address.
    ///
    /// # Errors
    ///
    /// Returns an error if the bus cannot be opened or addressed.
    pub fn new(bus: u8) -> Result<Self> {
        Ok(Self {
            bus: i2c::open(bus, I2C_ADDR)?,
        })
    }

    /// Bring the sensor to a calibrated state.
    ///
    /// Reads the status register and, when the calibration bit is clear,
    /// issues the initialize command and re-checks.
    ///
    /// # Errors
    ///
    /// Returns an error on bus failure or if the sensor stays
    /// uncalibrated after initialization.
    #[instrument(level = "debug", skip(self))]
    pub fn init(&mut self) -> Result<()> {
        let status = self.status()?;
        if status & STATUS_CALIBRATED == 0 {
            debug!(status, "sensor uncalibrated, sending initialize command");
            self.bus.write(&CMD_INITIALIZE)?;
            thread::sleep(INIT_DELAY);
            if self.status()? & STATUS_CALIBRATED == 0 {
                return Err(Error::not_available(Subsystem::Aht20));
            }
        }
        Ok(())
    }

    /// Trigger one conversion and decode the result.
    ///
    /// Blocks for the datasheet conversion time before reading the frame.
    ///
    /// # Errors
    ///
    /// Returns an error on bus failure, if the sensor is still busy when
    /// the frame is read, or if the frame checksum does not match.
    #[instrument(level = "debug", skip(self))]
    pub fn measure(&mut self) -> Result<Aht20Reading> {
        self.bus.write(&CMD_TRIGGER_MEASUREMENT)?;
        thread::sleep(MEASUREMENT_DELAY);
        let mut frame = [0u8; 7];
        self.bus.read(&mut frame)?;
        decode_measurement(&frame)
    }

    fn status(&mut self) -> Result<u8> {
        self.bus.write(&[CMD_STATUS])?;
        let mut reg = [0u8; 1];
        self.bus.read(&mut reg)?;
        Ok(reg[0])
    }
}

/// Check if an AHT20 answers on `bus`.
#[must_use]
pub fn is_available(bus: u8) -> bool {
    Aht20::new(bus).and_then(|mut sensor| sensor.status()).is_ok()
}

/// Decode a 7-byte measurement frame.
///
/// Layout: status, three humidity-dominant bytes with the shared nibble in
/// byte 3, two temperature bytes, CRC-8 over the first six bytes.
#[allow(clippy::cast_precision_loss)] // 20-bit fields are exact in an f32
fn decode_measurement(frame: &[u8; 7]) -> Result<Aht20Reading> {
    if frame[0] & STATUS_BUSY != 0 {
        return Err(Error::sensor_busy(Subsystem::Aht20));
    }

    let expected = crc8(&frame[..6]);
    if expected != frame[6] {
        return Err(Error::checksum(expected, frame[6]));
    }

    let raw_humidity =
        (u32::from(frame[1]) << 12) | (u32::from(frame[2]) << 4) | (u32::from(frame[3]) >> 4);
    let raw_temperature =
        (u32::from(frame[3] & 0x0F) << 16) | (u32::from(frame[4]) << 8) | u32::from(frame[5]);

    Ok(Aht20Reading {
        humidity_percent: raw_humidity as f32 / FIELD_DIVISOR * 100.0,
        temperature_celsius: raw_temperature as f32 / FIELD_DIVISOR * 200.0 - 50.0,
    })
}
