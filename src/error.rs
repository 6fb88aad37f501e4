//! Error types for Placa.
//!
//! All errors implement `std::error::Error` and provide human-readable
//! messages. Error variants are specific enough to allow programmatic
//! handling.
//!
//! The ADC client wrapper itself defines no error kind — its read path is
//! infallible by contract and any hardware-level fault is the vendor
//! driver's responsibility. The variants here serve the I2C sensor
//! drivers, the power rail, and the thermal zone.

use std::fmt;
use thiserror::Error;

/// Primary error type for Placa operations.
///
/// Each variant provides sufficient context for debugging while remaining
/// actionable for programmatic error handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Hardware is not available on this system.
    ///
    /// This is a normal condition off the gateway board (e.g., a sensor
    /// probe on a development laptop). Applications should handle this
    /// gracefully.
    #[error("hardware not available: {subsystem}")]
    NotAvailable {
        /// The hardware subsystem that was requested.
        subsystem: Subsystem,
    },

    /// The I2C bus returned an error.
    #[error("I2C error: {message}")]
    I2c {
        /// Human-readable error message.
        message: String,
    },

    /// The sysfs GPIO layer returned an error.
    #[error("GPIO error: {message}")]
    Gpio {
        /// Human-readable error message.
        message: String,
    },

    /// A device answered the identity probe with an unknown ID.
    #[error("unexpected device ID 0x{found:02X} for {subsystem}")]
    UnexpectedDeviceId {
        /// The subsystem that was probed.
        subsystem: Subsystem,
        /// The ID byte the device actually reported.
        found: u8,
    },

    /// A sensor reported itself busy when a result was expected.
    #[error("{subsystem} is busy")]
    SensorBusy {
        /// The sensor that was still converting.
        subsystem: Subsystem,
    },

    /// A sensor frame failed its checksum.
    #[error("checksum mismatch: expected 0x{expected:02X}, found 0x{found:02X}")]
    Checksum {
        /// The checksum computed over the received payload.
        expected: u8,
        /// The checksum byte carried by the frame.
        found: u8,
    },

    /// Invalid input was provided to an API.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Description of what was invalid.
        reason: String,
    },

    /// The sysfs thermal zone could not be read or parsed.
    #[error("thermal zone error: {message}")]
    ThermalZone {
        /// Human-readable error message.
        message: String,
    },
}

/// Hardware subsystems exposed by Placa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    /// TLA2024 analog-to-digital converter (vendor driver).
    Adc,
    /// AHT20 temperature/humidity sensor.
    Aht20,
    /// EMC2101 fan controller.
    Emc2101,
    /// GPIO-switched ADC power rail.
    PowerRail,
    /// SoC thermal zone.
    Thermal,
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adc => write!(f, "TLA2024 ADC"),
            Self::Aht20 => write!(f, "AHT20 sensor"),
            Self::Emc2101 => write!(f, "EMC2101 fan controller"),
            Self::PowerRail => write!(f, "ADC power rail"),
            Self::Thermal => write!(f, "SoC thermal zone"),
        }
    }
}

/// Result type alias for Placa operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new `NotAvailable` error.
    #[must_use]
    pub const fn not_available(subsystem: Subsystem) -> Self {
        Self::NotAvailable { subsystem }
    }

    /// Create a new `I2c` error.
    #[must_use]
    pub fn i2c(message: impl Into<String>) -> Self {
        Self::I2c {
            message: message.into(),
        }
    }

    /// Create a new `Gpio` error.
    #[must_use]
    pub fn gpio(message: impl Into<String>) -> Self {
        Self::Gpio {
            message: message.into(),
        }
    }

    /// Create a new `UnexpectedDeviceId` error.
    #[must_use]
    pub const fn unexpected_device_id(subsystem: Subsystem, found: u8) -> Self {
        Self::UnexpectedDeviceId { subsystem, found }
    }

    /// Create a new `SensorBusy` error.
    #[must_use]
    pub const fn sensor_busy(subsystem: Subsystem) -> Self {
        Self::SensorBusy { subsystem }
    }

    /// Create a new `Checksum` error.
    #[must_use]
    pub const fn checksum(expected: u8, found: u8) -> Self {
        Self::Checksum { expected, found }
    }

    /// Create a new `InvalidInput` error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create a new `ThermalZone` error.
    #[must_use]
    pub fn thermal_zone(message: impl Into<String>) -> Self {
        Self::ThermalZone {
            message: message.into(),
        }
    }

    /// Check if this error indicates hardware is unavailable.
    #[must_use]
    pub const fn is_not_available(&self) -> bool {
        matches!(self, Self::NotAvailable { .. })
    }

    /// Check if this error came from the I2C bus.
    #[must_use]
    pub const fn is_i2c(&self) -> bool {
        matches!(self, Self::I2c { .. })
    }

    /// Check if this error is a frame checksum failure.
    #[must_use]
    pub const fn is_checksum(&self) -> bool {
        matches!(self, Self::Checksum { .. })
    }

    /// Get the subsystem this error refers to, if it names one.
    #[must_use]
    pub const fn subsystem(&self) -> Option<Subsystem> {
        match self {
            Self::NotAvailable { subsystem }
            | Self::UnexpectedDeviceId { subsystem, .. }
            | Self::SensorBusy { subsystem } => Some(*subsystem),
            _ => None,
        }
    }
}
