//! ADC client for the gateway board's TLA2024 converter.
//!
//! The board routes four analog rails into a TLA2024 analog-to-digital
//! converter that is owned by a vendor driver library. This module exposes
//! that converter as an opaque, exclusively-owned handle: a zero-argument
//! constructor and a single-ended read, nothing else. All mux validation,
//! bus timing, and fault handling live inside the driver; the wrapper
//! forwards the channel byte verbatim and returns the count unmodified.
//!
//! # Example
//!
//! ```
//! use placa::adc::AdcClient;
//!
//! let adc = AdcClient::new();
//! let raw = adc.read(0);
//! println!("channel 0 raw count: {raw}");
//! ```
//!
//! # Thread Safety
//!
//! [`AdcClient`] is `!Send` and `!Sync` because the underlying driver
//! instance is not thread-safe. At most one caller may use a given handle
//! at a time; wrap the handle in your own synchronization if it must be
//! shared.
//!
//! # Builds Without the Vendor Driver
//!
//! Without the `vendor-adc` feature, reads are served by a deterministic
//! in-memory simulation with the same contract. The client is constructible
//! either way; [`is_available`] reports whether reads reach real hardware.

use crate::ffi::tla2024::Tla2024;
use std::fmt;
use tracing::{debug, instrument};

/// Number of analog inputs wired on the board.
pub const CHANNEL_COUNT: u8 = 4;

/// Converter full-scale voltage for the board's gain setting.
const FULL_SCALE_VOLTS: f32 = 6.144;

/// Positive counts at full scale for the 12-bit converter.
const FULL_SCALE_COUNTS: f32 = 2048.0;

/// Client handle owning one converter driver instance.
///
/// Construction always succeeds; there is no fallible initialization path.
/// The handle's observable state never changes after construction - each
/// read is a fresh, independent query with nothing cached in between.
///
/// # Thread Safety
///
/// `!Send` and `!Sync`; see the module docs.
pub struct AdcClient {
    driver: Tla2024,
}

impl AdcClient {
    /// Allocate and default-initialize one underlying driver instance.
    ///
    /// # Example
    ///
    /// ```
    /// use placa::adc::AdcClient;
    ///
    /// let adc = AdcClient::new();
    /// let _ = adc.read(0);
    /// ```
    #[instrument(level = "debug")]
    #[must_use]
    pub fn new() -> Self {
        debug!("creating ADC client");
        Self {
            driver: Tla2024::new(),
        }
    }

    /// Run one single-ended conversion and return the raw count.
    ///
    /// The channel identifier is forwarded to the driver verbatim: no
    /// retries, no range check, no unit conversion. Behavior for channels
    /// the board does not wire (above 3) is the driver's contract, not the
    /// wrapper's.
    #[instrument(level = "debug", skip(self))]
    #[must_use]
    pub fn read(&self, channel: u8) -> u16 {
        self.driver.single_ended_read(channel)
    }

    /// Read a wired channel and convert it to its physical quantity.
    ///
    /// This is a typed convenience layer over [`read`](Self::read); the raw
    /// path stays unvalidated and unconverted.
    #[must_use]
    pub fn read_measurement(&self, channel: BoardChannel) -> Measurement {
        convert(channel, self.read(channel.index()))
    }

    /// Check whether reads reach the vendor driver (and thus real hardware)
    /// rather than the built-in simulation.
    #[must_use]
    pub const fn is_vendor_backed() -> bool {
        cfg!(feature = "vendor-adc")
    }
}

impl Default for AdcClient {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AdcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdcClient")
            .field("vendor_backed", &Self::is_vendor_backed())
            .finish_non_exhaustive()
    }
}

/// The four analog inputs wired on the gateway board.
///
/// Two current-sense amplifier outputs and two divided voltage rails.
/// Raw reads take any `u8`; this type exists so the conversion surface is
/// restricted to wired inputs by construction instead of by runtime checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardChannel {
    /// Supply current through the 2.5 V/A sense amplifier (channel 0).
    Current0,
    /// Auxiliary current through the 1 V/A sense amplifier (channel 1).
    Current1,
    /// Supply rail behind the 33.24:3.24 divider (channel 2).
    Voltage0,
    /// Backup rail behind the 2:1 divider (channel 3).
    Voltage1,
}

impl BoardChannel {
    /// All wired channels, in mux order.
    pub const ALL: [Self; CHANNEL_COUNT as usize] =
        [Self::Current0, Self::Current1, Self::Voltage0, Self::Voltage1];

    /// The mux index this channel occupies.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Current0 => 0,
            Self::Current1 => 1,
            Self::Voltage0 => 2,
            Self::Voltage1 => 3,
        }
    }

    /// Look up the wired channel at a mux index, if any.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Current0),
            1 => Some(Self::Current1),
            2 => Some(Self::Voltage0),
            3 => Some(Self::Voltage1),
            _ => None,
        }
    }
}

impl fmt::Display for BoardChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current0 => write!(f, "current 0"),
            Self::Current1 => write!(f, "current 1"),
            Self::Voltage0 => write!(f, "voltage 0"),
            Self::Voltage1 => write!(f, "voltage 1"),
        }
    }
}

/// A converted channel reading in physical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// A current-sense reading.
    Milliamps(f32),
    /// A divided-rail voltage reading.
    Millivolts(f32),
}

impl Measurement {
    /// The numeric value, without its unit.
    #[must_use]
    pub const fn value(self) -> f32 {
        match self {
            Self::Milliamps(v) | Self::Millivolts(v) => v,
        }
    }

    /// The unit suffix for this measurement.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Milliamps(_) => "mA",
            Self::Millivolts(_) => "mV",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} {}", self.value(), self.unit())
    }
}

/// Convert a raw count from a wired channel into its physical quantity.
///
/// Applies the converter's 6.144 V full scale over 2048 counts, then the
/// channel's sense gain or divider ratio.
#[must_use]
pub fn convert(channel: BoardChannel, raw: u16) -> Measurement {
    let volts = f32::from(raw) * FULL_SCALE_VOLTS / FULL_SCALE_COUNTS;
    match channel {
        BoardChannel::Current0 => Measurement::Milliamps(volts / 2.5 * 1000.0),
        BoardChannel::Current1 => Measurement::Milliamps(volts * 1000.0),
        BoardChannel::Voltage0 => Measurement::Millivolts(volts * (33.24 / 3.24) * 1000.0),
        BoardChannel::Voltage1 => Measurement::Millivolts(volts * 2.0 * 1000.0),
    }
}

/// Check whether the ADC subsystem reaches real hardware.
///
/// Convenience function equivalent to [`AdcClient::is_vendor_backed`].
#[must_use]
pub const fn is_available() -> bool {
    AdcClient::is_vendor_backed()
}
