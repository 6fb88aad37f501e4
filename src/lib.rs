//! Placa: Safe Rust Interfaces for LoRa Gateway Board Peripherals
//!
//! Placa provides safe, panic-free Rust interfaces to the peripherals of
//! a LoRa gateway carrier board: the measurement ADC behind its vendor
//! driver, the climate sensor, the fan controller, the ADC power rail,
//! and the SoC thermal zone.
//!
//! # Design Philosophy
//!
//! - **Zero unsafe in public API**: All FFI quarantined in internal modules
//! - **Graceful degradation**: Absent hardware is an error or a fallback,
//!   never a panic
//! - **Narrow wrappers**: Validation and fault handling stay where the
//!   hardware contract puts them
//!
//! # Supported Hardware
//!
//! | Hardware | Module | Bus | Notes |
//! |----------|--------|-----|-------|
//! | TLA2024 ADC | [`adc`] | vendor driver (FFI) | simulated without `vendor-adc` |
//! | AHT20 climate sensor | [`aht20`] | I2C 0x38 | Linux only |
//! | EMC2101 fan controller | [`emc2101`] | I2C 0x4C | Linux only |
//! | ADC power rail | [`power`] | sysfs GPIO | Linux only |
//! | SoC thermal zone | [`thermal`] | sysfs | Linux only |
//!
//! # Quick Start
//!
//! ```
//! use placa::adc::{AdcClient, BoardChannel};
//!
//! let adc = AdcClient::new();
//! let raw = adc.read(0);
//! let supply = adc.read_measurement(BoardChannel::Current0);
//! println!("raw {raw}, converted {supply}");
//! ```
//!
//! # Feature Flags
//!
//! - `vendor-adc` - Link the vendor TLA2024 driver library. Without it,
//!   ADC reads are served by a deterministic in-memory simulation with the
//!   same contract.
//!
//! # Safety Guarantees
//!
//! This crate uses `#![deny(unsafe_code)]` at the library level. All FFI
//! code is quarantined in the internal `ffi` module, which is not exported.
//!
//! # Error Handling
//!
//! Fallible operations return [`Result<T, Error>`]. The [`Error`] type
//! provides specific variants for different failure modes, enabling
//! programmatic error handling. The ADC client itself is infallible by
//! contract - see the [`adc`] module docs.
//!
//! # Thread Safety
//!
//! [`adc::AdcClient`] is `!Send` and `!Sync` because the vendor driver is
//! not thread-safe. The I2C drivers own their bus handle exclusively;
//! create one per thread or serialize access yourself.

// SAFETY: This crate denies unsafe code at the library level.
// All unsafe FFI code is quarantined in src/ffi/, which is not exported.
// We use deny (not forbid) so it can be overridden in the ffi module.
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)] // Allow TLA2024, AHT20, sysfs, etc. without backticks

pub mod adc;
pub mod aht20;
pub mod emc2101;
pub mod error;
pub mod power;
pub mod report;
pub mod thermal;

// FFI module is internal only - not exported
mod ffi;

// Internal I2C bus seam shared by the sensor drivers
mod i2c;

// Re-export main types for convenience
pub use adc::{AdcClient, BoardChannel, Measurement};
pub use aht20::{Aht20, Aht20Reading};
pub use emc2101::Emc2101;
pub use error::{Error, Result, Subsystem};
pub use power::PowerRail;
pub use report::BoardReport;
pub use thermal::{FanCurve, FanStep};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check if we're running on Linux.
#[must_use]
pub const fn is_linux() -> bool {
    cfg!(target_os = "linux")
}

/// Check if any board peripheral is reachable.
///
/// Probes the default I2C bus for the climate sensor and fan controller
/// and reports whether the ADC is vendor-backed. Returns `true` if at
/// least one peripheral answers.
#[must_use]
pub fn is_board_available() -> bool {
    adc::is_available() || aht20::is_available(0) || emc2101::is_available(0)
}
