//! FFI Quarantine Zone - All unsafe code isolated here.
//!
//! # Safety Architecture
//!
//! This module contains ALL unsafe code in the placa crate. The public API
//! in `src/lib.rs` uses `#![deny(unsafe_code)]`, ensuring no unsafe code
//! can leak into the user-facing interface.
//!
//! ## Safety Rules
//!
//! - Every `unsafe` block has a `// SAFETY:` comment
//! - No raw pointers escape the FFI module
//! - Every vendor allocation is released exactly once, from `Drop`
//! - Thread safety is explicitly documented
//!
//! # Module Structure
//!
//! ```text
//! ffi/
//! ├── mod.rs          # This file - module router + simulation fallback
//! └── tla2024.rs      # Vendor TLA2024 driver bindings (feature "vendor-adc")
//! ```
//!
//! Without the `vendor-adc` feature the vendor bindings are replaced by a
//! deterministic in-memory simulation with the identical interface, so the
//! safe wrapper behaves the same way on every host.

// Allow unsafe in this module only - quarantine zone
#![allow(unsafe_code)]

#[cfg(feature = "vendor-adc")]
pub mod tla2024;

// Simulation module for builds without the vendor driver library
#[cfg(not(feature = "vendor-adc"))]
pub mod tla2024 {
    //! Simulated TLA2024 driver for builds without the vendor library.
    //!
    //! Mirrors the vendor driver's observable contract: construction never
    //! fails, a single-ended read always returns a `u16` in the converter's
    //! positive 11-bit range, and a mux selection above channel 3 reads as
    //! zero. Each driver instance keeps its own conversion counter, so
    //! independent handles never share state.

    use std::cell::Cell;
    use std::marker::PhantomData;

    /// Highest positive count the 12-bit converter can report.
    const FULL_SCALE: u16 = 0x07FF;

    /// Idle-board baseline counts for the four wired inputs.
    const BASELINES: [u16; 4] = [0x02A4, 0x01C8, 0x0520, 0x03C0];

    /// Simulated driver instance.
    ///
    /// `!Send` and `!Sync`, like the vendor handle it stands in for.
    pub struct Tla2024 {
        conversions: Cell<u32>,
        _not_send_sync: PhantomData<*const ()>,
    }

    impl Tla2024 {
        /// Default-initialize one simulated converter.
        #[must_use]
        pub const fn new() -> Self {
            Self {
                conversions: Cell::new(0),
                _not_send_sync: PhantomData,
            }
        }

        /// Run one simulated single-ended conversion.
        ///
        /// Channels above 3 are an invalid mux selection and read as zero,
        /// matching the vendor driver. Valid channels report their baseline
        /// plus a small deterministic wobble driven by the per-instance
        /// conversion counter.
        pub fn single_ended_read(&self, channel: u8) -> u16 {
            if channel > 3 {
                return 0;
            }
            let n = self.conversions.get();
            self.conversions.set(n.wrapping_add(1));
            let wobble = (n % 8) as u16;
            BASELINES[usize::from(channel)]
                .saturating_add(wobble)
                .min(FULL_SCALE)
        }
    }
}
