//! Vendor TLA2024 driver bindings.
//!
//! # Safety
//!
//! This module contains unsafe FFI code. All unsafe blocks are documented
//! with SAFETY comments explaining why they are sound.
//!
//! # Thread Safety
//!
//! The vendor driver keeps per-instance bus state and is NOT thread-safe.
//! The wrapper type is `!Send` and `!Sync` to prevent cross-thread usage.
//!
//! # Vendor Contract
//!
//! The driver library exposes an opaque converter object with three entry
//! points. Construction aborts internally on allocation failure and never
//! returns null; a single-ended read always returns a 16-bit count and
//! reads an invalid mux selection (channel above 3) as zero. Any bus-level
//! fault handling happens inside the library.

use std::ffi::c_void;
use std::marker::PhantomData;
use std::ptr::NonNull;

// External vendor driver functions
#[link(name = "tla2024")]
extern "C" {
    fn tla2024_new() -> *mut c_void;
    fn tla2024_delete(adc: *mut c_void);
    fn tla2024_read_single_ended(adc: *const c_void, channel: u8) -> u16;
}

/// RAII wrapper for one vendor converter instance.
///
/// Releases the instance on drop.
///
/// # Thread Safety
///
/// This type is `!Send` and `!Sync` because the vendor driver is not
/// thread-safe.
pub struct Tla2024 {
    raw: NonNull<c_void>,
    // Prevent Send/Sync - the vendor driver is not thread-safe
    _not_send_sync: PhantomData<*const ()>,
}

impl Tla2024 {
    /// Allocate and default-initialize one converter instance.
    #[must_use]
    pub fn new() -> Self {
        // SAFETY: tla2024_new takes no arguments and returns a pointer the
        // caller owns. The vendor constructor aborts internally on
        // allocation failure and never returns null.
        let raw = unsafe { tla2024_new() };
        let raw = NonNull::new(raw).unwrap_or_else(|| std::process::abort());
        Self {
            raw,
            _not_send_sync: PhantomData,
        }
    }

    /// Run one single-ended conversion on `channel`.
    ///
    /// The channel byte is handed to the driver verbatim; mux validation is
    /// the driver's concern.
    pub fn single_ended_read(&self, channel: u8) -> u16 {
        // SAFETY: raw is a valid converter pointer obtained from
        // tla2024_new and not yet released; the driver treats the handle as
        // const for reads.
        unsafe { tla2024_read_single_ended(self.raw.as_ptr(), channel) }
    }
}

impl Drop for Tla2024 {
    fn drop(&mut self) {
        // SAFETY: raw was obtained from tla2024_new and is released exactly
        // once here.
        unsafe {
            tla2024_delete(self.raw.as_ptr());
        }
    }
}
