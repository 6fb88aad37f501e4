//! Internal I2C bus access.
//!
//! Thin seam over the Linux userspace I2C interface. On other platforms
//! the same interface exists but fails gracefully with
//! [`Error::i2c`](crate::Error), mirroring the quarantine module's
//! stub-on-unsupported-platform pattern so the sensor drivers compile
//! everywhere.

use crate::error::Result;

#[cfg(target_os = "linux")]
mod imp {
    use crate::error::{Error, Result};
    use rppal::i2c::I2c;

    /// One open bus with a selected slave address.
    pub struct I2cBus {
        inner: I2c,
    }

    impl I2cBus {
        pub fn open(bus: u8, addr: u16) -> Result<Self> {
            let mut inner = I2c::with_bus(bus).map_err(|e| Error::i2c(e.to_string()))?;
            inner
                .set_slave_address(addr)
                .map_err(|e| Error::i2c(e.to_string()))?;
            Ok(Self { inner })
        }

        pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
            self.inner
                .write(bytes)
                .map(|_| ())
                .map_err(|e| Error::i2c(e.to_string()))
        }

        pub fn read(&mut self, buffer: &mut [u8]) -> Result<()> {
            self.inner
                .read(buffer)
                .map(|_| ())
                .map_err(|e| Error::i2c(e.to_string()))
        }

        pub fn read_reg(&mut self, reg: u8) -> Result<u8> {
            self.inner
                .smbus_read_byte(reg)
                .map_err(|e| Error::i2c(e.to_string()))
        }

        pub fn write_reg(&mut self, reg: u8, value: u8) -> Result<()> {
            self.inner
                .smbus_write_byte(reg, value)
                .map_err(|e| Error::i2c(e.to_string()))
        }
    }
}

#[cfg(not(target_os = "linux"))]
mod imp {
    use crate::error::{Error, Result};

    /// Stub bus for platforms without userspace I2C.
    pub struct I2cBus {
        _private: (),
    }

    impl I2cBus {
        pub fn open(_bus: u8, _addr: u16) -> Result<Self> {
            Err(Self::unsupported())
        }

        pub fn write(&mut self, _bytes: &[u8]) -> Result<()> {
            Err(Self::unsupported())
        }

        pub fn read(&mut self, _buffer: &mut [u8]) -> Result<()> {
            Err(Self::unsupported())
        }

        pub fn read_reg(&mut self, _reg: u8) -> Result<u8> {
            Err(Self::unsupported())
        }

        pub fn write_reg(&mut self, _reg: u8, _value: u8) -> Result<()> {
            Err(Self::unsupported())
        }

        fn unsupported() -> Error {
            Error::i2c("userspace I2C is only supported on Linux")
        }
    }
}

pub(crate) use imp::I2cBus;

/// Open `bus` with slave address `addr` selected.
pub(crate) fn open(bus: u8, addr: u16) -> Result<I2cBus> {
    I2cBus::open(bus, addr)
}
