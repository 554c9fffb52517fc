//! I2C bus primitives
//!
//! The four atomic operations a HAL exposes for one bracketed bus
//! transaction, plus an adapter that provides them on top of any
//! `embedded-hal` 1.0 I2C implementation.

use crate::{Error, Status};

/// Atomic I2C operations against a single bus instance.
///
/// A transaction is opened with [`begin`](Self::begin) and closed with
/// [`end`](Self::end). [`write`](Self::write) and [`read`](Self::read) act
/// on the device addressed by the open transaction.
pub trait I2cPrimitives {
    /// Open a transaction with the device at the 7-bit `address`.
    fn begin(&mut self, address: u8) -> Status;

    /// Send `bytes` to the addressed device.
    fn write(&mut self, bytes: &[u8]) -> Status;

    /// Receive into `buffer`, returning the number of bytes received.
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, Error>;

    /// Close the transaction and release the bus.
    fn end(&mut self);
}

impl<T: I2cPrimitives + ?Sized> I2cPrimitives for &mut T {
    fn begin(&mut self, address: u8) -> Status {
        T::begin(self, address)
    }

    fn write(&mut self, bytes: &[u8]) -> Status {
        T::write(self, bytes)
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, Error> {
        T::read(self, buffer)
    }

    fn end(&mut self) {
        T::end(self)
    }
}

/// Exposes a blocking `embedded-hal` bus as [`I2cPrimitives`].
///
/// `begin` latches the target address and `end` releases it. Each `write`
/// and `read` is issued to the bus as its own `embedded-hal` call against
/// the latched address, so each one ends with a STOP condition. A device
/// that needs a repeated START between writing a register pointer and
/// reading it back cannot be driven through this adapter; use the wrapped
/// bus's `write_read` directly for those.
#[derive(Debug)]
pub struct Blocking<I> {
    i2c: I,
    address: Option<u8>,
}

impl<I> Blocking<I> {
    pub const fn new(i2c: I) -> Self {
        Self { i2c, address: None }
    }

    /// Address of the open transaction, if any.
    pub fn address(&self) -> Option<u8> {
        self.address
    }

    /// Give the wrapped bus back.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: embedded_hal::i2c::I2c> I2cPrimitives for Blocking<I> {
    fn begin(&mut self, address: u8) -> Status {
        if self.address.is_some() {
            return Err(Error::Busy);
        }
        self.address = Some(address);
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Status {
        let address = self.address.ok_or(Error::InvalidState)?;
        self.i2c.write(address, bytes).map_err(bus_error)
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, Error> {
        let address = self.address.ok_or(Error::InvalidState)?;
        self.i2c.read(address, buffer).map_err(bus_error)?;
        Ok(buffer.len())
    }

    fn end(&mut self) {
        self.address = None;
    }
}

fn bus_error<E: embedded_hal::i2c::Error>(e: E) -> Error {
    e.kind().into()
}
