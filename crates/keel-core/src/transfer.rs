//! Bracketed I2C transfers over the HAL primitives.
//!
//! Every transaction that is successfully begun is ended exactly once,
//! whichever phase fails afterwards, so no error path leaves the bus held.

use keel_hal::{Error, I2cPrimitives, Status};

/// Received-byte count on success, the failing phase's error otherwise.
pub type TransferResult = Result<usize, Error>;

/// An open transaction on a bus.
///
/// Created by [`Transaction::begin`]. Dropping the guard ends the
/// transaction; [`end`](Self::end) does the same explicitly.
pub struct Transaction<'a, B: I2cPrimitives + ?Sized> {
    bus: &'a mut B,
}

impl<'a, B: I2cPrimitives + ?Sized> Transaction<'a, B> {
    /// Begin a transaction with the device at `address`.
    ///
    /// When begin fails there is nothing to close and the error is returned
    /// as is.
    pub fn begin(bus: &'a mut B, address: u8) -> Result<Self, Error> {
        bus.begin(address)?;
        Ok(Self { bus })
    }

    pub fn write(&mut self, bytes: &[u8]) -> Status {
        self.bus.write(bytes)
    }

    pub fn read(&mut self, buffer: &mut [u8]) -> Result<usize, Error> {
        self.bus.read(buffer)
    }

    pub fn end(self) {}
}

impl<B: I2cPrimitives + ?Sized> Drop for Transaction<'_, B> {
    fn drop(&mut self) {
        self.bus.end();
    }
}

/// Write `outbound` then read into `inbound` in one transaction with `address`.
///
/// Either buffer may be `None`, and an empty slice is the same as `None`.
/// With neither, the transfer is a bare begin/end handshake. Phases run in
/// order and stop at the first failure, whose error is returned unchanged.
pub fn transfer<B: I2cPrimitives + ?Sized>(
    bus: &mut B,
    address: u8,
    outbound: Option<&[u8]>,
    inbound: Option<&mut [u8]>,
) -> TransferResult {
    let mut txn = Transaction::begin(bus, address).inspect_err(|e| {
        trace!("i2c begin {:#x} failed: {}", address, e);
    })?;

    if let Some(bytes) = outbound.filter(|b| !b.is_empty()) {
        txn.write(bytes).inspect_err(|e| {
            trace!("i2c write {:#x} failed: {}", address, e);
        })?;
    }

    let mut received = 0;
    if let Some(buffer) = inbound.filter(|b| !b.is_empty()) {
        received = txn.read(buffer).inspect_err(|e| {
            trace!("i2c read {:#x} failed: {}", address, e);
        })?;
    }

    txn.end();
    Ok(received)
}

/// Write `bytes` to the device at `address`.
pub fn write<B: I2cPrimitives + ?Sized>(
    bus: &mut B,
    address: u8,
    bytes: &[u8],
) -> Status {
    transfer(bus, address, Some(bytes), None).map(|_| ())
}

/// Read from the device at `address`, returning the received count.
pub fn read<B: I2cPrimitives + ?Sized>(
    bus: &mut B,
    address: u8,
    buffer: &mut [u8],
) -> TransferResult {
    transfer(bus, address, None, Some(buffer))
}

/// Write `bytes`, then read into `buffer`, within one transaction.
pub fn write_read<B: I2cPrimitives + ?Sized>(
    bus: &mut B,
    address: u8,
    bytes: &[u8],
    buffer: &mut [u8],
) -> TransferResult {
    transfer(bus, address, Some(bytes), Some(buffer))
}
