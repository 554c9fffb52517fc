use embedded_hal::i2c::{ErrorType, I2c, Operation};
use keel_hal::{Error, I2cPrimitives};

use crate::transfer::Transaction;

/// `embedded-hal` I2C bus built on the HAL primitives.
///
/// Lets off-the-shelf `embedded-hal` drivers run over any
/// [`I2cPrimitives`] implementation. Each `transaction` is one
/// begin/end bracket around its operations.
#[derive(Debug)]
pub struct TransferBus<B> {
    bus: B,
}

impl<B: I2cPrimitives> TransferBus<B> {
    pub const fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn inner_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: I2cPrimitives> ErrorType for TransferBus<B> {
    type Error = Error;
}

impl<B: I2cPrimitives> I2c for TransferBus<B> {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut txn = Transaction::begin(&mut self.bus, address)?;

        for op in operations {
            match op {
                Operation::Write(bytes) if !bytes.is_empty() => {
                    txn.write(bytes)?;
                }
                Operation::Read(buffer) if !buffer.is_empty() => {
                    let received = txn.read(buffer)?;
                    // Drivers rely on the whole buffer being filled.
                    if received < buffer.len() {
                        warn!(
                            "i2c short read from {:#x}: {} of {}",
                            address,
                            received,
                            buffer.len()
                        );
                        return Err(Error::Failed);
                    }
                }
                _ => {}
            }
        }

        txn.end();
        Ok(())
    }
}
