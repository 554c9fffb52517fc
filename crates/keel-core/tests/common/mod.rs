#![allow(dead_code)]

use keel_core::{Error, I2cPrimitives, Status};

/// One call into the primitives, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Begin(u8),
    Write(Vec<u8>),
    Read(usize),
    End,
}

/// Primitive bus that records every call and fails on demand.
#[derive(Default)]
pub struct MockBus {
    pub calls: Vec<Call>,
    pub fail_begin: Option<Error>,
    pub fail_write: Option<Error>,
    pub fail_read: Option<Error>,
    /// Count reported by `read`; defaults to the buffer length.
    pub read_count: Option<usize>,
    /// Byte pattern written into read buffers.
    pub fill: u8,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, call: fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| call(c)).count()
    }

    pub fn ends(&self) -> usize {
        self.count(|c| matches!(c, Call::End))
    }
}

impl I2cPrimitives for MockBus {
    fn begin(&mut self, address: u8) -> Status {
        self.calls.push(Call::Begin(address));
        match self.fail_begin {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Status {
        self.calls.push(Call::Write(bytes.to_vec()));
        match self.fail_write {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, Error> {
        self.calls.push(Call::Read(buffer.len()));
        if let Some(e) = self.fail_read {
            // Scribble over the buffer so a leaked count would be noticed.
            buffer.fill(0xEE);
            return Err(e);
        }
        buffer.fill(self.fill);
        Ok(self.read_count.unwrap_or(buffer.len()))
    }

    fn end(&mut self) {
        self.calls.push(Call::End);
    }
}
