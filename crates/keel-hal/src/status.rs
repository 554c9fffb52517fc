use core::fmt;

use embedded_hal::i2c::{self, ErrorKind, NoAcknowledgeSource};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Outcome of a platform or bus operation.
///
/// `Ok(())` is the single success value. Every `Err` is terminal for the
/// call that produced it.
pub type Status = Result<(), Error>;

/// Failure codes shared by every layer, from the HAL up to the entry point.
///
/// Codes are stable and never zero, so a failure can be handed straight to
/// the process as its exit status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Error {
    /// Unspecified failure.
    Failed = 1,
    /// An argument was rejected by the callee.
    InvalidParam = 2,
    /// The resource is held by someone else.
    Busy = 3,
    /// The operation did not complete in time.
    Timeout = 4,
    /// A resource the caller depends on has not been brought up.
    NotReady = 5,
    /// The platform does not implement the requested operation.
    NotSupported = 6,
    /// The operation is not valid in the callee's current state.
    InvalidState = 7,
    /// The addressed device did not acknowledge.
    Nack = 8,
    /// Another controller won arbitration.
    ArbitrationLost = 9,
    /// Misplaced start/stop or another bus-level fault.
    Bus = 10,
    /// Data arrived faster than it could be drained.
    Overrun = 11,
}

impl Error {
    /// Numeric code of this failure. Never zero.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Convert a status into a process exit code: 0 on success, the error code otherwise.
pub fn exit_code(status: Status) -> u8 {
    match status {
        Ok(()) => 0,
        Err(e) => e.code(),
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::Failed => "operation failed",
            Error::InvalidParam => "invalid parameter",
            Error::Busy => "resource busy",
            Error::Timeout => "timed out",
            Error::NotReady => "not ready",
            Error::NotSupported => "not supported",
            Error::InvalidState => "invalid state",
            Error::Nack => "no acknowledge from device",
            Error::ArbitrationLost => "bus arbitration lost",
            Error::Bus => "bus error",
            Error::Overrun => "data overrun",
        };
        write!(f, "{} (code {})", msg, self.code())
    }
}

impl core::error::Error for Error {}

impl i2c::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::Nack => {
                ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown)
            }
            Error::ArbitrationLost => ErrorKind::ArbitrationLoss,
            Error::Bus => ErrorKind::Bus,
            Error::Overrun => ErrorKind::Overrun,
            _ => ErrorKind::Other,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(_) => Error::Nack,
            ErrorKind::ArbitrationLoss => Error::ArbitrationLost,
            ErrorKind::Bus => Error::Bus,
            ErrorKind::Overrun => Error::Overrun,
            _ => Error::Failed,
        }
    }
}
