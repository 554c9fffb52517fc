use crate::Status;

/// Chip-level bring-up supplied by the HAL.
///
/// Clocks, power, and whatever else must be running before any peripheral
/// is touched. Called at most once per process, and not assumed idempotent.
pub trait System {
    fn system_init(&mut self) -> Status;
}

impl<T: System + ?Sized> System for &mut T {
    fn system_init(&mut self) -> Status {
        T::system_init(self)
    }
}
