use cortex_m::Peripherals;
use keel_core::{Error, Platform, Status, System};

/// Any Cortex-M part, with nothing but the core peripherals.
pub struct Board {
    // Held so the core peripherals stay claimed.
    _core: Option<Peripherals>,
}

impl Board {
    pub const fn new() -> Self {
        Self { _core: None }
    }
}

impl System for Board {
    fn system_init(&mut self) -> Status {
        let mut core = Peripherals::take().ok_or(Error::Busy)?;
        core.DCB.enable_trace();
        core.DWT.enable_cycle_counter();
        self._core = Some(core);
        Ok(())
    }
}

impl Platform for Board {}

/// No application on this board: boot straight into the idle loop.
pub type Application = ();

pub fn application() -> Application {}
