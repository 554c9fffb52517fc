//! nRF52840 board: embassy-nrf HAL, sensor on TWIM0 (SDA P0.26, SCL P0.27).

use core::cell::RefCell;

use embassy_nrf::interrupt::Priority;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals, Peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Delay;
use keel_core::{Error, Platform, Status, System};
use keel_hal::Blocking;
use static_cell::StaticCell;

use crate::app::{Monitor, MonitorConfig, Resources};

pub type I2cBus = Blocking<Twim<'static>>;
pub type Application = Monitor<I2cBus, Delay>;

bind_interrupts!(struct TwimIrqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

/// RAM staging buffer for TWIM writes sourced from flash.
static TWIM_BUF: StaticCell<[u8; 32]> = StaticCell::new();

static RESOURCES: Mutex<
    CriticalSectionRawMutex,
    RefCell<Option<Resources<I2cBus, Delay>>>,
> = Mutex::new(RefCell::new(None));

pub struct Board {
    peripherals: Option<Peripherals>,
}

impl Board {
    pub const fn new() -> Self {
        Self { peripherals: None }
    }
}

impl System for Board {
    fn system_init(&mut self) -> Status {
        let mut config = embassy_nrf::config::Config::default();
        config.time_interrupt_priority = Priority::P2;
        self.peripherals = Some(embassy_nrf::init(config));
        Ok(())
    }
}

impl Platform for Board {
    /// Chip bring-up, then TWIM0 for the application.
    fn init(&mut self) -> Status {
        self.system_init()?;
        let p = self.peripherals.take().ok_or(Error::NotReady)?;

        let twim = Twim::new(
            p.TWISPI0,
            TwimIrqs,
            p.P0_26,
            p.P0_27,
            twim::Config::default(),
            TWIM_BUF.init([0; 32]),
        );

        let resources = Resources { bus: Blocking::new(twim), delay: Delay };
        RESOURCES.lock(|r| *r.borrow_mut() = Some(resources));
        Ok(())
    }
}

pub fn application() -> Application {
    Monitor::new(take_resources, MonitorConfig::default())
}

fn take_resources() -> Option<Resources<I2cBus, Delay>> {
    RESOURCES.lock(|r| r.borrow_mut().take())
}
