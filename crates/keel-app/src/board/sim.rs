//! Host simulator board.
//!
//! Stands in for the HAL on a development machine: `system_init` can be
//! told to fail, and the I2C primitives talk to an in-memory TMP102.

use std::sync::Mutex;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use keel_core::{Error, I2cPrimitives, Platform, Status, System};

use crate::app::{Monitor, MonitorConfig, Resources};

/// Lowest simulated reading, 20.0 C in 0.0625 C counts.
const TEMP_MIN: i16 = 320;
/// Highest simulated reading, 26.0 C.
const TEMP_MAX: i16 = 416;
/// TMP102 power-on configuration register value.
const CONFIG_DEFAULT: u16 = 0x60A0;

pub type I2cBus = SimBus;
pub type Delay = StdDelay;
pub type Application = Monitor<I2cBus, Delay>;

static RESOURCES: Mutex<Option<Resources<I2cBus, Delay>>> = Mutex::new(None);

/// Knobs for the simulated hardware.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Address the simulated sensor answers on, or `None` for no sensor.
    pub sensor_address: Option<u8>,
    /// Make `system_init` fail with this error.
    pub fail_init: Option<Error>,
}

pub struct Board {
    config: SimConfig,
}

impl Board {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }
}

impl System for Board {
    fn system_init(&mut self) -> Status {
        if let Some(e) = self.config.fail_init {
            return Err(e);
        }

        let bus = SimBus::new(self.config.sensor_address.map(Tmp102::new));
        let mut slot = RESOURCES.lock().map_err(|_| Error::InvalidState)?;
        *slot = Some(Resources { bus, delay: StdDelay });
        Ok(())
    }
}

impl Platform for Board {}

pub fn application(config: MonitorConfig) -> Application {
    Monitor::new(take_resources, config)
}

fn take_resources() -> Option<Resources<I2cBus, Delay>> {
    RESOURCES.lock().ok()?.take()
}

/// Sleeps the calling thread.
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns.into()));
    }
}

/// Register model of a TMP102 temperature sensor.
#[derive(Debug)]
pub struct Tmp102 {
    address: u8,
    pointer: u8,
    registers: [u16; 4],
    rising: bool,
}

impl Tmp102 {
    pub fn new(address: u8) -> Self {
        let mut registers = [0u16; 4];
        registers[0] = (TEMP_MIN as u16) << 4;
        registers[1] = CONFIG_DEFAULT;
        // T_LOW 75 C, T_HIGH 80 C
        registers[2] = 0x4B00;
        registers[3] = 0x5000;
        Self { address, pointer: 0, registers, rising: true }
    }

    fn write(&mut self, bytes: &[u8]) {
        let Some((&pointer, data)) = bytes.split_first() else {
            return;
        };
        self.pointer = pointer & 0x03;
        // The temperature register is read-only.
        if data.len() >= 2 && self.pointer != 0 {
            self.registers[self.pointer as usize] =
                u16::from_be_bytes([data[0], data[1]]);
        }
    }

    fn read(&mut self, buffer: &mut [u8]) {
        let value = self.registers[self.pointer as usize].to_be_bytes();
        for (dst, src) in buffer.iter_mut().zip(value.iter().cycle()) {
            *dst = *src;
        }
        if self.pointer == 0 {
            self.step();
        }
    }

    /// Drift one count towards the current bound, bouncing between them.
    fn step(&mut self) {
        let counts = (self.registers[0] as i16) >> 4;
        let next = if self.rising { counts + 1 } else { counts - 1 };
        if next >= TEMP_MAX {
            self.rising = false;
        } else if next <= TEMP_MIN {
            self.rising = true;
        }
        self.registers[0] = (next as u16) << 4;
    }
}

/// Simulated I2C controller with at most one device on it.
#[derive(Debug)]
pub struct SimBus {
    device: Option<Tmp102>,
    open: Option<u8>,
}

impl SimBus {
    pub fn new(device: Option<Tmp102>) -> Self {
        Self { device, open: None }
    }

    fn target(&mut self) -> Result<&mut Tmp102, Error> {
        if self.open.is_none() {
            return Err(Error::InvalidState);
        }
        self.device.as_mut().ok_or(Error::Nack)
    }
}

impl I2cPrimitives for SimBus {
    fn begin(&mut self, address: u8) -> Status {
        if self.open.is_some() {
            return Err(Error::Busy);
        }
        if address > 0x7F {
            return Err(Error::InvalidParam);
        }
        match &self.device {
            Some(dev) if dev.address == address => {
                self.open = Some(address);
                Ok(())
            }
            _ => Err(Error::Nack),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Status {
        self.target()?.write(bytes);
        Ok(())
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, Error> {
        self.target()?.read(buffer);
        Ok(buffer.len())
    }

    fn end(&mut self) {
        self.open = None;
    }
}
