//! Demo application: polls a TMP102-style temperature sensor.

use embedded_hal::delay::DelayNs;
use heapless::Deque;
use keel_core::{transfer, App, Error, I2cPrimitives, Status};

/// Temperature register pointer.
const REG_TEMP: u8 = 0x00;
/// Configuration register pointer.
const REG_CONFIG: u8 = 0x01;
/// Readings kept for the moving average.
const WINDOW: usize = 8;

pub const DEFAULT_ADDRESS: u8 = 0x48;

/// Bus and delay the board hands over to the application.
pub struct Resources<B, D> {
    pub bus: B,
    pub delay: D,
}

#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    /// 7-bit sensor address.
    pub address: u8,
    /// Pause between readings.
    pub interval_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self { address: DEFAULT_ADDRESS, interval_ms: 1000 }
    }
}

/// Reads the sensor once per loop iteration and logs a moving average.
///
/// Transfer errors inside the loop are logged and counted; the next
/// iteration simply tries again.
pub struct Monitor<B, D> {
    source: fn() -> Option<Resources<B, D>>,
    resources: Option<Resources<B, D>>,
    config: MonitorConfig,
    window: Deque<i32, WINDOW>,
    errors: u32,
}

impl<B: I2cPrimitives, D: DelayNs> Monitor<B, D> {
    /// `source` is called once, during setup, to claim the board resources.
    pub fn new(
        source: fn() -> Option<Resources<B, D>>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            source,
            resources: None,
            config,
            window: Deque::new(),
            errors: 0,
        }
    }

    /// Loop iterations whose reading failed.
    pub fn errors(&self) -> u32 {
        self.errors
    }

    fn read_temperature(bus: &mut B, address: u8) -> Result<i32, Error> {
        let mut raw = [0u8; 2];
        let n = transfer::write_read(bus, address, &[REG_TEMP], &mut raw)?;
        if n < raw.len() {
            return Err(Error::Failed);
        }
        Ok(centi_celsius(raw))
    }

    fn average(&self) -> i32 {
        let sum: i32 = self.window.iter().sum();
        sum / self.window.len().max(1) as i32
    }
}

impl<B: I2cPrimitives, D: DelayNs> App for Monitor<B, D> {
    fn setup(&mut self) -> Status {
        let mut resources = (self.source)().ok_or(Error::NotReady)?;

        let mut config = [0u8; 2];
        transfer::write_read(
            &mut resources.bus,
            self.config.address,
            &[REG_CONFIG],
            &mut config,
        )?;
        info!(
            "sensor at {:#x} answered, config {:#x} {:#x}",
            self.config.address,
            config[0],
            config[1]
        );

        self.resources = Some(resources);
        Ok(())
    }

    fn tick(&mut self) {
        let address = self.config.address;
        let Some(resources) = self.resources.as_mut() else {
            return;
        };

        match Self::read_temperature(&mut resources.bus, address) {
            Ok(temp) => {
                if self.window.is_full() {
                    self.window.pop_front();
                }
                let _ = self.window.push_back(temp);
                let avg = self.average();
                info!("temperature {} cC (avg {} cC)", temp, avg);
            }
            Err(e) => {
                self.errors = self.errors.saturating_add(1);
                warn!("sensor read failed: {} ({} so far)", e, self.errors);
            }
        }

        if let Some(resources) = self.resources.as_mut() {
            resources.delay.delay_ms(self.config.interval_ms);
        }
    }
}

/// Convert a 12-bit left-justified reading into hundredths of a degree.
pub fn centi_celsius(raw: [u8; 2]) -> i32 {
    let counts = i16::from_be_bytes(raw) >> 4;
    // 0.0625 C per count
    i32::from(counts) * 625 / 100
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Answers the setup probe in full, then misbehaves on every read.
    struct FlakyBus {
        reads: usize,
        fail: Option<Error>,
    }

    impl I2cPrimitives for FlakyBus {
        fn begin(&mut self, _address: u8) -> Status {
            Ok(())
        }

        fn write(&mut self, _bytes: &[u8]) -> Status {
            Ok(())
        }

        fn read(&mut self, buffer: &mut [u8]) -> Result<usize, Error> {
            self.reads += 1;
            if self.reads == 1 {
                buffer.fill(0x60);
                return Ok(buffer.len());
            }
            match self.fail {
                Some(e) => Err(e),
                None => Ok(1),
            }
        }

        fn end(&mut self) {}
    }

    #[derive(Default)]
    struct CountingDelay {
        calls: usize,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, _ns: u32) {
            self.calls += 1;
        }

        fn delay_ms(&mut self, _ms: u32) {
            self.calls += 1;
        }
    }

    fn short_reads() -> Option<Resources<FlakyBus, CountingDelay>> {
        Some(Resources {
            bus: FlakyBus { reads: 0, fail: None },
            delay: CountingDelay::default(),
        })
    }

    fn timed_out_reads() -> Option<Resources<FlakyBus, CountingDelay>> {
        Some(Resources {
            bus: FlakyBus { reads: 0, fail: Some(Error::Timeout) },
            delay: CountingDelay::default(),
        })
    }

    fn delays(app: &Monitor<FlakyBus, CountingDelay>) -> usize {
        app.resources.as_ref().map_or(0, |r| r.delay.calls)
    }

    #[test]
    fn failed_readings_are_counted_and_skipped() {
        for source in [
            short_reads as fn() -> Option<Resources<FlakyBus, CountingDelay>>,
            timed_out_reads,
        ] {
            let mut app = Monitor::new(source, MonitorConfig::default());
            app.setup().unwrap();
            assert_eq!(app.errors(), 0);

            for n in 1..=3 {
                app.tick();
                assert_eq!(app.errors(), n);
                assert!(app.window.is_empty());
                assert_eq!(delays(&app), n as usize);
            }
        }
    }

    #[test]
    fn conversion_matches_datasheet_examples() {
        assert_eq!(centi_celsius([0x7F, 0xF0]), 12793); // 127.9375 C
        assert_eq!(centi_celsius([0x19, 0x00]), 2500);
        assert_eq!(centi_celsius([0x00, 0x10]), 6);
        assert_eq!(centi_celsius([0x00, 0x00]), 0);
        assert_eq!(centi_celsius([0xFF, 0xF0]), -6);
        assert_eq!(centi_celsius([0xE7, 0x00]), -2500);
    }
}
