#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

#[cfg(any(not(target_os = "none"), feature = "nrf52840"))]
mod app;
mod board;

#[cfg(all(target_os = "none", feature = "defmt"))]
use defmt_rtt as _;
#[cfg(all(target_os = "none", feature = "defmt"))]
use panic_probe as _;
#[cfg(all(target_os = "none", not(feature = "defmt")))]
use panic_reset as _;

use keel_core::exit_code;

pub const FW_VERSION: &str = env!("FW_VERSION");

#[cfg(target_os = "none")]
#[cortex_m_rt::entry]
fn main() -> ! {
    info!("keel {} booting", FW_VERSION);

    let err = keel_core::run(board::Board::new(), board::application());

    // Only a failed init or setup gets here. Stay halted, never reset.
    error!("boot failed: {} (exit code {})", err, exit_code(Err(err)));
    loop {
        cortex_m::asm::wfi();
    }
}

#[cfg(not(target_os = "none"))]
mod host {
    use clap::Parser;
    use keel_core::Error;

    use crate::app::{MonitorConfig, DEFAULT_ADDRESS};
    use crate::board::SimConfig;

    /// Boot the application against the simulated board.
    #[derive(Parser)]
    #[command(author, version, about, long_about = None)]
    pub struct Args {
        /// 7-bit address of the temperature sensor (decimal or 0x-hex)
        #[arg(long, value_parser = parse_u8, default_value_t = DEFAULT_ADDRESS)]
        pub sensor_address: u8,

        /// Leave the sensor off the bus, so setup fails
        #[arg(long)]
        pub no_sensor: bool,

        /// Fail platform init with this status code
        #[arg(long, value_parser = parse_error)]
        pub fail_init: Option<Error>,

        /// Pause between sensor readings
        #[arg(long, default_value_t = 1000)]
        pub interval_ms: u32,
    }

    impl Args {
        pub fn sim_config(&self) -> SimConfig {
            SimConfig {
                sensor_address: (!self.no_sensor).then_some(self.sensor_address),
                fail_init: self.fail_init,
            }
        }

        pub fn monitor_config(&self) -> MonitorConfig {
            MonitorConfig {
                address: self.sensor_address,
                interval_ms: self.interval_ms,
            }
        }
    }

    fn parse_u8(s: &str) -> Result<u8, String> {
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u8::from_str_radix(hex, 16),
            None => s.parse(),
        };
        parsed.map_err(|e| format!("`{s}` is not a byte value: {e}"))
    }

    fn parse_error(s: &str) -> Result<Error, String> {
        let code = parse_u8(s)?;
        Error::try_from(code).map_err(|_| format!("unknown status code {code}"))
    }

}

#[cfg(not(target_os = "none"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = host::Args::parse();
    info!("keel {} booting on the simulator", FW_VERSION);

    let err = keel_core::run(
        board::Board::new(args.sim_config()),
        board::application(args.monitor_config()),
    );

    // Only a failed init or setup gets here.
    error!("boot failed: {}", err);
    std::process::ExitCode::from(exit_code(Err(err)))
}
