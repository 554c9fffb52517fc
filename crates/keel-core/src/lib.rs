#![no_std]
//! Bare-metal application bootstrap.
//!
//! [`Lifecycle`] runs platform init, then the application's one-time setup,
//! then the application's loop forever. Every phase has a framework default
//! that a board or an application replaces by implementing the trait method,
//! with the choice fixed when the binary is built.
//!
//! [`transfer`] composes the HAL's begin/write/read/end I2C primitives into
//! a single request/response exchange that always closes the transaction it
//! opened.

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

mod bus;
mod lifecycle;
pub mod transfer;

pub use bus::TransferBus;
pub use lifecycle::{run, App, Lifecycle, Phase, Platform};
pub use transfer::{transfer, Transaction, TransferResult};

pub use keel_hal::{exit_code, Error, I2cPrimitives, Status, System};
