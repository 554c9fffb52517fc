#![no_std]
//! Platform-facing half of the keel bootstrap.
//!
//! Defines the status domain every layer reports through and the traits a
//! hardware abstraction layer implements so the lifecycle controller and
//! the transaction helper can drive it.

pub mod i2c;
mod status;
mod system;

pub use i2c::{Blocking, I2cPrimitives};
pub use status::{exit_code, Error, Status};
pub use system::System;
