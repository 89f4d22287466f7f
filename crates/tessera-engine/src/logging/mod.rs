//! Logging utilities.
//!
//! The engine logs through the `log` facade only. Hosts that do not install their
//! own logger can call [`init_logging`] early in `main`.

mod init;

pub use init::{init_logging, LoggingConfig};
