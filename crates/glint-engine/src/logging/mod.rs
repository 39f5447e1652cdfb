//! Logging utilities.
//!
//! Centralizes logger initialization; everything else in the crate goes
//! through the standard `log` facade.

mod init;

pub use init::{LoggingConfig, init_logging};
