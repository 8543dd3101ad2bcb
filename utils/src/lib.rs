//! Shared utilities for ballot drivers.

pub mod logging;

pub use logging::{init_logging, LogFormat};
