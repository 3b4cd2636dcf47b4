//! `VoltageEMS` basic library
//!
//! Shared setup for the register tools:
//! - logging (console plus optional daily log files)
//! - layered configuration loading

pub mod config;
pub mod error;
pub mod logging;

pub use config::{load_config, load_config_from_file, load_config_in};
pub use error::{Error, Result};
pub use logging::{init_with_config, LogConfig};
