#[macro_use]
pub mod macros;
pub mod cpu_features;
mod log_setup;

pub use log_setup::{setup_logging, try_setup_logging};
