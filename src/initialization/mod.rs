//! Application initialization.
//!
//! Logger setup for the CLI and for embedders that want the same output format.

mod logger;

pub use logger::init_logger_with;
