//! Sequencer configuration and constants.
//!
//! This module provides:
//! - Configuration constants (step timing ranges, element defaults, style ids)
//! - The sequencer configuration type
//! - CLI option types and parsing

mod constants;
mod types;

pub use constants::*;
pub use types::{parse_hex_color, FlickerConfig, Intensity, LogFormat, LogLevel, Opt};
