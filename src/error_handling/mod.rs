//! Error handling and fault statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, configuration, target)
//! - The fault type swallowed by sequence runs
//! - Fault statistics tracking
//!
//! Public sequencer operations never return errors; runtime faults are counted
//! here and otherwise discarded.

mod stats;
mod types;

pub use stats::FaultStats;
pub use types::{ConfigError, FaultKind, InitializationError, SequenceFault, TargetError};
