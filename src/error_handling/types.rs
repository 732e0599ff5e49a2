//! Error type definitions.
//!
//! This module defines all error and fault types used throughout the crate.

use std::path::PathBuf;

use log::SetLoggerError;
use strum_macros::{Display, EnumIter as EnumIterMacro};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for configuration problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `flicker_interval` is not ordered.
    #[error("Invalid flicker interval: min {min}ms is greater than max {max}ms")]
    InvalidInterval { min: u64, max: u64 },

    /// Color is not a `#rrggbb` string.
    #[error("Invalid color {0:?}: expected #rrggbb")]
    InvalidColor(String),

    /// Config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for a `FlickerConfig`.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by a [`VisualTarget`](crate::target::VisualTarget).
#[derive(Error, Debug)]
pub enum TargetError {
    /// The underlying element no longer exists.
    #[error("Target element is detached")]
    Detached,

    /// The target refused or failed a presentational change.
    #[error("Target render error: {0}")]
    Render(String),

    /// Output failure (terminal targets).
    #[error("Target I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A fault caught during a sequence run.
///
/// Faults never reach callers of the public API; they are logged and handed to
/// the optional fault hook.
#[derive(Error, Debug)]
pub enum SequenceFault {
    #[error("Target fault during sequence: {0}")]
    Target(#[from] TargetError),

    #[error("Sequence panicked: {0}")]
    Panicked(String),
}

impl SequenceFault {
    /// Category used for statistics.
    pub fn kind(&self) -> FaultKind {
        match self {
            SequenceFault::Target(TargetError::Detached) => FaultKind::TargetDetached,
            SequenceFault::Target(TargetError::Render(_)) => FaultKind::TargetRender,
            SequenceFault::Target(TargetError::Io(_)) => FaultKind::TargetIo,
            SequenceFault::Panicked(_) => FaultKind::Panicked,
        }
    }
}

/// Categories of swallowed faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Display)]
pub enum FaultKind {
    TargetDetached,
    TargetRender,
    TargetIo,
    Panicked,
}
