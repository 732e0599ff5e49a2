//! neon_flicker library: neon-sign flicker sequencing
//!
//! Drives a renderable element through the flicker and surge pattern of a neon
//! tube: irregular dim/off/weak pulses followed by a brightening surge, repeated
//! on a randomized schedule so that several signs never flicker in lockstep.
//!
//! The element is reached only through the [`VisualTarget`] trait. The crate
//! ships an in-memory recording target and a single-line terminal target.
//!
//! # Example
//!
//! ```no_run
//! use neon_flicker::{FlickerConfig, Intensity, NeonFlicker, Page, TerminalTarget};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let page = Page::new();
//! let config = FlickerConfig {
//!     text: Some("Open".to_string()),
//!     intensity: Intensity::High,
//!     ..Default::default()
//! };
//! let sign = NeonFlicker::new(Some(TerminalTarget::stdout()), config, &page);
//! tokio::time::sleep(std::time::Duration::from_secs(10)).await;
//! sign.destroy();
//! # }
//! ```
//!
//! # Requirements
//!
//! Scheduling needs a Tokio runtime. Outside one, `start()` logs a warning and
//! does nothing.

pub mod config;
pub mod error_handling;
mod group;
pub mod initialization;
mod page;
mod sequencer;
pub mod state;
pub mod styles;
pub mod target;

pub use config::{FlickerConfig, Intensity, LogFormat, LogLevel, Opt};
pub use error_handling::{ConfigError, FaultKind, FaultStats, SequenceFault, TargetError};
pub use group::NeonGroup;
pub use page::Page;
pub use sequencer::{next_interval, warm_up_delay, FaultHook, NeonFlicker, NeonFlickerBuilder};
pub use state::{FlickerState, FlickerStep, Marker};
pub use target::{MemoryTarget, TerminalTarget, VisualTarget};
