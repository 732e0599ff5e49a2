//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and sequencer configuration.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::config::constants::{
    DEFAULT_COLOR, DEFAULT_DEMO_DURATION_SECS, DEFAULT_FLICKER_INTERVAL_MS, DEFAULT_FONT,
    DEFAULT_FONT_SIZE, DEFAULT_FONT_WEIGHT, DEFAULT_LETTER_SPACING,
};
use crate::error_handling::ConfigError;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex color pattern is valid"));

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Glow magnitude tier.
///
/// Only the brightest surge state differs between tiers; timing never does.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize,
    Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

/// Sequencer configuration.
///
/// Bound once to a sequencer at construction. Deserializes from JSON with every
/// field optional, so a config file only needs to name what it overrides.
///
/// # Examples
///
/// ```
/// use neon_flicker::{FlickerConfig, Intensity};
///
/// let config = FlickerConfig {
///     text: Some("Open".to_string()),
///     intensity: Intensity::High,
///     flicker_interval: [1000, 2000],
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlickerConfig {
    /// Label text. Falls back to the target's label, then to the default text
    pub text: Option<String>,
    pub font: String,
    pub font_size: String,
    pub font_weight: String,
    pub letter_spacing: String,
    /// Base color as `#rrggbb`
    pub color: String,
    pub intensity: Intensity,
    /// Inter-sequence delay bounds in milliseconds, `[min, max]`
    pub flicker_interval: [u64; 2],
    /// Start scheduling as part of construction
    pub auto_start: bool,
    /// Honour the page's reduced-motion preference at construction
    pub respect_reduced_motion: bool,
    /// Seed for the scheduling RNG; random when absent
    pub seed: Option<u64>,
}

impl Default for FlickerConfig {
    fn default() -> Self {
        Self {
            text: None,
            font: DEFAULT_FONT.to_string(),
            font_size: DEFAULT_FONT_SIZE.to_string(),
            font_weight: DEFAULT_FONT_WEIGHT.to_string(),
            letter_spacing: DEFAULT_LETTER_SPACING.to_string(),
            color: DEFAULT_COLOR.to_string(),
            intensity: Intensity::Medium,
            flicker_interval: DEFAULT_FLICKER_INTERVAL_MS,
            auto_start: true,
            respect_reduced_motion: true,
            seed: None,
        }
    }
}

impl FlickerConfig {
    /// Checks the interval ordering and the color format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [min, max] = self.flicker_interval;
        if min > max {
            return Err(ConfigError::InvalidInterval { min, max });
        }
        if !HEX_COLOR.is_match(&self.color) {
            return Err(ConfigError::InvalidColor(self.color.clone()));
        }
        Ok(())
    }

    /// Lower bound of the inter-sequence delay.
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.flicker_interval[0])
    }

    /// Upper bound of the inter-sequence delay.
    pub fn max_interval(&self) -> Duration {
        Duration::from_millis(self.flicker_interval[1])
    }

    /// The configured label, treating an empty string as unset.
    pub fn label(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// Base color as an RGB triple. Call [`validate`](Self::validate) first.
    pub fn rgb(&self) -> Result<(u8, u8, u8), ConfigError> {
        parse_hex_color(&self.color)
    }

    /// Reads a JSON config file and validates it.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: FlickerConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }
}

/// Parses `#rrggbb` into its channels.
pub fn parse_hex_color(color: &str) -> Result<(u8, u8, u8), ConfigError> {
    if !HEX_COLOR.is_match(color) {
        return Err(ConfigError::InvalidColor(color.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&color[range], 16)
            .map_err(|_| ConfigError::InvalidColor(color.to_string()))
    };
    Ok((channel(1..3)?, channel(3..5)?, channel(5..7)?))
}

/// Command-line options for the terminal demo.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "neon_flicker",
    about = "Render a flickering neon sign in the terminal"
)]
pub struct Opt {
    /// Label to render (defaults to the built-in text)
    #[arg(long)]
    pub text: Option<String>,

    /// Base color as #rrggbb
    #[arg(long, default_value = DEFAULT_COLOR)]
    pub color: String,

    /// Glow intensity: low|medium|high
    #[arg(long, value_enum, default_value_t = Intensity::Medium)]
    pub intensity: Intensity,

    /// Minimum delay between sequences in milliseconds
    #[arg(long, default_value_t = DEFAULT_FLICKER_INTERVAL_MS[0])]
    pub min_interval: u64,

    /// Maximum delay between sequences in milliseconds
    #[arg(long, default_value_t = DEFAULT_FLICKER_INTERVAL_MS[1])]
    pub max_interval: u64,

    /// Simulate an active reduced-motion preference
    #[arg(long)]
    pub reduced_motion: bool,

    /// Animate even when reduced motion is preferred
    #[arg(long)]
    pub ignore_reduced_motion: bool,

    /// How long to run before tearing the sign down
    #[arg(long, default_value_t = DEFAULT_DEMO_DURATION_SECS)]
    pub duration_secs: u64,

    /// Seed for reproducible scheduling
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON config file; replaces the sign flags above
    #[arg(long, value_parser)]
    pub config: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Opt {
    /// Builds the sequencer config from a config file or from the flags.
    pub fn flicker_config(&self) -> Result<FlickerConfig, ConfigError> {
        if let Some(path) = &self.config {
            return FlickerConfig::from_json_file(path);
        }
        let config = FlickerConfig {
            text: self.text.clone(),
            color: self.color.clone(),
            intensity: self.intensity,
            flicker_interval: [self.min_interval, self.max_interval],
            respect_reduced_motion: !self.ignore_reduced_motion,
            seed: self.seed,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }
}
