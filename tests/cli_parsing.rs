//! Tests for the demo's command-line parsing and config building.

use std::io::Write;

use clap::Parser;
use neon_flicker::{ConfigError, Intensity, LogFormat, LogLevel, Opt};

#[test]
fn test_defaults() {
    let opt = Opt::try_parse_from(["neon_flicker"]).unwrap();
    assert_eq!(opt.text, None);
    assert_eq!(opt.color, "#e8b4b8");
    assert_eq!(opt.intensity, Intensity::Medium);
    assert_eq!((opt.min_interval, opt.max_interval), (3000, 7000));
    assert!(!opt.reduced_motion);
    assert!(!opt.ignore_reduced_motion);
    assert_eq!(opt.duration_secs, 30);
    assert!(matches!(opt.log_level, LogLevel::Info));
    assert!(matches!(opt.log_format, LogFormat::Plain));

    let config = opt.flicker_config().unwrap();
    assert!(config.respect_reduced_motion);
    assert_eq!(config.flicker_interval, [3000, 7000]);
    assert!(config.auto_start);
}

#[test]
fn test_flags_flow_into_config() {
    let opt = Opt::try_parse_from([
        "neon_flicker",
        "--text",
        "Open Late",
        "--color",
        "#ff00aa",
        "--intensity",
        "high",
        "--min-interval",
        "500",
        "--max-interval",
        "900",
        "--ignore-reduced-motion",
        "--seed",
        "42",
        "--log-format",
        "json",
    ])
    .unwrap();
    assert!(matches!(opt.log_format, LogFormat::Json));

    let config = opt.flicker_config().unwrap();
    assert_eq!(config.label(), Some("Open Late"));
    assert_eq!(config.color, "#ff00aa");
    assert_eq!(config.intensity, Intensity::High);
    assert_eq!(config.flicker_interval, [500, 900]);
    assert!(!config.respect_reduced_motion);
    assert_eq!(config.seed, Some(42));
}

#[test]
fn test_unknown_intensity_rejected() {
    assert!(Opt::try_parse_from(["neon_flicker", "--intensity", "blinding"]).is_err());
}

#[test]
fn test_inverted_interval_rejected() {
    let opt = Opt::try_parse_from([
        "neon_flicker",
        "--min-interval",
        "8000",
        "--max-interval",
        "1000",
    ])
    .unwrap();
    assert!(matches!(
        opt.flicker_config(),
        Err(ConfigError::InvalidInterval {
            min: 8000,
            max: 1000
        })
    ));
}

#[test]
fn test_bad_color_rejected() {
    let opt = Opt::try_parse_from(["neon_flicker", "--color", "pink"]).unwrap();
    assert!(matches!(
        opt.flicker_config(),
        Err(ConfigError::InvalidColor(c)) if c == "pink"
    ));
}

#[test]
fn test_config_file_overrides_flags() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"text":"Consulting","intensity":"low","flicker_interval":[1000,2000],"seed":9}}"#
    )
    .unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let opt = Opt::try_parse_from(["neon_flicker", "--text", "ignored", "--config", &path])
        .unwrap();
    let config = opt.flicker_config().unwrap();
    assert_eq!(config.label(), Some("Consulting"));
    assert_eq!(config.intensity, Intensity::Low);
    assert_eq!(config.flicker_interval, [1000, 2000]);
    assert_eq!(config.seed, Some(9));
    assert_eq!(config.color, "#e8b4b8");
}

#[test]
fn test_config_file_errors() {
    let missing = Opt::try_parse_from(["neon_flicker", "--config", "/nonexistent/neon.json"])
        .unwrap();
    assert!(matches!(
        missing.flicker_config(),
        Err(ConfigError::Read { .. })
    ));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    let path = file.path().to_str().unwrap().to_string();
    let garbled = Opt::try_parse_from(["neon_flicker", "--config", &path]).unwrap();
    assert!(matches!(
        garbled.flicker_config(),
        Err(ConfigError::Parse { .. })
    ));
}
