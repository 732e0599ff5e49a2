//! Configuration constants.
//!
//! This module defines the constants shared by the sequencer, the style layer and
//! the CLI: scheduling ranges, element defaults and well-known identifiers.

use std::time::Duration;

/// Lower bound of the warm-up delay before the first sequence.
pub const WARM_UP_MIN: Duration = Duration::from_millis(2000);
/// Upper bound of the warm-up delay before the first sequence.
pub const WARM_UP_MAX: Duration = Duration::from_millis(5000);

/// Default inter-sequence interval in milliseconds: `[min, max]`.
pub const DEFAULT_FLICKER_INTERVAL_MS: [u64; 2] = [3000, 7000];

/// Label used when neither the config nor the target supplies one.
pub const DEFAULT_TEXT: &str = "Raginii Uplopwar";
pub const DEFAULT_FONT: &str = "Raleway";
pub const DEFAULT_FONT_SIZE: &str = "2.4rem";
pub const DEFAULT_FONT_WEIGHT: &str = "300";
pub const DEFAULT_LETTER_SPACING: &str = "3px";
/// Rose gold
pub const DEFAULT_COLOR: &str = "#e8b4b8";

/// Identifier of the shared stylesheet fragment.
///
/// Presence of this id in a [`StyleRegistry`](crate::styles::StyleRegistry) is the
/// only signal used to decide whether the fragment still needs installing.
pub const STYLESHEET_ID: &str = "neon-logo-styles";

// Custom properties written onto the target during setup
pub const PROP_FONT: &str = "--neon-font";
pub const PROP_FONT_SIZE: &str = "--neon-font-size";
pub const PROP_FONT_WEIGHT: &str = "--neon-font-weight";
pub const PROP_LETTER_SPACING: &str = "--neon-letter-spacing";
pub const PROP_COLOR: &str = "--neon-color";

/// All custom properties owned by a sequencer, in setup order.
pub const OWNED_PROPERTIES: [&str; 5] = [
    PROP_FONT,
    PROP_FONT_SIZE,
    PROP_FONT_WEIGHT,
    PROP_LETTER_SPACING,
    PROP_COLOR,
];

/// Default runtime of the CLI demo in seconds.
pub const DEFAULT_DEMO_DURATION_SECS: u64 = 30;
