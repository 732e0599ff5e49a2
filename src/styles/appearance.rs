//! Per-state appearance table and stylesheet rendering.

use std::fmt::Write;

use crate::config::Intensity;
use crate::state::{FlickerState, Marker};

/// One layer of a text glow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowLayer {
    pub radius_px: u16,
    pub alpha: f32,
}

/// How a state looks: overall opacity, stacked glow layers and a slight scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub opacity: f32,
    pub glow: &'static [GlowLayer],
    pub scale: f32,
}

impl Appearance {
    /// Brightness in `0.0..=1.0`, combining opacity with the strongest glow.
    pub fn brightness(&self) -> f32 {
        let glow = self
            .glow
            .iter()
            .map(|l| l.alpha * (l.radius_px as f32 / 90.0).min(1.0))
            .fold(0.0_f32, f32::max);
        (self.opacity * 0.85 + glow * 0.15).clamp(0.0, 1.0)
    }
}

const fn glow(radius_px: u16, alpha: f32) -> GlowLayer {
    GlowLayer { radius_px, alpha }
}

const NEUTRAL: Appearance = Appearance {
    opacity: 0.85,
    glow: &[glow(12, 0.5)],
    scale: 1.0,
};

const STATIC: Appearance = Appearance {
    opacity: 0.9,
    glow: &[glow(15, 0.7)],
    scale: 1.0,
};

const DIM: Appearance = Appearance {
    opacity: 0.3,
    glow: &[glow(3, 0.3)],
    scale: 0.998,
};

const OFF: Appearance = Appearance {
    opacity: 0.12,
    glow: &[glow(1, 0.1)],
    scale: 0.999,
};

const WEAK: Appearance = Appearance {
    opacity: 0.6,
    glow: &[glow(6, 0.4)],
    scale: 0.9995,
};

const SURGE_1: Appearance = Appearance {
    opacity: 1.0,
    glow: &[glow(15, 0.9), glow(25, 0.7), glow(35, 0.5)],
    scale: 1.002,
};

const SURGE_2: Appearance = Appearance {
    opacity: 1.0,
    glow: &[glow(18, 1.0), glow(30, 0.8), glow(45, 0.6), glow(60, 0.3)],
    scale: 1.004,
};

const SURGE_3: Appearance = Appearance {
    opacity: 1.0,
    glow: &[glow(20, 1.0), glow(35, 0.9), glow(50, 0.7), glow(70, 0.4)],
    scale: 1.006,
};

const SURGE_3_HIGH: Appearance = Appearance {
    opacity: 1.0,
    glow: &[glow(25, 1.0), glow(45, 0.9), glow(65, 0.7), glow(90, 0.5)],
    scale: 1.008,
};

const SURGE_3_LOW: Appearance = Appearance {
    opacity: 1.0,
    glow: &[glow(12, 0.8), glow(20, 0.6), glow(30, 0.4)],
    scale: 1.003,
};

/// Appearance of `state` under `intensity`. Only the peak surge varies by tier.
pub fn appearance(state: FlickerState, intensity: Intensity) -> Appearance {
    match (state, intensity) {
        (FlickerState::Neutral, _) => NEUTRAL,
        (FlickerState::Dim, _) => DIM,
        (FlickerState::Off, _) => OFF,
        (FlickerState::Weak, _) => WEAK,
        (FlickerState::Surge1, _) => SURGE_1,
        (FlickerState::Surge2, _) => SURGE_2,
        (FlickerState::Surge3, Intensity::Medium) => SURGE_3,
        (FlickerState::Surge3, Intensity::High) => SURGE_3_HIGH,
        (FlickerState::Surge3, Intensity::Low) => SURGE_3_LOW,
    }
}

/// Appearance of the reduced-motion static glow.
pub fn static_appearance() -> Appearance {
    STATIC
}

fn write_rule(css: &mut String, selector: &str, look: &Appearance, (r, g, b): (u8, u8, u8)) {
    let shadows: Vec<String> = look
        .glow
        .iter()
        .map(|l| format!("0 0 {}px rgba({}, {}, {}, {})", l.radius_px, r, g, b, l.alpha))
        .collect();
    // Writing into a String cannot fail
    let _ = writeln!(
        css,
        "{} {{ opacity: {}; text-shadow: {}; transform: scale({}); }}",
        selector,
        look.opacity,
        shadows.join(", "),
        look.scale
    );
}

/// Compound class selector matching every marker in `markers`.
fn selector(markers: &[Marker]) -> String {
    markers
        .iter()
        .filter_map(|m| m.class())
        .map(|class| format!(".{}", class))
        .collect()
}

/// Renders the shared stylesheet fragment for every state and intensity override.
pub fn render_stylesheet(rgb: (u8, u8, u8)) -> String {
    let base = selector(&[Marker::Base]);
    let mut css = String::new();
    let _ = writeln!(
        css,
        "{} {{ font-family: var(--neon-font, 'Raleway'), sans-serif; \
         font-size: var(--neon-font-size, 2.4rem); \
         font-weight: var(--neon-font-weight, 300); \
         color: var(--neon-color, #e8b4b8); \
         letter-spacing: var(--neon-letter-spacing, 3px); \
         transition: all 0.08s cubic-bezier(0.25, 0.46, 0.45, 0.94); \
         user-select: none; display: inline-block; }}",
        base
    );
    write_rule(&mut css, &base, &NEUTRAL, rgb);
    write_rule(
        &mut css,
        &selector(&[Marker::Base, Marker::Static]),
        &STATIC,
        rgb,
    );
    for state in FlickerState::MARKED {
        write_rule(
            &mut css,
            &selector(&[Marker::Base, Marker::State(state)]),
            &appearance(state, Intensity::Medium),
            rgb,
        );
    }
    for intensity in [Intensity::High, Intensity::Low] {
        write_rule(
            &mut css,
            &selector(&[
                Marker::Base,
                Marker::Intensity(intensity),
                Marker::State(FlickerState::Surge3),
            ]),
            &appearance(FlickerState::Surge3, intensity),
            rgb,
        );
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_neutral_state_adds_no_class_to_selectors() {
        assert_eq!(
            selector(&[Marker::Base, Marker::State(FlickerState::Neutral)]),
            ".neon-logo"
        );
        assert!(!render_stylesheet((232, 180, 184)).contains("neutral"));
    }

    #[test]
    fn test_only_peak_surge_varies_by_intensity() {
        for state in FlickerState::iter().filter(|s| *s != FlickerState::Surge3) {
            assert_eq!(
                appearance(state, Intensity::Low),
                appearance(state, Intensity::High),
                "{} should not depend on intensity",
                state
            );
        }
        assert_ne!(
            appearance(FlickerState::Surge3, Intensity::Low),
            appearance(FlickerState::Surge3, Intensity::High)
        );
    }

    #[test]
    fn test_brightness_ordering() {
        let b = |s| appearance(s, Intensity::Medium).brightness();
        assert!(b(FlickerState::Off) < b(FlickerState::Dim));
        assert!(b(FlickerState::Dim) < b(FlickerState::Weak));
        assert!(b(FlickerState::Weak) < b(FlickerState::Neutral));
        assert!(b(FlickerState::Neutral) < b(FlickerState::Surge1));
        assert!(
            appearance(FlickerState::Surge3, Intensity::High).brightness()
                >= appearance(FlickerState::Surge3, Intensity::Low).brightness()
        );
    }

    #[test]
    fn test_stylesheet_covers_every_marker() {
        let css = render_stylesheet((232, 180, 184));
        for state in FlickerState::MARKED {
            assert!(css.contains(Marker::State(state).class().unwrap()));
        }
        assert!(css.contains("neon-static"));
        assert!(css.contains(".neon-logo.intensity-high.electric-surge-3"));
        assert!(css.contains(".neon-logo.intensity-low.electric-surge-3"));
        assert!(css.contains("rgba(232, 180, 184, 0.5)"));
    }
}
