//! Visual state styling.
//!
//! This module provides:
//! - The appearance of every flicker state (opacity, glow layers, scale)
//! - Rendering of the shared stylesheet fragment
//! - An idempotent, presence-checked registry for that fragment

mod appearance;
mod registry;

pub use appearance::{appearance, render_stylesheet, static_appearance, Appearance, GlowLayer};
pub use registry::{ensure_styles_installed, StyleRegistry};
