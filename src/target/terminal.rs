//! Single-line terminal rendering.

use std::collections::{HashMap, HashSet};
use std::io::{self, Write};

use colored::Colorize;

use super::VisualTarget;
use crate::config::{parse_hex_color, Intensity, DEFAULT_COLOR, PROP_COLOR};
use crate::error_handling::TargetError;
use crate::state::{FlickerState, Marker};
use crate::styles::{appearance, static_appearance};

/// Repaints one terminal line whenever the element changes.
///
/// The label is drawn in the `--neon-color` property's color, scaled by the
/// active state's brightness; surge states are drawn bold. Without the base
/// marker the label is drawn plain.
pub struct TerminalTarget<W: Write + Send + 'static = io::Stdout> {
    out: W,
    label: Option<String>,
    markers: HashSet<Marker>,
    properties: HashMap<String, String>,
}

impl TerminalTarget<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + 'static> TerminalTarget<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            label: None,
            markers: HashSet::new(),
            properties: HashMap::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn active_state(&self) -> FlickerState {
        self.markers
            .iter()
            .find_map(|m| match m {
                Marker::State(s) => Some(*s),
                _ => None,
            })
            .unwrap_or(FlickerState::Neutral)
    }

    fn intensity(&self) -> Intensity {
        self.markers
            .iter()
            .find_map(|m| match m {
                Marker::Intensity(i) => Some(*i),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn base_rgb(&self) -> (u8, u8, u8) {
        let color = self
            .properties
            .get(PROP_COLOR)
            .map(String::as_str)
            .unwrap_or(DEFAULT_COLOR);
        parse_hex_color(color)
            .or_else(|_| parse_hex_color(DEFAULT_COLOR))
            .unwrap_or((255, 255, 255))
    }

    fn repaint(&mut self) -> Result<(), TargetError> {
        let label = self.label.clone().unwrap_or_default();
        let line = if self.markers.contains(&Marker::Base) {
            let state = self.active_state();
            let look = if self.markers.contains(&Marker::Static) {
                static_appearance()
            } else {
                appearance(state, self.intensity())
            };
            let level = look.brightness();
            let (r, g, b) = self.base_rgb();
            let scale = |c: u8| (c as f32 * level).round() as u8;
            let painted = label.truecolor(scale(r), scale(g), scale(b));
            if state.is_surge() {
                painted.bold().to_string()
            } else {
                painted.to_string()
            }
        } else {
            label
        };
        write!(self.out, "\r\x1b[2K{}", line).map_err(TargetError::from)?;
        self.out.flush().map_err(TargetError::from)
    }
}

impl<W: Write + Send + 'static> VisualTarget for TerminalTarget<W> {
    fn label(&self) -> Option<String> {
        self.label.clone()
    }

    fn set_label(&mut self, text: &str) -> Result<(), TargetError> {
        self.label = Some(text.to_string());
        self.repaint()
    }

    fn add_marker(&mut self, marker: Marker) -> Result<(), TargetError> {
        if self.markers.insert(marker) {
            self.repaint()?;
        }
        Ok(())
    }

    fn remove_marker(&mut self, marker: Marker) -> Result<(), TargetError> {
        if self.markers.remove(&marker) {
            self.repaint()?;
        }
        Ok(())
    }

    fn set_property(&mut self, name: &str, value: &str) -> Result<(), TargetError> {
        self.properties.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_property(&mut self, name: &str) -> Result<(), TargetError> {
        self.properties.remove(name);
        Ok(())
    }
}
