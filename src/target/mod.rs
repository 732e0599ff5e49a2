//! Visual targets driven by a sequencer.
//!
//! A target is a handle to something renderable. The sequencer only ever
//! touches it through [`VisualTarget`]: the label, a set of exclusive markers
//! and a few named style properties.

mod memory;
mod terminal;

pub use memory::{Change, MemoryTarget, StateSample, TargetEvent};
pub use terminal::TerminalTarget;

use crate::error_handling::TargetError;
use crate::state::{FlickerState, Marker};

/// Presentational surface of a renderable element.
///
/// Implementations are handles: the element itself lives elsewhere and may be
/// shared with other code. Removing an absent marker or property is not an
/// error.
pub trait VisualTarget: Send + 'static {
    /// Current label, if the element has one.
    fn label(&self) -> Option<String>;

    fn set_label(&mut self, text: &str) -> Result<(), TargetError>;

    fn add_marker(&mut self, marker: Marker) -> Result<(), TargetError>;

    fn remove_marker(&mut self, marker: Marker) -> Result<(), TargetError>;

    fn set_property(&mut self, name: &str, value: &str) -> Result<(), TargetError>;

    fn remove_property(&mut self, name: &str) -> Result<(), TargetError>;
}

/// Removes every flicker state marker, leaving the target in `Neutral`.
pub fn clear_state_markers<T: VisualTarget + ?Sized>(target: &mut T) -> Result<(), TargetError> {
    for state in FlickerState::MARKED {
        target.remove_marker(Marker::State(state))?;
    }
    Ok(())
}

/// Makes `state` the only active state marker.
pub fn apply_state<T: VisualTarget + ?Sized>(
    target: &mut T,
    state: FlickerState,
) -> Result<(), TargetError> {
    clear_state_markers(target)?;
    if let Some(marker) = Marker::for_state(state) {
        target.add_marker(marker)?;
    }
    Ok(())
}
