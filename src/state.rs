//! Flicker states, presentational markers and the authored step table.

use std::time::Duration;

use strum_macros::{Display, EnumIter};

use crate::config::Intensity;

/// Display state of a neon target.
///
/// Exactly one state is active at a time. `Neutral` is the steady glow and is
/// the only state without a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum FlickerState {
    Neutral,
    Dim,
    Off,
    Weak,
    Surge1,
    Surge2,
    Surge3,
}

impl FlickerState {
    /// Marker class applied to the target while this state is active.
    pub fn class(self) -> Option<&'static str> {
        match self {
            FlickerState::Neutral => None,
            FlickerState::Dim => Some("flicker-dim"),
            FlickerState::Off => Some("flicker-off"),
            FlickerState::Weak => Some("flicker-weak"),
            FlickerState::Surge1 => Some("electric-surge-1"),
            FlickerState::Surge2 => Some("electric-surge-2"),
            FlickerState::Surge3 => Some("electric-surge-3"),
        }
    }

    pub fn is_surge(self) -> bool {
        matches!(
            self,
            FlickerState::Surge1 | FlickerState::Surge2 | FlickerState::Surge3
        )
    }

    /// Every state that carries a marker.
    pub const MARKED: [FlickerState; 6] = [
        FlickerState::Dim,
        FlickerState::Off,
        FlickerState::Weak,
        FlickerState::Surge1,
        FlickerState::Surge2,
        FlickerState::Surge3,
    ];
}

/// A presentational marker owned by a sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Base neon styling, present for the whole bound lifetime
    Base,
    /// Static high glow used under reduced motion
    Static,
    /// Active flicker state. Build it with [`Marker::for_state`]; `Neutral`
    /// is the absence of a state marker and has no class.
    State(FlickerState),
    Intensity(Intensity),
}

impl Marker {
    /// The marker showing `state`, or `None` for `Neutral`.
    pub fn for_state(state: FlickerState) -> Option<Marker> {
        state.class().map(|_| Marker::State(state))
    }

    /// CSS class of the marker; `None` only for `State(Neutral)`.
    pub fn class(self) -> Option<&'static str> {
        match self {
            Marker::Base => Some("neon-logo"),
            Marker::Static => Some("neon-static"),
            Marker::State(state) => state.class(),
            Marker::Intensity(Intensity::Low) => Some("intensity-low"),
            Marker::Intensity(Intensity::Medium) => Some("intensity-medium"),
            Marker::Intensity(Intensity::High) => Some("intensity-high"),
        }
    }

    pub fn is_state(self) -> bool {
        matches!(self, Marker::State(_))
    }
}

/// One timed `(state, duration)` pair of the authored sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlickerStep {
    pub state: FlickerState,
    pub duration: Duration,
}

const fn step(state: FlickerState, millis: u64) -> FlickerStep {
    FlickerStep {
        state,
        duration: Duration::from_millis(millis),
    }
}

/// Pre-flicker warning.
pub const PRE_FLICKER: FlickerStep = step(FlickerState::Dim, 35);

/// Irregular dim/off/weak pulses of a tube losing power.
pub const FLICKER_LEG: [FlickerStep; 7] = [
    step(FlickerState::Off, 45),
    step(FlickerState::Weak, 60),
    step(FlickerState::Off, 40),
    step(FlickerState::Dim, 55),
    step(FlickerState::Weak, 70),
    step(FlickerState::Off, 30),
    step(FlickerState::Dim, 50),
];

/// Power stabilization surge.
pub const SURGE_LEG: [FlickerStep; 5] = [
    step(FlickerState::Surge1, 100),
    step(FlickerState::Surge2, 85),
    step(FlickerState::Surge3, 150),
    step(FlickerState::Surge2, 70),
    step(FlickerState::Surge1, 60),
];

/// The full run in traversal order; the run ends by returning to `Neutral`.
pub fn sequence() -> impl Iterator<Item = FlickerStep> {
    std::iter::once(PRE_FLICKER)
        .chain(FLICKER_LEG)
        .chain(SURGE_LEG)
}

/// Total time one run spends in marked states.
pub fn sequence_duration() -> Duration {
    sequence().map(|s| s.duration).sum()
}
