//! Mutable sequencer state and element setup.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;
use rand::rngs::StdRng;
use tokio::task::JoinHandle;

use crate::config::{
    FlickerConfig, Intensity, OWNED_PROPERTIES, PROP_COLOR, PROP_FONT, PROP_FONT_SIZE,
    PROP_FONT_WEIGHT, PROP_LETTER_SPACING,
};
use crate::error_handling::{FaultStats, SequenceFault, TargetError};
use crate::state::Marker;
use crate::target::{clear_state_markers, VisualTarget};

/// Callback receiving faults swallowed by sequence runs.
pub type FaultHook = Arc<dyn Fn(&SequenceFault) + Send + Sync>;

/// Runtime of one bound sequencer. Always accessed under [`Shared::runtime`].
pub(crate) struct Runtime<T> {
    pub(crate) target: T,
    pub(crate) config: FlickerConfig,
    pub(crate) text: String,
    pub(crate) is_animating: bool,
    pub(crate) is_destroyed: bool,
    pub(crate) is_static: bool,
    pub(crate) started: bool,
    /// Bumped whenever the pending driver is replaced or cancelled
    pub(crate) epoch: u64,
    pub(crate) pending: Option<JoinHandle<()>>,
    /// Intensity marker currently on the target
    pub(crate) applied_intensity: Option<Intensity>,
    pub(crate) rng: StdRng,
}

impl<T: VisualTarget> Runtime<T> {
    /// A callback scheduled under `epoch` may still act.
    pub(crate) fn is_fresh(&self, epoch: u64) -> bool {
        !self.is_destroyed && self.epoch == epoch
    }

    /// Invalidates the pending driver, if any.
    pub(crate) fn cancel_pending(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Brings the intensity marker in line with the configured tier.
    pub(crate) fn sync_intensity_marker(&mut self) {
        let wanted = self.config.intensity;
        if self.applied_intensity == Some(wanted) {
            return;
        }
        if let Some(old) = self.applied_intensity.take() {
            ignore(self.target.remove_marker(Marker::Intensity(old)), "remove intensity");
        }
        if self.target.add_marker(Marker::Intensity(wanted)).is_ok() {
            self.applied_intensity = Some(wanted);
        }
    }

    pub(crate) fn clear_states(&mut self) {
        ignore(clear_state_markers(&mut self.target), "clear state markers");
    }

    /// Removes every marker and property this sequencer ever placed.
    pub(crate) fn strip_target(&mut self) {
        self.clear_states();
        for marker in [
            Marker::Base,
            Marker::Static,
            Marker::Intensity(Intensity::Low),
            Marker::Intensity(Intensity::Medium),
            Marker::Intensity(Intensity::High),
        ] {
            ignore(self.target.remove_marker(marker), "remove marker");
        }
        self.applied_intensity = None;
        for name in OWNED_PROPERTIES {
            ignore(self.target.remove_property(name), "remove property");
        }
    }
}

/// Shared between the public handle and its driver task.
pub(crate) struct Shared<T> {
    pub(crate) runtime: Mutex<Runtime<T>>,
    pub(crate) on_fault: Option<FaultHook>,
    pub(crate) stats: FaultStats,
}

impl<T> Shared<T> {
    pub(crate) fn lock(&self) -> MutexGuard<'_, Runtime<T>> {
        // Target panics are caught by the driver, so a poisoned runtime is still usable
        self.runtime.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Counts and logs `fault`, then hands it to the hook. A panicking hook is
    /// contained here so the schedule survives it.
    pub(crate) fn report(&self, fault: SequenceFault) {
        debug!("Swallowed sequence fault: {}", fault);
        self.stats.increment(fault.kind());
        if let Some(hook) = &self.on_fault {
            if catch_unwind(AssertUnwindSafe(|| hook(&fault))).is_err() {
                debug!("Fault hook panicked while handling: {}", fault);
            }
        }
    }
}

/// Writes the label, base marker and style properties.
pub(crate) fn setup_element<T: VisualTarget>(
    target: &mut T,
    config: &FlickerConfig,
    text: &str,
) -> Result<(), TargetError> {
    target.set_label(text)?;
    target.add_marker(Marker::Base)?;
    target.set_property(PROP_FONT, &config.font)?;
    target.set_property(PROP_FONT_SIZE, &config.font_size)?;
    target.set_property(PROP_FONT_WEIGHT, &config.font_weight)?;
    target.set_property(PROP_LETTER_SPACING, &config.letter_spacing)?;
    target.set_property(PROP_COLOR, &config.color)?;
    Ok(())
}

/// Reduced-motion variant: one static high glow, no properties.
pub(crate) fn setup_static<T: VisualTarget>(target: &mut T, text: &str) -> Result<(), TargetError> {
    target.add_marker(Marker::Base)?;
    target.add_marker(Marker::Static)?;
    target.set_label(text)
}

/// Best-effort target calls outside a run are logged and dropped.
pub(crate) fn ignore(result: Result<(), TargetError>, what: &str) {
    if let Err(e) = result {
        debug!("Ignoring target error during {}: {}", what, e);
    }
}
