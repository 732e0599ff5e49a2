//! Neon flicker sequencer.
//!
//! Drives one [`VisualTarget`] through the authored flicker/surge step table,
//! rescheduling itself after every run with a delay drawn uniformly from the
//! configured interval so that several signs never flicker in lockstep.
//!
//! Public operations never fail from the caller's point of view: a missing
//! target or an invalid config yields an inert instance, and faults raised
//! while a sequence runs are swallowed, counted and handed to an optional hook.

mod driver;
mod runtime;
mod schedule;

use std::marker::PhantomData;
use std::sync::Arc;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::runtime::Handle;

use crate::config::{FlickerConfig, Intensity, DEFAULT_TEXT};
use crate::error_handling::{ConfigError, FaultStats, SequenceFault};
use crate::page::Page;
use crate::styles::ensure_styles_installed;
use crate::target::VisualTarget;

pub use runtime::FaultHook;
pub use schedule::{next_interval, warm_up_delay};

use runtime::{ignore, setup_element, setup_static, Runtime, Shared};

/// Builder for [`NeonFlicker`].
///
/// The target type is fixed by [`attach`](Self::attach), so call sites never
/// need to name it.
///
/// # Examples
///
/// ```no_run
/// use neon_flicker::{FlickerConfig, MemoryTarget, NeonFlicker, Page};
///
/// # #[tokio::main]
/// # async fn main() {
/// let page = Page::new();
/// let sign = NeonFlicker::builder(FlickerConfig::default())
///     .page(&page)
///     .on_fault(|fault| eprintln!("neon fault: {}", fault))
///     .attach(Some(MemoryTarget::new()));
/// assert!(sign.is_started());
/// # }
/// ```
pub struct NeonFlickerBuilder<T> {
    config: FlickerConfig,
    page: Option<Page>,
    on_fault: Option<FaultHook>,
    target: PhantomData<fn() -> T>,
}

impl<T: VisualTarget> NeonFlickerBuilder<T> {
    pub fn new(config: FlickerConfig) -> Self {
        Self {
            config,
            page: None,
            on_fault: None,
            target: PhantomData,
        }
    }

    /// Page providing the stylesheet registry and reduced-motion preference.
    /// Defaults to a fresh page.
    pub fn page(mut self, page: &Page) -> Self {
        self.page = Some(page.clone());
        self
    }

    /// Diagnostic hook for faults swallowed during sequence runs.
    pub fn on_fault<F>(mut self, hook: F) -> Self
    where
        F: Fn(&SequenceFault) + Send + Sync + 'static,
    {
        self.on_fault = Some(Arc::new(hook));
        self
    }

    /// Binds the sequencer to `target`. `None` produces an inert instance.
    pub fn attach(self, target: Option<T>) -> NeonFlicker<T> {
        let Some(mut target) = target else {
            debug!("No target to attach; neon sequencer is inert");
            return NeonFlicker { shared: None };
        };
        let config = self.config;
        if let Err(e) = config.validate() {
            warn!("Invalid neon config, sequencer is inert: {}", e);
            return NeonFlicker { shared: None };
        }
        let page = self.page.unwrap_or_default();

        let text = config
            .label()
            .map(str::to_string)
            .or_else(|| target.label().filter(|t| !t.is_empty()))
            .unwrap_or_else(|| DEFAULT_TEXT.to_string());

        let is_static = config.respect_reduced_motion && page.prefers_reduced_motion();
        if let Ok(rgb) = config.rgb() {
            ensure_styles_installed(page.styles(), rgb);
        }
        if is_static {
            info!("Reduced motion preferred; showing static neon glow");
            ignore(setup_static(&mut target, &text), "static setup");
        } else {
            ignore(setup_element(&mut target, &config, &text), "element setup");
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let auto_start = config.auto_start;
        let runtime = Runtime {
            target,
            config,
            text,
            is_animating: false,
            is_destroyed: false,
            is_static,
            started: false,
            epoch: 0,
            pending: None,
            applied_intensity: None,
            rng,
        };
        let flicker = NeonFlicker {
            shared: Some(Arc::new(Shared {
                runtime: std::sync::Mutex::new(runtime),
                on_fault: self.on_fault,
                stats: FaultStats::new(),
            })),
        };
        if auto_start && !is_static {
            flicker.start();
        }
        flicker
    }
}

/// A neon sign sequencer bound to one target.
///
/// Cheap to clone; clones control the same sequencer. The driver task only
/// holds a weak reference, so dropping every handle ends the schedule at the
/// next wake-up (the target keeps whatever it showed last).
pub struct NeonFlicker<T> {
    shared: Option<Arc<Shared<T>>>,
}

impl<T> Clone for NeonFlicker<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T: VisualTarget> NeonFlicker<T> {
    pub fn builder(config: FlickerConfig) -> NeonFlickerBuilder<T> {
        NeonFlickerBuilder::new(config)
    }

    /// Binds a sequencer to `target` on `page`.
    pub fn new(target: Option<T>, config: FlickerConfig, page: &Page) -> Self {
        Self::builder(config).page(page).attach(target)
    }

    /// Schedules the first sequence after a 2–5s warm-up.
    ///
    /// No-op when inert, static, destroyed or already started, and when called
    /// outside a Tokio runtime.
    pub fn start(&self) {
        let Some(shared) = &self.shared else {
            return;
        };
        let Ok(handle) = Handle::try_current() else {
            warn!("Neon sequencer started outside a Tokio runtime; ignoring");
            return;
        };
        let mut rt = shared.lock();
        if rt.is_destroyed || rt.is_static || rt.started {
            return;
        }
        rt.started = true;
        rt.sync_intensity_marker();
        let delay = warm_up_delay(&mut rt.rng);
        rt.cancel_pending();
        let epoch = rt.epoch;
        rt.pending = Some(handle.spawn(driver::drive(Arc::downgrade(shared), epoch, delay)));
        info!(
            "Neon sequencer started for {:?}; first sequence in {}ms",
            rt.text,
            delay.as_millis()
        );
    }

    /// Cancels the pending timer and returns the target to neutral. Idempotent.
    pub fn stop(&self) {
        let Some(shared) = &self.shared else {
            return;
        };
        let mut rt = shared.lock();
        rt.cancel_pending();
        rt.is_animating = false;
        rt.started = false;
        rt.clear_states();
    }

    /// Stops for good and removes every marker and property this sequencer
    /// placed. Idempotent; later `start()` calls do nothing.
    pub fn destroy(&self) {
        let Some(shared) = &self.shared else {
            return;
        };
        self.stop();
        let mut rt = shared.lock();
        if !rt.is_destroyed {
            debug!("Destroying neon sequencer for {:?}", rt.text);
        }
        rt.is_destroyed = true;
        rt.strip_target();
    }

    /// Runs a sequence now unless one is already running.
    ///
    /// Replaces any pending timer, so the sequencer still has at most one.
    pub fn trigger_sequence(&self) {
        let Some(shared) = &self.shared else {
            return;
        };
        let Ok(handle) = Handle::try_current() else {
            warn!("Neon sequence triggered outside a Tokio runtime; ignoring");
            return;
        };
        let mut rt = shared.lock();
        if rt.is_animating || rt.is_destroyed || rt.is_static {
            return;
        }
        rt.started = true;
        rt.sync_intensity_marker();
        rt.cancel_pending();
        let epoch = rt.epoch;
        rt.pending = Some(handle.spawn(driver::drive(
            Arc::downgrade(shared),
            epoch,
            std::time::Duration::ZERO,
        )));
    }

    /// Switches the glow tier.
    ///
    /// Takes effect immediately between runs; a run in progress keeps its tier
    /// and the switch lands when it ends.
    pub fn set_intensity(&self, intensity: Intensity) {
        let Some(shared) = &self.shared else {
            return;
        };
        let mut rt = shared.lock();
        if rt.is_destroyed {
            return;
        }
        rt.config.intensity = intensity;
        if !rt.is_animating {
            rt.sync_intensity_marker();
        }
    }

    pub fn set_text(&self, text: &str) {
        let Some(shared) = &self.shared else {
            return;
        };
        let mut rt = shared.lock();
        rt.text = text.to_string();
        rt.config.text = Some(text.to_string());
        ignore(rt.target.set_label(text), "set label");
    }

    /// The label; `None` for an inert instance.
    pub fn get_text(&self) -> Option<String> {
        self.shared.as_ref().map(|s| s.lock().text.clone())
    }

    /// Replaces the configuration and re-applies element setup.
    ///
    /// The new interval applies from the next scheduling; the intensity goes
    /// through [`set_intensity`](Self::set_intensity). No-op once destroyed.
    pub fn update_config(&self, config: FlickerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let Some(shared) = &self.shared else {
            return Ok(());
        };
        let intensity = config.intensity;
        {
            let mut rt = shared.lock();
            if rt.is_destroyed {
                return Ok(());
            }
            let text = config.label().map(str::to_string).unwrap_or(rt.text.clone());
            let current = rt.config.intensity;
            rt.config = FlickerConfig {
                intensity: current,
                ..config
            };
            rt.text = text;
            let Runtime {
                target,
                config,
                text,
                is_static,
                ..
            } = &mut *rt;
            if *is_static {
                ignore(target.set_label(text), "set label");
            } else {
                ignore(setup_element(target, config, text), "element setup");
            }
        }
        self.set_intensity(intensity);
        Ok(())
    }

    pub fn config(&self) -> Option<FlickerConfig> {
        self.shared.as_ref().map(|s| s.lock().config.clone())
    }

    pub fn is_inert(&self) -> bool {
        self.shared.is_none()
    }

    pub fn is_animating(&self) -> bool {
        self.shared.as_ref().is_some_and(|s| s.lock().is_animating)
    }

    pub fn is_destroyed(&self) -> bool {
        self.shared.as_ref().is_some_and(|s| s.lock().is_destroyed)
    }

    pub fn is_started(&self) -> bool {
        self.shared.as_ref().is_some_and(|s| s.lock().started)
    }

    /// Showing the reduced-motion static glow.
    pub fn is_static(&self) -> bool {
        self.shared.as_ref().is_some_and(|s| s.lock().is_static)
    }

    /// A driver task is scheduled and has not finished.
    pub fn has_pending_timer(&self) -> bool {
        self.shared.as_ref().is_some_and(|s| {
            s.lock()
                .pending
                .as_ref()
                .is_some_and(|h| !h.is_finished())
        })
    }

    /// Faults swallowed so far; `None` for an inert instance.
    pub fn fault_stats(&self) -> Option<&FaultStats> {
        self.shared.as_ref().map(|s| &s.stats)
    }
}
