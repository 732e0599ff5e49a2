//! Several signs sharing one config, and the page-wide reduced-motion listener.

use log::{debug, info};
use tokio_util::sync::CancellationToken;

use crate::config::FlickerConfig;
use crate::page::Page;
use crate::sequencer::NeonFlicker;
use crate::target::VisualTarget;

/// A set of sequencers created together.
pub struct NeonGroup<T> {
    members: Vec<NeonFlicker<T>>,
}

impl<T: VisualTarget> NeonGroup<T> {
    /// One sequencer per target, all with the same config.
    ///
    /// Each member gets its own scheduling RNG. A shared `seed` would put every
    /// member in lockstep, so it is offset by the member index.
    pub fn create_multiple<I>(targets: I, config: FlickerConfig, page: &Page) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let members = targets
            .into_iter()
            .enumerate()
            .map(|(i, target)| {
                let config = FlickerConfig {
                    seed: config.seed.map(|s| s.wrapping_add(i as u64)),
                    ..config.clone()
                };
                NeonFlicker::new(Some(target), config, page)
            })
            .collect();
        Self { members }
    }

    pub fn members(&self) -> &[NeonFlicker<T>] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn start_all(&self) {
        for member in &self.members {
            member.start();
        }
    }

    pub fn stop_all(&self) {
        for member in &self.members {
            member.stop();
        }
    }

    pub fn destroy_all(&self) {
        for member in &self.members {
            member.destroy();
        }
    }

    /// Follows live changes of the page's reduced-motion preference.
    ///
    /// Turning the preference on stops every member; turning it off starts
    /// them again. Members that were built static or have been destroyed are
    /// left alone. Cancel the returned token to stop listening.
    ///
    /// Must be called within a Tokio runtime.
    pub fn watch_reduced_motion(&self, page: &Page) -> CancellationToken {
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        let members = self.members.clone();
        let mut preference = page.subscribe_reduced_motion();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = preference.changed() => {
                        if changed.is_err() {
                            debug!("Reduced-motion preference source closed");
                            break;
                        }
                        let reduced = *preference.borrow_and_update();
                        if reduced {
                            info!("Reduced motion enabled; stopping {} neon signs", members.len());
                            members.iter().for_each(NeonFlicker::stop);
                        } else {
                            info!("Reduced motion disabled; restarting {} neon signs", members.len());
                            members.iter().for_each(NeonFlicker::start);
                        }
                    }
                    _ = token.cancelled() => {
                        debug!("Reduced-motion listener shutting down");
                        break;
                    }
                }
            }
        });

        shutdown
    }
}
