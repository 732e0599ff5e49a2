//! The driver task: the single pending timer of a started sequencer.
//!
//! The task sleeps until the next run, plays the step table while suspending
//! at every step boundary, then schedules the following run. Every wake-up
//! re-checks the epoch it was spawned under, so a `stop()` or `destroy()` that
//! happened while it slept leaves the target untouched.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Weak;
use std::time::Duration;

use futures::FutureExt;
use log::{debug, trace};

use super::runtime::Shared;
use super::schedule::next_interval;
use crate::error_handling::{SequenceFault, TargetError};
use crate::state::{sequence, FlickerState};
use crate::target::{apply_state, VisualTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunOutcome {
    Completed,
    Faulted,
    /// Cancelled or destroyed mid-run
    Stale,
}

/// Body of the driver task.
///
/// Holds only a weak reference while sleeping: once every handle to the
/// sequencer is dropped the task ends at its next wake-up.
pub(crate) async fn drive<T: VisualTarget>(
    shared: Weak<Shared<T>>,
    epoch: u64,
    first_delay: Duration,
) {
    let mut delay = first_delay;
    loop {
        tokio::time::sleep(delay).await;

        let Some(strong) = shared.upgrade() else {
            return;
        };
        let outcome = run_once(&strong, epoch).await;
        if outcome == RunOutcome::Stale {
            return;
        }

        // Runs after success and after a swallowed fault alike
        let next = {
            let mut rt = strong.lock();
            if !rt.is_fresh(epoch) {
                return;
            }
            rt.is_animating = false;
            rt.sync_intensity_marker();
            let (min, max) = (rt.config.min_interval(), rt.config.max_interval());
            next_interval(&mut rt.rng, min, max)
        };
        debug!("Next neon sequence in {}ms", next.as_millis());
        delay = next;
    }
}

async fn run_once<T: VisualTarget>(shared: &Shared<T>, epoch: u64) -> RunOutcome {
    {
        let mut rt = shared.lock();
        if !rt.is_fresh(epoch) {
            return RunOutcome::Stale;
        }
        rt.is_animating = true;
    }

    let result = AssertUnwindSafe(run_steps(shared, epoch))
        .catch_unwind()
        .await;

    let fault = match result {
        Ok(Ok(outcome)) => return outcome,
        Ok(Err(e)) => SequenceFault::Target(e),
        Err(payload) => SequenceFault::Panicked(panic_message(payload.as_ref())),
    };

    // The target is back to neutral and idle before any hook code runs
    let outcome = {
        let mut rt = shared.lock();
        if rt.is_fresh(epoch) {
            rt.clear_states();
            rt.is_animating = false;
            RunOutcome::Faulted
        } else {
            RunOutcome::Stale
        }
    };
    shared.report(fault);
    outcome
}

async fn run_steps<T: VisualTarget>(
    shared: &Shared<T>,
    epoch: u64,
) -> Result<RunOutcome, TargetError> {
    for step in sequence() {
        {
            let mut rt = shared.lock();
            if !rt.is_fresh(epoch) {
                return Ok(RunOutcome::Stale);
            }
            trace!("{} for {}ms", step.state, step.duration.as_millis());
            apply_state(&mut rt.target, step.state)?;
        }
        tokio::time::sleep(step.duration).await;
    }

    let mut rt = shared.lock();
    if !rt.is_fresh(epoch) {
        return Ok(RunOutcome::Stale);
    }
    apply_state(&mut rt.target, FlickerState::Neutral)?;
    Ok(RunOutcome::Completed)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
