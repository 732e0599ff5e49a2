// Shared test helpers for sequencer setup and timeline inspection.

use std::time::Duration;

use neon_flicker::target::StateSample;
use neon_flicker::{FlickerConfig, FlickerState};

/// Config that never schedules on its own within a test's horizon.
#[allow(dead_code)]
pub fn manual_config() -> FlickerConfig {
    FlickerConfig {
        text: Some("Open".to_string()),
        flicker_interval: [60_000, 60_000],
        auto_start: false,
        seed: Some(7),
        ..Default::default()
    }
}

/// Config that reschedules quickly with a fixed one-second gap.
#[allow(dead_code)]
pub fn fast_config() -> FlickerConfig {
    FlickerConfig {
        flicker_interval: [1000, 1000],
        ..manual_config()
    }
}

/// Drops leading neutral samples (element setup before the first run).
#[allow(dead_code)]
pub fn from_first_run(timeline: Vec<StateSample>) -> Vec<StateSample> {
    timeline
        .into_iter()
        .skip_while(|s| s.state == FlickerState::Neutral)
        .collect()
}

/// Each visible state paired with how long it lasted, in milliseconds. The
/// final sample has no successor and is reported with `None`.
#[allow(dead_code)]
pub fn with_durations(samples: &[StateSample]) -> Vec<(FlickerState, Option<u64>)> {
    samples
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let lasted = samples
                .get(i + 1)
                .map(|next| (next.at - s.at).as_millis() as u64);
            (s.state, lasted)
        })
        .collect()
}

/// Instants at which a run began: a `Dim` entered from `Neutral` or first.
#[allow(dead_code)]
pub fn run_starts(samples: &[StateSample]) -> Vec<tokio::time::Instant> {
    samples
        .iter()
        .enumerate()
        .filter(|(i, s)| {
            s.state == FlickerState::Dim
                && (*i == 0 || samples[i - 1].state == FlickerState::Neutral)
        })
        .map(|(_, s)| s.at)
        .collect()
}

#[allow(dead_code)]
pub fn count_state(samples: &[StateSample], state: FlickerState) -> usize {
    samples.iter().filter(|s| s.state == state).count()
}

#[allow(dead_code)]
pub async fn wait_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
