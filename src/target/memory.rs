//! In-memory recording target.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::time::Instant;

use super::VisualTarget;
use crate::config::Intensity;
use crate::error_handling::TargetError;
use crate::state::{FlickerState, Marker};

/// A recorded presentational change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Label(String),
    Added(Marker),
    Removed(Marker),
    PropertySet(String, String),
    PropertyRemoved(String),
}

/// A change and the (Tokio) instant it happened.
#[derive(Debug, Clone)]
pub struct TargetEvent {
    pub at: Instant,
    pub change: Change,
}

/// The visible state of the target at an instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSample {
    pub at: Instant,
    pub state: FlickerState,
    pub intensity: Option<Intensity>,
}

#[derive(Debug, Clone, Copy)]
enum InjectedFault {
    Error,
    Panic,
}

#[derive(Debug, Default)]
struct Element {
    label: Option<String>,
    markers: HashSet<Marker>,
    properties: BTreeMap<String, String>,
    events: Vec<TargetEvent>,
    max_state_markers: usize,
    detached: bool,
    faults: HashMap<FlickerState, InjectedFault>,
}

impl Element {
    fn record(&mut self, change: Change) {
        self.events.push(TargetEvent {
            at: Instant::now(),
            change,
        });
    }

    fn state_marker_count(&self) -> usize {
        self.markers.iter().filter(|m| m.is_state()).count()
    }

    fn check_attached(&self) -> Result<(), TargetError> {
        if self.detached {
            return Err(TargetError::Detached);
        }
        Ok(())
    }
}

/// Cloneable handle to an in-memory element that records every change.
///
/// Clones share the element, so a test can hand one clone to a sequencer and
/// inspect the other. Timestamps come from `tokio::time`, which makes the
/// recording exact under a paused test clock.
#[derive(Debug, Clone, Default)]
pub struct MemoryTarget {
    inner: Arc<Mutex<Element>>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// An element that already shows `label`.
    pub fn with_label(label: &str) -> Self {
        let target = Self::new();
        target.element().label = Some(label.to_string());
        target
    }

    fn element(&self) -> MutexGuard<'_, Element> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn markers(&self) -> HashSet<Marker> {
        self.element().markers.clone()
    }

    pub fn has_marker(&self, marker: Marker) -> bool {
        self.element().markers.contains(&marker)
    }

    /// The state whose marker is present, or `Neutral`.
    pub fn active_state(&self) -> FlickerState {
        self.element()
            .markers
            .iter()
            .find_map(|m| match m {
                Marker::State(s) => Some(*s),
                _ => None,
            })
            .unwrap_or(FlickerState::Neutral)
    }

    pub fn intensity(&self) -> Option<Intensity> {
        intensity_of(&self.element().markers)
    }

    pub fn property(&self, name: &str) -> Option<String> {
        self.element().properties.get(name).cloned()
    }

    pub fn properties(&self) -> BTreeMap<String, String> {
        self.element().properties.clone()
    }

    pub fn events(&self) -> Vec<TargetEvent> {
        self.element().events.clone()
    }

    /// Highest number of state markers ever present at once.
    pub fn max_simultaneous_state_markers(&self) -> usize {
        self.element().max_state_markers
    }

    /// Replays the recorded changes into the sequence of visible states.
    ///
    /// Changes made at the same instant collapse to the last one, and repeated
    /// states are merged, so clearing then adding a marker in one step shows up
    /// as a single transition.
    pub fn state_timeline(&self) -> Vec<StateSample> {
        let events = self.events();
        let mut markers: HashSet<Marker> = HashSet::new();
        let mut samples: Vec<StateSample> = Vec::new();
        for event in events {
            match &event.change {
                Change::Added(m) => {
                    markers.insert(*m);
                }
                Change::Removed(m) => {
                    markers.remove(m);
                }
                _ => continue,
            }
            let state = markers
                .iter()
                .find_map(|m| match m {
                    Marker::State(s) => Some(*s),
                    _ => None,
                })
                .unwrap_or(FlickerState::Neutral);
            let sample = StateSample {
                at: event.at,
                state,
                intensity: intensity_of(&markers),
            };
            if samples.last().is_some_and(|last| last.at == sample.at) {
                samples.pop();
            }
            if samples.last().is_some_and(|last| last.state == sample.state) {
                continue;
            }
            samples.push(sample);
        }
        samples
    }

    pub fn clear_events(&self) {
        self.element().events.clear();
    }

    /// Simulates the element being removed: every later mutation fails.
    pub fn detach(&self) {
        self.element().detached = true;
    }

    /// The next time `state` is applied, fail with a render error.
    pub fn fail_on(&self, state: FlickerState) {
        self.element().faults.insert(state, InjectedFault::Error);
    }

    /// The next time `state` is applied, panic.
    pub fn panic_on(&self, state: FlickerState) {
        self.element().faults.insert(state, InjectedFault::Panic);
    }
}

fn intensity_of(markers: &HashSet<Marker>) -> Option<Intensity> {
    markers.iter().find_map(|m| match m {
        Marker::Intensity(i) => Some(*i),
        _ => None,
    })
}

impl VisualTarget for MemoryTarget {
    fn label(&self) -> Option<String> {
        self.element().label.clone()
    }

    fn set_label(&mut self, text: &str) -> Result<(), TargetError> {
        let mut el = self.element();
        el.check_attached()?;
        el.label = Some(text.to_string());
        el.record(Change::Label(text.to_string()));
        Ok(())
    }

    fn add_marker(&mut self, marker: Marker) -> Result<(), TargetError> {
        let fault = {
            let mut el = self.element();
            el.check_attached()?;
            match marker {
                Marker::State(state) => el.faults.remove(&state),
                _ => None,
            }
        };
        match fault {
            Some(InjectedFault::Error) => {
                return Err(TargetError::Render(format!(
                    "injected failure applying {}",
                    marker.class().unwrap_or_default()
                )))
            }
            Some(InjectedFault::Panic) => {
                panic!("injected panic applying {}", marker.class().unwrap_or_default())
            }
            None => {}
        }

        let mut el = self.element();
        if el.markers.insert(marker) {
            el.record(Change::Added(marker));
            let count = el.state_marker_count();
            el.max_state_markers = el.max_state_markers.max(count);
        }
        Ok(())
    }

    fn remove_marker(&mut self, marker: Marker) -> Result<(), TargetError> {
        let mut el = self.element();
        el.check_attached()?;
        if el.markers.remove(&marker) {
            el.record(Change::Removed(marker));
        }
        Ok(())
    }

    fn set_property(&mut self, name: &str, value: &str) -> Result<(), TargetError> {
        let mut el = self.element();
        el.check_attached()?;
        el.properties.insert(name.to_string(), value.to_string());
        el.record(Change::PropertySet(name.to_string(), value.to_string()));
        Ok(())
    }

    fn remove_property(&mut self, name: &str) -> Result<(), TargetError> {
        let mut el = self.element();
        el.check_attached()?;
        if el.properties.remove(name).is_some() {
            el.record(Change::PropertyRemoved(name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::apply_state;

    #[tokio::test(start_paused = true)]
    async fn test_apply_state_is_exclusive() {
        let mut target = MemoryTarget::new();
        apply_state(&mut target, FlickerState::Dim).unwrap();
        apply_state(&mut target, FlickerState::Surge2).unwrap();
        assert_eq!(target.active_state(), FlickerState::Surge2);
        assert_eq!(target.max_simultaneous_state_markers(), 1);
        apply_state(&mut target, FlickerState::Neutral).unwrap();
        assert_eq!(target.active_state(), FlickerState::Neutral);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeline_collapses_same_instant_changes() {
        let mut target = MemoryTarget::new();
        apply_state(&mut target, FlickerState::Dim).unwrap();
        tokio::time::advance(std::time::Duration::from_millis(10)).await;
        apply_state(&mut target, FlickerState::Off).unwrap();
        let states: Vec<FlickerState> =
            target.state_timeline().into_iter().map(|s| s.state).collect();
        assert_eq!(states, vec![FlickerState::Dim, FlickerState::Off]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_detached_target_rejects_changes() {
        let mut target = MemoryTarget::new();
        target.detach();
        assert!(matches!(
            target.add_marker(Marker::Base),
            Err(TargetError::Detached)
        ));
        assert!(target.markers().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_injected_fault_fires_once() {
        let mut target = MemoryTarget::new();
        target.fail_on(FlickerState::Weak);
        assert!(apply_state(&mut target, FlickerState::Weak).is_err());
        assert!(apply_state(&mut target, FlickerState::Weak).is_ok());
        assert_eq!(target.active_state(), FlickerState::Weak);
    }

    #[test]
    fn test_clones_share_the_element() {
        let target = MemoryTarget::with_label("Open");
        let mut handle = target.clone();
        handle.set_property("--neon-color", "#ffffff").unwrap();
        assert_eq!(target.label().as_deref(), Some("Open"));
        assert_eq!(target.property("--neon-color").as_deref(), Some("#ffffff"));
    }
}
