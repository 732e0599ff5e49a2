//! Fault statistics tracking.
//!
//! Thread-safe counters for faults swallowed by sequence runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::FaultKind;

/// Thread-safe fault statistics tracker.
///
/// Uses atomic counters so the driver task can record while callers read. All
/// kinds are initialized to zero on creation.
#[derive(Debug)]
pub struct FaultStats {
    faults: HashMap<FaultKind, AtomicUsize>,
}

impl Default for FaultStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FaultStats {
    pub fn new() -> Self {
        let mut faults = HashMap::new();
        for kind in FaultKind::iter() {
            faults.insert(kind, AtomicUsize::new(0));
        }
        FaultStats { faults }
    }

    /// Increment a fault counter.
    pub fn increment(&self, kind: FaultKind) {
        if let Some(counter) = self.faults.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment fault counter for {:?} which is not in the map",
                kind
            );
        }
    }

    /// Get the count for a fault kind.
    pub fn get(&self, kind: FaultKind) -> usize {
        self.faults
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total faults across all kinds.
    pub fn total(&self) -> usize {
        FaultKind::iter().map(|k| self.get(k)).sum()
    }
}
