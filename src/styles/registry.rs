//! Shared stylesheet registry.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use log::debug;

use super::appearance::render_stylesheet;
use crate::config::STYLESHEET_ID;

/// Stylesheet fragments keyed by a well-known identifier.
///
/// Plays the role of a document head: fragments are installed at most once per
/// id and shared by every sequencer bound to the same [`Page`](crate::Page).
#[derive(Debug, Default)]
pub struct StyleRegistry {
    sheets: Mutex<HashMap<String, String>>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn sheets(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map
        self.sheets.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sheets().contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<String> {
        self.sheets().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.sheets().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets().is_empty()
    }

    /// Installs `css` under `id` unless something is already there.
    ///
    /// The presence check and the insert happen under one lock. `css` is only
    /// evaluated when the id is absent. Returns whether this call installed.
    pub fn install_with<F>(&self, id: &str, css: F) -> bool
    where
        F: FnOnce() -> String,
    {
        let mut sheets = self.sheets();
        if sheets.contains_key(id) {
            return false;
        }
        sheets.insert(id.to_string(), css());
        true
    }
}

/// Installs the neon stylesheet fragment if it is not present yet.
///
/// Safe to call from every sequencer construction; only the first call for a
/// registry does any work.
pub fn ensure_styles_installed(registry: &StyleRegistry, rgb: (u8, u8, u8)) -> bool {
    let installed = registry.install_with(STYLESHEET_ID, || render_stylesheet(rgb));
    if installed {
        debug!("Installed stylesheet fragment {}", STYLESHEET_ID);
    }
    installed
}
