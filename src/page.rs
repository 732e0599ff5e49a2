//! Shared environment of the sequencers on one surface.

use std::sync::Arc;

use tokio::sync::watch;

use crate::styles::StyleRegistry;

/// The environment sequencers are constructed in.
///
/// Holds the shared stylesheet registry and the live reduced-motion
/// preference. Clones share both.
#[derive(Debug, Clone)]
pub struct Page {
    styles: Arc<StyleRegistry>,
    reduced_motion: Arc<watch::Sender<bool>>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// A page with no stylesheets and no reduced-motion preference.
    pub fn new() -> Self {
        Self::with_reduced_motion(false)
    }

    pub fn with_reduced_motion(preferred: bool) -> Self {
        let (tx, _rx) = watch::channel(preferred);
        Self {
            styles: Arc::new(StyleRegistry::new()),
            reduced_motion: Arc::new(tx),
        }
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn prefers_reduced_motion(&self) -> bool {
        *self.reduced_motion.borrow()
    }

    /// Updates the preference; subscribers are only woken on an actual change.
    pub fn set_reduced_motion(&self, preferred: bool) {
        self.reduced_motion.send_if_modified(|current| {
            if *current == preferred {
                return false;
            }
            *current = preferred;
            true
        });
    }

    pub fn subscribe_reduced_motion(&self) -> watch::Receiver<bool> {
        self.reduced_motion.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_preference_change_notifies_subscribers() {
        let page = Page::new();
        let mut rx = page.subscribe_reduced_motion();
        page.set_reduced_motion(true);
        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update());
        assert!(page.prefers_reduced_motion());
    }

    #[tokio::test]
    async fn test_same_value_does_not_notify() {
        let page = Page::with_reduced_motion(true);
        let rx = page.subscribe_reduced_motion();
        page.set_reduced_motion(true);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_clones_share_styles() {
        let page = Page::new();
        let other = page.clone();
        crate::styles::ensure_styles_installed(page.styles(), (1, 2, 3));
        assert_eq!(other.styles().len(), 1);
    }
}
