//! Window handle with progress-indicator state

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct WindowInner {
    label: String,
    progress_bar: RwLock<Option<f64>>,
    destroyed: AtomicBool,
}

/// Handle for the window that owns a download. Carries the taskbar/dock
/// progress-indicator state the host adapter mirrors to the OS.
#[derive(Debug, Clone)]
pub struct Window {
    inner: Arc<WindowInner>,
}

impl Window {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(WindowInner {
                label: label.into(),
                progress_bar: RwLock::new(None),
                destroyed: AtomicBool::new(false),
            }),
        }
    }

    pub fn label(&self) -> &str {
        &self.inner.label
    }

    pub fn set_progress_bar(&self, ratio: f64) {
        if self.is_destroyed() {
            return;
        }
        *self.inner.progress_bar.write() = Some(ratio);
    }

    pub fn clear_progress_bar(&self) {
        if self.is_destroyed() {
            return;
        }
        *self.inner.progress_bar.write() = None;
    }

    pub fn progress_bar(&self) -> Option<f64> {
        self.inner.progress_bar.read().as_ref().copied()
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.destroyed.load(Ordering::SeqCst)
    }

    pub fn destroy(&self) {
        self.inner.destroyed.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        let window = Window::new("main");
        assert!(window.progress_bar().is_none());

        window.set_progress_bar(0.4);
        assert_eq!(window.progress_bar(), Some(0.4));

        window.clear_progress_bar();
        assert!(window.progress_bar().is_none());
    }

    #[test]
    fn test_destroyed_window_ignores_updates() {
        let window = Window::new("main");
        window.set_progress_bar(0.4);
        window.destroy();

        window.set_progress_bar(0.8);
        assert_eq!(window.progress_bar(), Some(0.4));
        assert!(window.is_destroyed());
    }
}
