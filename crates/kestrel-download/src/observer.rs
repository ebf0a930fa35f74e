//! Download observer capability

use crate::download::DownloadResult;

/// Observes the downloads bound to one listener registration.
///
/// All methods run synchronously on the host event thread and have no-op
/// defaults; implement only what the embedder needs.
pub trait DownloadObserver: Send + Sync {
    /// Called on every progress tick with the received/total ratio (0.0-1.0).
    fn on_progress(&self, _ratio: f64) {}

    /// Polled on every progress tick; returning true requests cancellation.
    /// A stalled download with no further ticks is never polled again.
    fn should_cancel(&self) -> bool {
        false
    }

    /// Called once per download when it reaches a terminal state.
    fn on_complete(&self, _result: &DownloadResult) {}
}
