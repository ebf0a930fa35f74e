//! Download session: scopes downloads and fans events out to listeners

use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use url::Url;
use uuid::Uuid;

use crate::error::HostError;
use crate::item::{DownloadItem, FinishState};
use crate::window::Window;
use crate::Result;

/// Observer attached to a [`DownloadSession`]. All callbacks run
/// synchronously on the host event thread.
pub trait SessionListener: Send + Sync {
    /// A new download is starting; the listener may assign its save path.
    fn will_download(&self, session: &DownloadSession, item: &DownloadItem, window: &Window);

    /// Progress changed for an in-flight download.
    fn download_updated(&self, session: &DownloadSession, item: &DownloadItem);

    /// The download reached a terminal state. Fires at most once per item.
    fn download_done(&self, session: &DownloadSession, item: &DownloadItem, state: FinishState);
}

/// Stable identity of an attached listener; detaching removes exactly the
/// listener the id was returned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// The host runtime's "download this URL" primitive.
pub trait DownloadStarter: Send + Sync {
    fn start_download(&self, window: &Window, url: &Url) -> Result<()>;
}

/// Starter for hosts without programmatic downloads.
pub struct NullStarter;

impl DownloadStarter for NullStarter {
    fn start_download(&self, _window: &Window, _url: &Url) -> Result<()> {
        Err(HostError::StartUnsupported)
    }
}

struct SessionInner {
    id: Uuid,
    listeners: RwLock<Vec<(ListenerId, Arc<dyn SessionListener>)>>,
    next_listener: AtomicU64,
    starter: Arc<dyn DownloadStarter>,
}

/// Scopes downloads to one browsing context. Cloning shares the same
/// underlying session; the host adapter drives it through the `notify_*`
/// entry points.
#[derive(Clone)]
pub struct DownloadSession {
    inner: Arc<SessionInner>,
}

impl DownloadSession {
    pub fn new(starter: Arc<dyn DownloadStarter>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                id: Uuid::new_v4(),
                listeners: RwLock::new(Vec::new()),
                next_listener: AtomicU64::new(0),
                starter,
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn attach(&self, listener: Arc<dyn SessionListener>) -> ListenerId {
        let id = ListenerId(self.inner.next_listener.fetch_add(1, Ordering::SeqCst));
        self.inner.listeners.write().push((id, listener));

        tracing::debug!(session_id = %self.inner.id, listener_id = id.0, "Attached listener");

        id
    }

    /// Detach a listener. Returns false if the id was already removed.
    pub fn detach(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.write();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        let removed = listeners.len() != before;

        if removed {
            tracing::debug!(session_id = %self.inner.id, listener_id = id.0, "Detached listener");
        }

        removed
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.read().len()
    }

    /// Ask the host runtime to start fetching `url` on behalf of `window`.
    pub fn start_download(&self, window: &Window, url: &Url) -> Result<()> {
        self.inner.starter.start_download(window, url)
    }

    /// Host adapter: a new download began in this session.
    pub fn notify_will_download(&self, item: &DownloadItem, window: &Window) {
        tracing::info!(
            session_id = %self.inner.id,
            item_id = %item.id(),
            filename = %item.suggested_filename(),
            "Download starting"
        );

        for (_, listener) in self.snapshot_listeners() {
            listener.will_download(self, item, window);
        }
    }

    /// Host adapter: received-byte count changed for an in-flight item.
    pub fn notify_progress(&self, item: &DownloadItem) {
        for (_, listener) in self.snapshot_listeners() {
            listener.download_updated(self, item);
        }
    }

    /// Host adapter: the download reached a terminal state. Duplicate
    /// terminal reports for the same item are dropped.
    pub fn notify_done(&self, item: &DownloadItem, state: FinishState) {
        if !item.finish(state) {
            tracing::warn!(
                session_id = %self.inner.id,
                item_id = %item.id(),
                "Ignoring duplicate terminal state"
            );
            return;
        }

        tracing::info!(
            session_id = %self.inner.id,
            item_id = %item.id(),
            state = ?state,
            "Download finished"
        );

        for (_, listener) in self.snapshot_listeners() {
            listener.download_done(self, item, state);
        }
    }

    // Snapshot so listeners can detach themselves mid-dispatch without
    // holding the lock across callbacks.
    fn snapshot_listeners(&self) -> Vec<(ListenerId, Arc<dyn SessionListener>)> {
        self.inner.listeners.read().clone()
    }
}

impl fmt::Debug for DownloadSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadSession")
            .field("id", &self.inner.id)
            .field("listeners", &self.listener_count())
            .finish()
    }
}
