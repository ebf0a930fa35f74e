//! Download item handle

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadState {
    /// Download in progress
    Progressing,
    /// Download completed successfully
    Completed,
    /// Download cancelled
    Cancelled,
    /// Download interrupted by the host runtime
    Interrupted,
}

impl DownloadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadState::Progressing => "progressing",
            DownloadState::Completed => "completed",
            DownloadState::Cancelled => "cancelled",
            DownloadState::Interrupted => "interrupted",
        }
    }
}

impl std::str::FromStr for DownloadState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "progressing" => Ok(DownloadState::Progressing),
            "completed" => Ok(DownloadState::Completed),
            "cancelled" => Ok(DownloadState::Cancelled),
            "interrupted" => Ok(DownloadState::Interrupted),
            _ => Err(format!("Unknown download state: {}", s)),
        }
    }
}

/// Terminal state reported by the host runtime's done event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishState {
    Completed,
    Cancelled,
    Interrupted,
}

impl From<FinishState> for DownloadState {
    fn from(state: FinishState) -> Self {
        match state {
            FinishState::Completed => DownloadState::Completed,
            FinishState::Cancelled => DownloadState::Cancelled,
            FinishState::Interrupted => DownloadState::Interrupted,
        }
    }
}

#[derive(Debug)]
struct ItemState {
    received_bytes: u64,
    state: DownloadState,
    save_path: Option<PathBuf>,
    cancel_requested: bool,
    completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct ItemInner {
    id: Uuid,
    url: Url,
    suggested_filename: String,
    mime_type: Option<String>,
    total_bytes: u64,
    created_at: DateTime<Utc>,
    state: RwLock<ItemState>,
}

/// Handle for one in-flight download, created by the host adapter when the
/// runtime reports a new download. Cloning shares the same underlying item.
#[derive(Debug, Clone)]
pub struct DownloadItem {
    inner: Arc<ItemInner>,
}

impl DownloadItem {
    pub fn new(
        url: Url,
        suggested_filename: impl Into<String>,
        mime_type: Option<String>,
        total_bytes: u64,
    ) -> Self {
        Self {
            inner: Arc::new(ItemInner {
                id: Uuid::new_v4(),
                url,
                suggested_filename: suggested_filename.into(),
                mime_type,
                total_bytes,
                created_at: Utc::now(),
                state: RwLock::new(ItemState {
                    received_bytes: 0,
                    state: DownloadState::Progressing,
                    save_path: None,
                    cancel_requested: false,
                    completed_at: None,
                }),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn url(&self) -> &Url {
        &self.inner.url
    }

    /// Filename suggested by the host runtime (Content-Disposition or URL)
    pub fn suggested_filename(&self) -> &str {
        &self.inner.suggested_filename
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.inner.mime_type.as_deref()
    }

    pub fn total_bytes(&self) -> u64 {
        self.inner.total_bytes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    pub fn received_bytes(&self) -> u64 {
        self.inner.state.read().received_bytes
    }

    pub fn state(&self) -> DownloadState {
        self.inner.state.read().state
    }

    pub fn save_path(&self) -> Option<PathBuf> {
        self.inner.state.read().save_path.clone()
    }

    /// Set where the host runtime writes the file. Must happen before the
    /// first progress event; the listener calls this once per item.
    pub fn set_save_path(&self, path: &Path) {
        self.inner.state.write().save_path = Some(path.to_path_buf());
    }

    /// Record bytes received so far (host adapter)
    pub fn record_progress(&self, received_bytes: u64) {
        self.inner.state.write().received_bytes = received_bytes;
    }

    /// Request cooperative cancellation. The host adapter polls
    /// [`is_cancel_requested`](Self::is_cancel_requested) and reports
    /// [`FinishState::Cancelled`] once it stops the transfer.
    pub fn cancel(&self) {
        self.inner.state.write().cancel_requested = true;
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.inner.state.read().cancel_requested
    }

    /// Get download progress as a ratio (0.0-1.0)
    pub fn ratio(&self) -> f64 {
        if self.inner.total_bytes == 0 {
            return 0.0;
        }
        (self.received_bytes() as f64 / self.inner.total_bytes as f64).min(1.0)
    }

    /// Record the terminal state. Returns false if the item already
    /// finished; the first terminal state wins.
    pub(crate) fn finish(&self, state: FinishState) -> bool {
        let mut guard = self.inner.state.write();
        if guard.state != DownloadState::Progressing {
            return false;
        }
        guard.state = state.into();
        guard.completed_at = Some(Utc::now());
        true
    }

    pub fn is_finished(&self) -> bool {
        self.state() != DownloadState::Progressing
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.inner.state.read().completed_at
    }

    /// Serializable projection for embedder UIs
    pub fn snapshot(&self) -> DownloadSnapshot {
        let guard = self.inner.state.read();
        DownloadSnapshot {
            id: self.inner.id.to_string(),
            url: self.inner.url.to_string(),
            file_name: self.inner.suggested_filename.clone(),
            mime_type: self.inner.mime_type.clone(),
            total_bytes: self.inner.total_bytes,
            received_bytes: guard.received_bytes,
            state: guard.state,
            save_path: guard
                .save_path
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            ratio: if self.inner.total_bytes == 0 {
                0.0
            } else {
                (guard.received_bytes as f64 / self.inner.total_bytes as f64).min(1.0)
            },
            created_at: self.inner.created_at.to_rfc3339(),
            completed_at: guard.completed_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadSnapshot {
    pub id: String,
    pub url: String,
    pub file_name: String,
    pub mime_type: Option<String>,
    pub total_bytes: u64,
    pub received_bytes: u64,
    pub state: DownloadState,
    pub save_path: Option<String>,
    pub ratio: f64,
    pub created_at: String,
    pub completed_at: Option<String>,
}
