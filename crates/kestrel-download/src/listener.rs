//! Session listener wiring host download events to save paths, progress
//! mirroring and completion results.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use kestrel_host::{
    DownloadItem, DownloadSession, FinishState, ListenerId, SessionListener, Shell, Window,
};

use crate::download::DownloadResult;
use crate::options::DownloadOptions;
use crate::resolve::{default_download_dir, resolve_save_path};

/// Invoked with the tagged result when a bound download finishes.
pub type DoneCallback = Box<dyn Fn(DownloadResult) + Send + Sync>;

struct Binding {
    /// Original suggested filename, used for message interpolation
    file_name: String,
    save_path: PathBuf,
    window: Window,
}

/// The download listener: binds every download that starts in its session,
/// assigns the save path, mirrors progress and reports the outcome.
pub struct DownloadListener {
    options: DownloadOptions,
    shell: Arc<dyn Shell>,
    on_done: Option<DoneCallback>,
    bindings: RwLock<HashMap<Uuid, Binding>>,
    /// Guards the one-shot callback when `unregister_when_done` is set
    settled: AtomicBool,
    id: Mutex<Option<ListenerId>>,
}

impl DownloadListener {
    /// Build a listener from `options` and attach it to `session`.
    pub fn attach(
        session: &DownloadSession,
        shell: Arc<dyn Shell>,
        options: DownloadOptions,
        on_done: Option<DoneCallback>,
    ) -> ListenerId {
        let listener = Arc::new(Self {
            options,
            shell,
            on_done,
            bindings: RwLock::new(HashMap::new()),
            settled: AtomicBool::new(false),
            id: Mutex::new(None),
        });

        let id = session.attach(listener.clone());
        *listener.id.lock() = Some(id);
        id
    }
}

impl SessionListener for DownloadListener {
    fn will_download(&self, _session: &DownloadSession, item: &DownloadItem, window: &Window) {
        let directory = self
            .options
            .directory
            .clone()
            .unwrap_or_else(default_download_dir);

        let save_path = resolve_save_path(
            &directory,
            self.options.filename.as_deref(),
            item.suggested_filename(),
            item.mime_type(),
        );

        if !self.options.save_as {
            item.set_save_path(&save_path);
        }

        tracing::info!(
            item_id = %item.id(),
            path = %save_path.display(),
            save_as = self.options.save_as,
            "Bound download"
        );

        self.bindings.write().insert(
            item.id(),
            Binding {
                file_name: item.suggested_filename().to_string(),
                save_path,
                window: window.clone(),
            },
        );
    }

    fn download_updated(&self, _session: &DownloadSession, item: &DownloadItem) {
        let window = {
            let bindings = self.bindings.read();
            let Some(binding) = bindings.get(&item.id()) else {
                return;
            };
            binding.window.clone()
        };

        let ratio = item.ratio();
        if !window.is_destroyed() {
            window.set_progress_bar(ratio);
        }

        if let Some(observer) = &self.options.observer {
            observer.on_progress(ratio);
            if observer.should_cancel() {
                item.cancel();
            }
        }
    }

    fn download_done(&self, session: &DownloadSession, item: &DownloadItem, state: FinishState) {
        let Some(binding) = self.bindings.write().remove(&item.id()) else {
            return;
        };

        if !binding.window.is_destroyed() {
            binding.window.clear_progress_bar();
        }

        let result = match state {
            FinishState::Completed => {
                // With save_as the host dialog picked the path; prefer what
                // the item actually recorded.
                let path = item.save_path().unwrap_or(binding.save_path);
                self.shell.download_finished(&path);
                if self.options.open_folder_when_done {
                    self.shell.reveal_in_folder(&path);
                }
                DownloadResult::Completed(item.clone())
            }
            FinishState::Interrupted => {
                DownloadResult::Interrupted(self.options.messages.interrupted(&binding.file_name))
            }
            FinishState::Cancelled => {
                DownloadResult::Cancelled(self.options.messages.canceled(&binding.file_name))
            }
        };

        if let Some(observer) = &self.options.observer {
            observer.on_complete(&result);
        }

        if let Some(on_done) = &self.on_done {
            if !self.options.unregister_when_done || !self.settled.swap(true, Ordering::SeqCst) {
                on_done(result);
            }
        }

        if self.options.unregister_when_done {
            if let Some(id) = *self.id.lock() {
                session.detach(id);
            }
        }
    }
}
