//! Tagged download results and one-shot programmatic downloads

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::oneshot;
use url::Url;

use kestrel_host::{DownloadItem, DownloadSession, Shell, Window};

use crate::error::DownloadError;
use crate::listener::DownloadListener;
use crate::options::DownloadOptions;
use crate::Result;

/// Outcome of one download. Failure arms carry the rendered user-facing
/// message with the filename interpolated.
#[derive(Debug, Clone)]
pub enum DownloadResult {
    Completed(DownloadItem),
    Interrupted(String),
    Cancelled(String),
}

impl DownloadResult {
    pub fn is_completed(&self) -> bool {
        matches!(self, DownloadResult::Completed(_))
    }

    pub fn into_result(self) -> Result<DownloadItem> {
        match self {
            DownloadResult::Completed(item) => Ok(item),
            DownloadResult::Interrupted(message) => Err(DownloadError::Interrupted(message)),
            DownloadResult::Cancelled(message) => Err(DownloadError::Cancelled(message)),
        }
    }
}

/// Trigger a single download on `window` and wait for its outcome.
///
/// Attaches a one-shot listener (`unregister_when_done` is forced on), asks
/// the host runtime to fetch `url`, and resolves with the finished item or
/// the failure message.
///
/// Known limitation: the listener is scoped to the session, not to `url`.
/// If several downloads start concurrently on the same session, the future
/// may settle with a different item than the one requested here.
pub async fn download(
    session: &DownloadSession,
    window: &Window,
    shell: Arc<dyn Shell>,
    url: &Url,
    mut options: DownloadOptions,
) -> Result<DownloadItem> {
    options.unregister_when_done = true;

    let (tx, rx) = oneshot::channel();
    let tx = Mutex::new(Some(tx));
    let listener_id = DownloadListener::attach(
        session,
        shell,
        options,
        Some(Box::new(move |result| {
            if let Some(tx) = tx.lock().take() {
                let _ = tx.send(result);
            }
        })),
    );

    if let Err(e) = session.start_download(window, url) {
        session.detach(listener_id);
        return Err(e.into());
    }

    match rx.await {
        Ok(result) => result.into_result(),
        Err(_) => Err(DownloadError::ListenerDropped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_host::{DownloadStarter, FinishState, HostError, NullStarter};
    use std::sync::OnceLock;

    struct RecordingShell;

    impl Shell for RecordingShell {
        fn reveal_in_folder(&self, _path: &std::path::Path) {}
    }

    /// Starter that plays a scripted download back through the session,
    /// the way a host adapter would.
    struct ScriptedStarter {
        session: OnceLock<DownloadSession>,
        finish: FinishState,
    }

    impl ScriptedStarter {
        fn new(finish: FinishState) -> Arc<Self> {
            Arc::new(Self {
                session: OnceLock::new(),
                finish,
            })
        }
    }

    impl DownloadStarter for ScriptedStarter {
        fn start_download(&self, window: &Window, url: &Url) -> kestrel_host::Result<()> {
            let session = self.session.get().expect("session bound");
            let filename = url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .unwrap_or("download")
                .to_string();

            let item = DownloadItem::new(url.clone(), filename, None, 100);
            session.notify_will_download(&item, window);
            item.record_progress(100);
            session.notify_progress(&item);
            session.notify_done(&item, self.finish);
            Ok(())
        }
    }

    fn scripted_session(finish: FinishState) -> DownloadSession {
        let starter = ScriptedStarter::new(finish);
        let session = DownloadSession::new(starter.clone());
        starter.session.set(session.clone()).ok().unwrap();
        session
    }

    #[tokio::test]
    async fn test_download_resolves_with_item() {
        let dir = tempfile::tempdir().unwrap();
        let session = scripted_session(FinishState::Completed);
        let options = DownloadOptions {
            directory: Some(dir.path().to_path_buf()),
            ..Default::default()
        };

        let item = download(
            &session,
            &Window::new("main"),
            Arc::new(RecordingShell),
            &Url::parse("https://example.com/data.json").unwrap(),
            options,
        )
        .await
        .unwrap();

        assert_eq!(item.save_path(), Some(dir.path().join("data.json")));
        assert_eq!(item.received_bytes(), 100);
        assert!(item.is_finished());
        assert_eq!(session.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_download_rejects_with_rendered_message() {
        let dir = tempfile::tempdir().unwrap();
        let session = scripted_session(FinishState::Interrupted);
        let options = DownloadOptions {
            directory: Some(dir.path().to_path_buf()),
            ..Default::default()
        };

        let error = download(
            &session,
            &Window::new("main"),
            Arc::new(RecordingShell),
            &Url::parse("https://example.com/data.json").unwrap(),
            options,
        )
        .await
        .unwrap_err();

        match error {
            DownloadError::Interrupted(message) => {
                assert_eq!(message, "The download of data.json was interrupted");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(session.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_download_cancelled_rejects() {
        let session = scripted_session(FinishState::Cancelled);
        let options = DownloadOptions {
            directory: Some(std::env::temp_dir()),
            ..Default::default()
        };

        let error = download(
            &session,
            &Window::new("main"),
            Arc::new(RecordingShell),
            &Url::parse("https://example.com/video.mp4").unwrap(),
            options,
        )
        .await
        .unwrap_err();

        assert!(matches!(error, DownloadError::Cancelled(_)));
    }

    #[tokio::test]
    async fn test_start_failure_detaches_listener() {
        let session = DownloadSession::new(Arc::new(NullStarter));

        let error = download(
            &session,
            &Window::new("main"),
            Arc::new(RecordingShell),
            &Url::parse("https://example.com/data.json").unwrap(),
            DownloadOptions::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            error,
            DownloadError::Host(HostError::StartUnsupported)
        ));
        assert_eq!(session.listener_count(), 0);
    }
}
