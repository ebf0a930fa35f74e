//! Download manager: application-owned registry of sessions

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use kestrel_host::{DownloadSession, ListenerId, Shell};

use crate::listener::DownloadListener;
use crate::options::DownloadOptions;

/// Owns the default download behavior for the whole application. The shell
/// registers every session it creates; the manager attaches a listener
/// built from the default options to each.
pub struct DownloadManager {
    shell: Arc<dyn Shell>,
    defaults: DownloadOptions,
    sessions: RwLock<HashMap<Uuid, ListenerId>>,
}

impl DownloadManager {
    pub fn new(shell: Arc<dyn Shell>, defaults: DownloadOptions) -> Self {
        Self {
            shell,
            defaults,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Attach the default listener to a newly created session. Registering
    /// a session twice is a no-op.
    pub fn register_session(&self, session: &DownloadSession) {
        let mut sessions = self.sessions.write();
        if sessions.contains_key(&session.id()) {
            tracing::warn!(session_id = %session.id(), "Session already registered");
            return;
        }

        let id = DownloadListener::attach(session, self.shell.clone(), self.defaults.clone(), None);
        sessions.insert(session.id(), id);

        tracing::info!(session_id = %session.id(), "Registered session");
    }

    /// Detach the manager's listener from a session. Returns false if the
    /// session was not registered.
    pub fn unregister_session(&self, session: &DownloadSession) -> bool {
        let Some(id) = self.sessions.write().remove(&session.id()) else {
            return false;
        };
        session.detach(id);

        tracing::info!(session_id = %session.id(), "Unregistered session");
        true
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_host::{NullStarter, SystemShell};

    fn manager() -> DownloadManager {
        DownloadManager::new(Arc::new(SystemShell), DownloadOptions::default())
    }

    fn session() -> DownloadSession {
        DownloadSession::new(Arc::new(NullStarter))
    }

    #[test]
    fn test_register_attaches_listener() {
        let manager = manager();
        let session = session();

        manager.register_session(&session);
        assert_eq!(session.listener_count(), 1);
        assert_eq!(manager.session_count(), 1);
    }

    #[test]
    fn test_register_is_idempotent_per_session() {
        let manager = manager();
        let session = session();

        manager.register_session(&session);
        manager.register_session(&session);
        assert_eq!(session.listener_count(), 1);
        assert_eq!(manager.session_count(), 1);
    }

    #[test]
    fn test_unregister_detaches_listener() {
        let manager = manager();
        let session = session();
        manager.register_session(&session);

        assert!(manager.unregister_session(&session));
        assert_eq!(session.listener_count(), 0);
        assert_eq!(manager.session_count(), 0);

        assert!(!manager.unregister_session(&session));
    }
}
