//! Registry of open form sessions

use super::FormSession;
use crate::forms::FormKind;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<FormSession>>>>,
    cooldown_seconds: u64,
}

impl SessionStore {
    pub fn new(cooldown_seconds: u64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            cooldown_seconds,
        }
    }

    pub fn create(&self, kind: FormKind) -> Arc<FormSession> {
        let session = Arc::new(FormSession::new(kind, self.cooldown_seconds));
        self.sessions.write().insert(session.id(), Arc::clone(&session));
        debug!(session_id = %session.id(), form = %kind, "Opened form session");
        session
    }

    pub fn get(&self, id: &Uuid) -> Option<Arc<FormSession>> {
        self.sessions.read().get(id).cloned()
    }

    /// Tears the session down; its cooldown ticker stops immediately.
    pub fn remove(&self, id: &Uuid) -> bool {
        match self.sessions.write().remove(id) {
            Some(session) => {
                session.close();
                debug!(session_id = %id, "Closed form session");
                true
            }
            None => false,
        }
    }

    /// Drops sessions idle for longer than `ttl`. Sessions with a delivery
    /// in flight are kept.
    pub fn purge_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();

        sessions.retain(|_, session| {
            let keep = session.is_in_flight() || session.idle_for() <= ttl;
            if !keep {
                session.close();
            }
            keep
        });

        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    pub fn spawn_sweeper(&self, every: Duration, ttl: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let purged = store.purge_idle(ttl);
                if purged > 0 {
                    info!(purged, remaining = store.len(), "Purged idle form sessions");
                }
            }
        })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(super::DEFAULT_COOLDOWN_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_get_remove() {
        let store = SessionStore::default();
        let session = store.create(FormKind::Contact);

        assert_eq!(store.len(), 1);
        let found = store.get(&session.id()).unwrap();
        assert_eq!(found.kind(), FormKind::Contact);

        assert!(store.remove(&session.id()));
        assert!(!store.remove(&session.id()));
        assert!(store.get(&session.id()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = SessionStore::default();
        let a = store.create(FormKind::Contact);
        let b = store.create(FormKind::Contact);

        a.set_field("name", "Ann");
        assert_eq!(b.fields().get("name"), "");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_purge_idle() {
        let store = SessionStore::default();
        store.create(FormKind::Contact);
        store.create(FormKind::ProjectRequest);

        assert_eq!(store.purge_idle(Duration::from_secs(60)), 0);
        assert_eq!(store.len(), 2);

        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(store.purge_idle(Duration::from_millis(5)), 2);
        assert!(store.is_empty());
    }

    struct FailingNotifier;

    #[async_trait::async_trait]
    impl crate::delivery::Notifier for FailingNotifier {
        async fn deliver(&self, _text: &str) -> Result<(), crate::delivery::DeliveryError> {
            Err(crate::delivery::DeliveryError::Rejected(502))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_removed_session_stops_counting_down() {
        let store = SessionStore::default();
        let session = store.create(FormKind::Contact);
        session.edit(crate::forms::SubmissionForm::from_pairs([
            ("name", "Jane"),
            ("email", "a@b.com"),
            ("subject", "Hi"),
            ("message", "Hello there"),
        ]));

        session.submit(&FailingNotifier).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(session.cooldown_remaining(), 9);

        assert!(store.remove(&session.id()));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(session.cooldown_remaining(), 9);
    }
}
