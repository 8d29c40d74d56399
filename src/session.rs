//! In-memory session store
//!
//! One `ReportForm` per session, behind an async mutex so edits to the same
//! session apply one at a time. Sessions end on explicit discard or after
//! sitting idle for the configured time; nothing is written anywhere.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;

use crate::form::{ReportForm, ReportMonth};

pub type SharedForm = Arc<Mutex<ReportForm>>;

#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<String, SharedForm>,
}

impl SessionStore {
    pub fn new(capacity: u64, time_to_idle: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(capacity)
            .time_to_idle(time_to_idle)
            .build();
        Self { sessions }
    }

    /// Start a session with an empty form for `month`. Returns its id.
    pub async fn create(&self, month: ReportMonth) -> String {
        let id = new_session_id();
        self.sessions
            .insert(id.clone(), Arc::new(Mutex::new(ReportForm::new(month))))
            .await;
        tracing::debug!("Created session {}", id);
        id
    }

    pub async fn get(&self, id: &str) -> Option<SharedForm> {
        self.sessions.get(id).await
    }

    /// End a session. Returns false if it did not exist (or had expired).
    pub async fn discard(&self, id: &str) -> bool {
        let existed = self.sessions.remove(id).await.is_some();
        if existed {
            tracing::debug!("Discarded session {}", id);
        }
        existed
    }
}

/// 128 random bits as lowercase hex.
fn new_session_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(100, Duration::from_secs(60))
    }

    #[test]
    fn test_session_ids() {
        let a = new_session_id();
        let b = new_session_id();

        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_create_and_edit() {
        let store = store();
        let month = ReportMonth::new(2026, 10).unwrap();
        let id = store.create(month).await;

        let form = store.get(&id).await.expect("session exists");
        form.lock().await.set_officer_name("Grace Phiri");

        let again = store.get(&id).await.expect("session exists");
        let form = again.lock().await;
        assert_eq!(form.officer_name, "Grace Phiri");
        assert_eq!(form.report_month, month);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = store();
        let month = ReportMonth::new(2026, 10).unwrap();
        let first = store.create(month).await;
        let second = store.create(month).await;

        store
            .get(&first)
            .await
            .unwrap()
            .lock()
            .await
            .set_officer_name("A");

        let other = store.get(&second).await.unwrap();
        assert_eq!(other.lock().await.officer_name, "");
    }

    #[tokio::test]
    async fn test_discard() {
        let store = store();
        let id = store.create(ReportMonth::new(2026, 10).unwrap()).await;

        assert!(store.discard(&id).await);
        assert!(store.get(&id).await.is_none());
        assert!(!store.discard(&id).await);
    }
}
