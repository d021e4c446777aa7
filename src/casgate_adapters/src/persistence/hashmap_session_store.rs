use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use casgate_core::{
    CasAssertion, Identity, ServiceTicket, SessionId, SessionState, SessionStore,
    SessionStoreError,
};
use secrecy::ExposeSecret;
use tokio::{sync::RwLock, time::Instant};

const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(8 * 60 * 60);

struct Entry<T> {
    value: T,
    expires_at: Instant,
}

impl<T> Entry<T> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// In-process session store.
///
/// Sessions and ticket bindings expire `ttl` after their last write. Expired
/// entries read as absent and are swept on every write.
#[derive(Clone)]
pub struct HashMapSessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Entry<SessionState>>>>,
    tickets: Arc<RwLock<HashMap<String, Entry<SessionId>>>>,
    ttl: Duration,
}

impl Default for HashMapSessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl HashMapSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            tickets: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    async fn update_session(&self, session_id: &SessionId, apply: impl FnOnce(&mut SessionState)) {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, entry| entry.is_live(now));

        let mut state = sessions
            .remove(session_id)
            .map(|entry| entry.value)
            .unwrap_or_default();
        apply(&mut state);

        if state != SessionState::default() {
            sessions.insert(
                session_id.clone(),
                Entry {
                    value: state,
                    expires_at: now + self.ttl,
                },
            );
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for HashMapSessionStore {
    async fn load(&self, session_id: &SessionId) -> Result<SessionState, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(session_id)
            .filter(|entry| entry.is_live(Instant::now()))
            .map(|entry| entry.value.clone())
            .unwrap_or_default())
    }

    async fn set_current_user(
        &self,
        session_id: &SessionId,
        user: Option<Identity>,
    ) -> Result<(), SessionStoreError> {
        self.update_session(session_id, |state| state.current_user = user)
            .await;
        Ok(())
    }

    async fn set_cas_assertion(
        &self,
        session_id: &SessionId,
        assertion: Option<CasAssertion>,
    ) -> Result<(), SessionStoreError> {
        self.update_session(session_id, |state| state.cas_assertion = assertion)
            .await;
        Ok(())
    }

    async fn bind_ticket(
        &self,
        ticket: &ServiceTicket,
        session_id: &SessionId,
    ) -> Result<(), SessionStoreError> {
        let now = Instant::now();
        let mut tickets = self.tickets.write().await;
        tickets.retain(|_, entry| entry.is_live(now));
        tickets.insert(
            ticket.as_ref().expose_secret().clone(),
            Entry {
                value: session_id.clone(),
                expires_at: now + self.ttl,
            },
        );
        Ok(())
    }

    async fn take_ticket_session(
        &self,
        ticket: &ServiceTicket,
    ) -> Result<Option<SessionId>, SessionStoreError> {
        let mut tickets = self.tickets.write().await;
        Ok(tickets
            .remove(ticket.as_ref().expose_secret())
            .filter(|entry| entry.is_live(Instant::now()))
            .map(|entry| entry.value))
    }
}
