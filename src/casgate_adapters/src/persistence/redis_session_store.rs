use std::sync::Arc;

use casgate_core::{
    CasAssertion, Identity, ServiceTicket, SessionId, SessionState, SessionStore,
    SessionStoreError,
};
use redis::{Commands, Connection};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

/// Session store backed by Redis.
///
/// Every key expires after the session TTL, so abandoned sessions and
/// unused ticket bindings clean themselves up.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: Arc<RwLock<Connection>>,
    session_ttl: u64,
}

impl RedisSessionStore {
    pub fn new(conn: Arc<RwLock<Connection>>, session_ttl: u64) -> Self {
        Self { conn, session_ttl }
    }

    async fn put(&self, key: String, value: Option<String>) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.write().await;
        match value {
            Some(value) => conn.set_ex::<_, _, ()>(key, value, self.session_ttl),
            None => conn.del::<_, ()>(key),
        }
        .map_err(|e| SessionStoreError::DatabaseError(e.to_string()))
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, session_id: &SessionId) -> Result<SessionState, SessionStoreError> {
        let (user, assertion) = {
            let mut conn = self.conn.write().await;
            let user: Option<String> = conn
                .get(user_key(session_id))
                .map_err(|e| SessionStoreError::DatabaseError(e.to_string()))?;
            let assertion: Option<String> = conn
                .get(assertion_key(session_id))
                .map_err(|e| SessionStoreError::DatabaseError(e.to_string()))?;
            (user, assertion)
        };

        let current_user = user
            .map(|json| serde_json::from_str::<Identity>(&json))
            .transpose()
            .map_err(|e| SessionStoreError::CorruptRecord(e.to_string()))?;

        Ok(SessionState {
            current_user,
            cas_assertion: assertion.map(CasAssertion::new),
        })
    }

    async fn set_current_user(
        &self,
        session_id: &SessionId,
        user: Option<Identity>,
    ) -> Result<(), SessionStoreError> {
        let value = user
            .map(|user| serde_json::to_string(&user))
            .transpose()
            .map_err(|e| SessionStoreError::CorruptRecord(e.to_string()))?;

        self.put(user_key(session_id), value).await
    }

    async fn set_cas_assertion(
        &self,
        session_id: &SessionId,
        assertion: Option<CasAssertion>,
    ) -> Result<(), SessionStoreError> {
        let value = assertion.map(|a| a.as_ref().expose_secret().clone());
        self.put(assertion_key(session_id), value).await
    }

    async fn bind_ticket(
        &self,
        ticket: &ServiceTicket,
        session_id: &SessionId,
    ) -> Result<(), SessionStoreError> {
        self.put(ticket_key(ticket), Some(session_id.to_string()))
            .await
    }

    async fn take_ticket_session(
        &self,
        ticket: &ServiceTicket,
    ) -> Result<Option<SessionId>, SessionStoreError> {
        let raw: Option<String> = {
            let mut conn = self.conn.write().await;
            conn.get_del(ticket_key(ticket))
                .map_err(|e| SessionStoreError::DatabaseError(e.to_string()))?
        };

        raw.map(|id| SessionId::parse(&id))
            .transpose()
            .map_err(|e| SessionStoreError::CorruptRecord(e.to_string()))
    }
}

const SESSION_KEY_PREFIX: &str = "cas_session:";
const TICKET_KEY_PREFIX: &str = "cas_ticket:";

fn user_key(session_id: &SessionId) -> String {
    format!("{}{}:user", SESSION_KEY_PREFIX, session_id)
}

fn assertion_key(session_id: &SessionId) -> String {
    format!("{}{}:assertion", SESSION_KEY_PREFIX, session_id)
}

fn ticket_key(ticket: &ServiceTicket) -> String {
    format!("{}{}", TICKET_KEY_PREFIX, ticket.as_ref().expose_secret())
}
