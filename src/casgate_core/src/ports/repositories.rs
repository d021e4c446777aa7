use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    identity::Identity,
    session::{CasAssertion, SessionId, SessionState},
    ticket::ServiceTicket,
};

// SessionStore port trait and errors
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Corrupt session record: {0}")]
    CorruptRecord(String),
}

impl PartialEq for SessionStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::DatabaseError(_), Self::DatabaseError(_))
                | (Self::CorruptRecord(_), Self::CorruptRecord(_))
        )
    }
}

/// Host session storage, keyed by session id.
///
/// Unknown session ids read as an anonymous [`SessionState`]. Writes to the
/// same id from concurrent requests are last-writer-wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, session_id: &SessionId) -> Result<SessionState, SessionStoreError>;

    async fn set_current_user(
        &self,
        session_id: &SessionId,
        user: Option<Identity>,
    ) -> Result<(), SessionStoreError>;

    async fn set_cas_assertion(
        &self,
        session_id: &SessionId,
        assertion: Option<CasAssertion>,
    ) -> Result<(), SessionStoreError>;

    async fn clear_cas_assertion(&self, session_id: &SessionId) -> Result<(), SessionStoreError> {
        self.set_cas_assertion(session_id, None).await
    }

    /// Remember which session a validated ticket logged in, for CAS single logout.
    async fn bind_ticket(
        &self,
        ticket: &ServiceTicket,
        session_id: &SessionId,
    ) -> Result<(), SessionStoreError>;

    /// Remove and return the session bound to `ticket`, if any.
    async fn take_ticket_session(
        &self,
        ticket: &ServiceTicket,
    ) -> Result<Option<SessionId>, SessionStoreError>;
}
