use casgate_core::{ServiceTicket, SessionId, SessionStore, SessionStoreError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EndSessionError {
    #[error("Session store error: {0}")]
    StoreError(#[from] SessionStoreError),
}

/// Logs a host session out, either on the user's request or on CAS's
/// back-channel single logout notice.
pub struct EndSessionUseCase<S> {
    session_store: S,
}

impl<S> EndSessionUseCase<S>
where
    S: SessionStore,
{
    pub fn new(session_store: S) -> Self {
        Self { session_store }
    }

    #[tracing::instrument(name = "EndSessionUseCase::execute", skip_all, fields(session_id = %session_id))]
    pub async fn execute(&self, session_id: &SessionId) -> Result<(), EndSessionError> {
        self.session_store.set_current_user(session_id, None).await?;
        self.session_store.clear_cas_assertion(session_id).await?;

        tracing::info!("Session logged out");
        Ok(())
    }

    /// End the session that `ticket` logged in.
    ///
    /// Returns the session that was ended, `None` when the ticket is unknown
    /// or was already used for a logout.
    #[tracing::instrument(name = "EndSessionUseCase::single_logout", skip_all)]
    pub async fn single_logout(
        &self,
        ticket: &ServiceTicket,
    ) -> Result<Option<SessionId>, EndSessionError> {
        let Some(session_id) = self.session_store.take_ticket_session(ticket).await? else {
            tracing::debug!("Single logout for unknown ticket ignored");
            return Ok(None);
        };

        self.execute(&session_id).await?;
        Ok(Some(session_id))
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Arc};

    use casgate_core::{CasAssertion, Identity, SessionState};
    use secrecy::ExposeSecret;
    use tokio::sync::RwLock;

    use super::*;

    #[derive(Clone, Default)]
    struct MockSessionStore {
        sessions: Arc<RwLock<HashMap<SessionId, SessionState>>>,
        tickets: Arc<RwLock<HashMap<String, SessionId>>>,
        fail: bool,
    }

    impl MockSessionStore {
        fn check(&self) -> Result<(), SessionStoreError> {
            if self.fail {
                return Err(SessionStoreError::DatabaseError("down".to_owned()));
            }
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl SessionStore for MockSessionStore {
        async fn load(&self, session_id: &SessionId) -> Result<SessionState, SessionStoreError> {
            self.check()?;
            Ok(self
                .sessions
                .read()
                .await
                .get(session_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn set_current_user(
            &self,
            session_id: &SessionId,
            user: Option<Identity>,
        ) -> Result<(), SessionStoreError> {
            self.check()?;
            let mut sessions = self.sessions.write().await;
            sessions.entry(session_id.clone()).or_default().current_user = user;
            Ok(())
        }

        async fn set_cas_assertion(
            &self,
            session_id: &SessionId,
            assertion: Option<CasAssertion>,
        ) -> Result<(), SessionStoreError> {
            self.check()?;
            let mut sessions = self.sessions.write().await;
            sessions.entry(session_id.clone()).or_default().cas_assertion = assertion;
            Ok(())
        }

        async fn bind_ticket(
            &self,
            ticket: &ServiceTicket,
            session_id: &SessionId,
        ) -> Result<(), SessionStoreError> {
            self.check()?;
            self.tickets
                .write()
                .await
                .insert(ticket.as_ref().expose_secret().clone(), session_id.clone());
            Ok(())
        }

        async fn take_ticket_session(
            &self,
            ticket: &ServiceTicket,
        ) -> Result<Option<SessionId>, SessionStoreError> {
            self.check()?;
            Ok(self
                .tickets
                .write()
                .await
                .remove(ticket.as_ref().expose_secret()))
        }
    }

    async fn logged_in(store: &MockSessionStore, ticket: &ServiceTicket) -> SessionId {
        let session_id = SessionId::new();
        store
            .set_current_user(&session_id, Some(Identity::new("jdoe").unwrap()))
            .await
            .unwrap();
        store
            .set_cas_assertion(&session_id, Some(CasAssertion::new("assertion")))
            .await
            .unwrap();
        store.bind_ticket(ticket, &session_id).await.unwrap();
        session_id
    }

    #[tokio::test]
    async fn test_execute_clears_user_and_assertion() {
        let store = MockSessionStore::default();
        let ticket = ServiceTicket::parse("ST-1-abc").unwrap();
        let session_id = logged_in(&store, &ticket).await;

        EndSessionUseCase::new(store.clone())
            .execute(&session_id)
            .await
            .unwrap();

        assert_eq!(store.load(&session_id).await.unwrap(), SessionState::default());
    }

    #[tokio::test]
    async fn test_single_logout_ends_bound_session_once() {
        let store = MockSessionStore::default();
        let ticket = ServiceTicket::parse("ST-1-abc").unwrap();
        let session_id = logged_in(&store, &ticket).await;
        let use_case = EndSessionUseCase::new(store.clone());

        assert_eq!(
            use_case.single_logout(&ticket).await.unwrap(),
            Some(session_id.clone())
        );
        assert!(!store.load(&session_id).await.unwrap().is_authenticated());
        assert_eq!(use_case.single_logout(&ticket).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let store = MockSessionStore {
            fail: true,
            ..Default::default()
        };

        let result = EndSessionUseCase::new(store).execute(&SessionId::new()).await;

        assert_eq!(
            result,
            Err(EndSessionError::StoreError(SessionStoreError::DatabaseError(
                String::new()
            )))
        );
    }
}
