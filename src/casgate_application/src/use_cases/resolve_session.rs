use casgate_core::{
    AuthenticationError, Authenticator, CasCredentials, CasRequest, Destination,
    DestinationResolver, Identity, ServiceTicket, SessionId, SessionStore, TICKET_PARAMETER,
};

/// How a resolution ended for the session.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    Authenticated(Identity),
    /// `fault` is set when the collaborator failed rather than the ticket.
    Anonymous { fault: bool },
}

/// Result of a CAS return trip: the session outcome and where to send the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResolution {
    pub outcome: ResolutionOutcome,
    /// The session the browser carries from now on. Successful
    /// authentication always moves the user to a freshly minted id.
    pub session_id: SessionId,
    pub redirect_to: Destination,
}

/// Completes the CAS round-trip when the browser comes back with a ticket.
///
/// Never fails: every authentication problem ends in an anonymous session and
/// every call ends in a redirect. The CAS assertion held in the session is
/// cleared on every path. The presented session id is never promoted to an
/// authenticated one; a login lands on a new id and the old one is emptied.
pub struct SessionResolver<A, S, D> {
    authenticator: A,
    session_store: S,
    destinations: D,
    service_url: String,
    default_landing: Destination,
}

impl<A, S, D> SessionResolver<A, S, D>
where
    A: Authenticator + Clone + 'static,
    S: SessionStore,
    D: DestinationResolver,
{
    pub fn new(
        authenticator: A,
        session_store: S,
        destinations: D,
        service_url: impl Into<String>,
        default_landing: Destination,
    ) -> Self {
        Self {
            authenticator,
            session_store,
            destinations,
            service_url: service_url.into(),
            default_landing,
        }
    }

    /// Execute the resolution for the session identified by `session_id`
    ///
    /// # Arguments
    /// * `session_id` - The host session the browser is bound to
    /// * `request` - The inbound redirect from CAS
    ///
    /// # Returns
    /// The session outcome and the redirect target
    #[tracing::instrument(
        name = "SessionResolver::execute",
        skip_all,
        fields(session_id = %session_id)
    )]
    pub async fn execute<R>(&self, session_id: &SessionId, request: &R) -> SessionResolution
    where
        R: CasRequest + Sync,
    {
        let destination = self.destinations.resolve_original_destination(request);
        let credentials = CasCredentials {
            ticket: extract_ticket(request),
            service_url: self.service_url.clone(),
        };
        let ticket = credentials.ticket.clone();

        let (outcome, session_id) = match self.authenticate(credentials).await {
            Ok(identity) => {
                self.install_identity(session_id, identity, ticket.as_ref())
                    .await
            }
            Err(error) => (
                self.reset_identity(session_id, &error).await,
                session_id.clone(),
            ),
        };

        self.clear_assertion(&session_id).await;

        let redirect_to = destination.unwrap_or_else(|| self.default_landing.clone());
        tracing::debug!(redirect_to = %redirect_to, "Resuming navigation");

        SessionResolution {
            outcome,
            session_id,
            redirect_to,
        }
    }

    /// Run the collaborator in its own task so a panic inside it is contained
    /// like any other fault.
    async fn authenticate(
        &self,
        credentials: CasCredentials,
    ) -> Result<Identity, AuthenticationError> {
        let authenticator = self.authenticator.clone();

        tokio::spawn(async move { authenticator.authenticate(credentials).await })
            .await
            .unwrap_or_else(|join_error| {
                Err(AuthenticationError::Fault(format!(
                    "authentication task did not complete: {join_error}"
                )))
            })
    }

    /// Log `identity` in on a fresh session and empty the presented one.
    async fn install_identity(
        &self,
        presented: &SessionId,
        identity: Identity,
        ticket: Option<&ServiceTicket>,
    ) -> (ResolutionOutcome, SessionId) {
        let rotated = SessionId::new();

        if let Err(e) = self
            .session_store
            .set_current_user(&rotated, Some(identity.clone()))
            .await
        {
            tracing::error!(error = %e, login = identity.login(), "Failed to store authenticated user");
            self.clear_user(presented).await;
            return (ResolutionOutcome::Anonymous { fault: true }, presented.clone());
        }

        if let Some(ticket) = ticket {
            if let Err(e) = self.session_store.bind_ticket(ticket, &rotated).await {
                tracing::warn!(error = %e, "Ticket not recorded; single logout will not reach this session");
            }
        }

        self.clear_user(presented).await;
        self.clear_assertion(presented).await;

        tracing::info!(login = identity.login(), "CAS authentication succeeded");
        (ResolutionOutcome::Authenticated(identity), rotated)
    }

    async fn clear_user(&self, session_id: &SessionId) {
        if let Err(e) = self.session_store.set_current_user(session_id, None).await {
            tracing::error!(error = %e, "Failed to reset session user");
        }
    }

    async fn clear_assertion(&self, session_id: &SessionId) {
        if let Err(e) = self.session_store.clear_cas_assertion(session_id).await {
            tracing::error!(error = %e, "Failed to clear CAS assertion from session");
        }
    }

    async fn reset_identity(
        &self,
        session_id: &SessionId,
        error: &AuthenticationError,
    ) -> ResolutionOutcome {
        if error.is_fault() {
            tracing::error!(error = %error, "CAS authentication fault, session reset to anonymous");
        } else {
            tracing::warn!(error = %error, "CAS authentication failed, session reset to anonymous");
        }

        self.clear_user(session_id).await;

        ResolutionOutcome::Anonymous {
            fault: error.is_fault(),
        }
    }
}

fn extract_ticket<R: CasRequest>(request: &R) -> Option<ServiceTicket> {
    let raw = request.query_param(TICKET_PARAMETER)?;
    match ServiceTicket::parse(&raw) {
        Ok(ticket) => Some(ticket),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring unusable ticket parameter");
            None
        }
    }
}
