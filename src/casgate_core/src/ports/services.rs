use async_trait::async_trait;
use thiserror::Error;

use crate::{
    domain::{destination::Destination, identity::Identity, ticket::ServiceTicket},
    http_abstraction::CasRequest,
};

/// What the authentication collaborator gets to work with.
#[derive(Debug, Clone)]
pub struct CasCredentials {
    /// `None` when the request carried no usable `ticket` parameter.
    pub ticket: Option<ServiceTicket>,
    /// The service URL the ticket was issued for.
    pub service_url: String,
}

#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("No service ticket presented")]
    MissingTicket,
    #[error("Ticket rejected by CAS ({code}): {message}")]
    Rejected { code: String, message: String },
    #[error("Authentication collaborator failed: {0}")]
    Fault(String),
}

impl AuthenticationError {
    /// Faults are operational problems (CAS unreachable, garbage response, a
    /// crashing collaborator) rather than a verdict on the ticket.
    pub fn is_fault(&self) -> bool {
        matches!(self, AuthenticationError::Fault(_))
    }
}

impl PartialEq for AuthenticationError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingTicket, Self::MissingTicket) => true,
            (Self::Rejected { code: a, .. }, Self::Rejected { code: b, .. }) => a == b,
            (Self::Fault(_), Self::Fault(_)) => true,
            _ => false,
        }
    }
}

/// The host's authentication stack, seen from this crate: credentials in,
/// identity or failure out.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: CasCredentials)
    -> Result<Identity, AuthenticationError>;
}

/// Recovers the URL the user asked for before being sent to CAS.
pub trait DestinationResolver: Send + Sync {
    fn resolve_original_destination<R: CasRequest>(&self, request: &R) -> Option<Destination>;
}
