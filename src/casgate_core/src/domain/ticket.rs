use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

/// Query parameter CAS uses to hand the service ticket back to the service.
pub const TICKET_PARAMETER: &str = "ticket";

const MAX_TICKET_LENGTH: usize = 256;

#[derive(Debug, Error, PartialEq)]
pub enum TicketError {
    #[error("Ticket is empty")]
    Empty,
    #[error("Ticket is longer than 256 characters")]
    TooLong,
    #[error("Ticket contains whitespace or control characters")]
    InvalidCharacters,
}

/// A CAS service (`ST-`) or proxy (`PT-`) ticket.
///
/// Tickets are single-use bearer credentials, so the value is kept behind
/// [`Secret`] and never shows up in `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct ServiceTicket(Secret<String>);

impl ServiceTicket {
    pub fn parse(raw: &str) -> Result<Self, TicketError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TicketError::Empty);
        }
        if raw.chars().count() > MAX_TICKET_LENGTH {
            return Err(TicketError::TooLong);
        }
        if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TicketError::InvalidCharacters);
        }

        Ok(Self(Secret::new(raw.to_owned())))
    }

    /// True for proxy tickets, which CAS issues with the `PT-` prefix.
    pub fn is_proxy_ticket(&self) -> bool {
        self.0.expose_secret().starts_with("PT-")
    }
}

impl AsRef<Secret<String>> for ServiceTicket {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for ServiceTicket {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}
