pub mod client;
pub mod domain;
pub mod http_abstraction;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    destination::{Destination, DestinationError},
    identity::{Identity, IdentityError},
    lookup::{HostLayout, LookupChain, LookupChainError, LookupMiss, LookupStep},
    session::{CasAssertion, SessionId, SessionIdError, SessionState},
    ticket::{ServiceTicket, TICKET_PARAMETER, TicketError},
};

pub use ports::{
    repositories::{SessionStore, SessionStoreError},
    services::{AuthenticationError, Authenticator, CasCredentials, DestinationResolver},
};

pub use client::{ActivationEvent, ClickListener, Navigator, PageDom};

pub use http_abstraction::{CasRequest, RedirectResponseBuilder, RedirectResponseHelpers};
