//! # casgate - CAS single sign-on for host web applications
//!
//! This is a facade crate that re-exports all public APIs from the casgate components.
//! Use this crate to get access to all CAS integration functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! casgate = { path = "../casgate" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `ServiceTicket`, `SessionId`, `Identity`, `LookupChain`, etc.
//! - **Ports**: `SessionStore`, `Authenticator`, `DestinationResolver`, `PageDom`
//! - **Use cases**: `SessionResolver`, `MenuRebinder`, `LogoutRedirector`, `EndSessionUseCase`
//! - **Adapters**: `CasTicketValidator`, `RedisSessionStore`, `LogoutScript`, etc.
//! - **Service**: `CasService` - The main entry point for serving the CAS routes

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use casgate_core::*;
}

// Re-export most commonly used core types at the root level
pub use casgate_core::{
    CasAssertion, Destination, HostLayout, Identity, LookupChain, LookupStep, ServiceTicket,
    SessionId, SessionState,
};

// ============================================================================
// Ports
// ============================================================================

/// Collaborator trait definitions
pub mod ports {
    pub use casgate_core::{
        ActivationEvent, AuthenticationError, Authenticator, CasCredentials, CasRequest,
        ClickListener, DestinationResolver, Navigator, PageDom, RedirectResponseBuilder,
        SessionStore, SessionStoreError,
    };
}

// Re-export collaborator traits at root level
pub use ports::{Authenticator, DestinationResolver, Navigator, PageDom, SessionStore};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use casgate_application::*;
}

// Re-export use cases at root level
pub use casgate_application::{
    EndSessionUseCase, LogoutRedirector, MenuRebinder, PollConfig, PollHandle, SessionResolver,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// CAS ticket validation
    pub mod authentication {
        pub use casgate_adapters::authentication::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use casgate_adapters::persistence::*;
    }

    /// Redirect cookies and destinations
    pub mod destination {
        pub use casgate_adapters::destination::*;
    }

    /// The browser logout script
    pub mod client {
        pub use casgate_adapters::client::*;
    }

    /// Configuration
    pub mod config {
        pub use casgate_adapters::config::*;
    }

    /// Axum routes and middleware
    pub mod axum {
        pub use casgate_axum::*;
    }
}

// Re-export commonly used adapters at root level
pub use casgate_adapters::{
    CasGateSettings, CasTicketValidator, HashMapSessionStore, LogoutScript, RedisSessionStore,
};

// ============================================================================
// CAS Service (Main Entry Point)
// ============================================================================

/// Main CAS service
pub use casgate_service::CasService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing collaborator traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
