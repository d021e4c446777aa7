//! Axum integration for the casgate CAS library.
//!
//! This crate provides Axum adapters for the framework-agnostic CAS
//! handlers defined in `casgate_adapters`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  casgate_core: HTTP trait definitions    │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  casgate_axum: Axum implementations      │
//! │  - AxumRequest newtype wrapper           │
//! │  - AxumResponseBuilder                   │
//! │  - Axum route handlers                   │
//! │  - Logout script injection middleware    │
//! │  - Forced CAS login middleware           │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use casgate_axum::routes;
//!
//! let app = Router::new()
//!     .route("/cas/validate", get(routes::validate).post(routes::single_logout))
//!     .with_state(validate_state)
//!     .route("/cas/logout", get(routes::logout))
//!     .with_state(logout_state);
//! ```

pub mod adapters;
pub mod force_login;
pub mod inject;
pub mod routes;

// Re-export for convenience
pub use adapters::{AxumRequest, AxumResponseBuilder, response_builder};
pub use force_login::{ForceLoginState, force_cas_login};
pub use inject::{ScriptTag, inject_logout_script};
