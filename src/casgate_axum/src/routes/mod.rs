//! Axum-specific route handlers.
//!
//! These routes use Axum's extractors to get data from requests, call the
//! framework-agnostic handlers, and return the built Axum responses.

pub mod login;
pub mod logout;
pub mod logout_script;
pub mod validate;

pub use login::{LoginState, login};
pub use logout::{LogoutState, logout};
pub use logout_script::logout_script;
pub use validate::{LogoutNotice, SingleLogoutError, ValidateState, single_logout, validate};
