//! Framework-agnostic CAS handlers.
//!
//! These handlers hold the request logic of the CAS endpoints without any framework dependencies.
//! Framework-specific routes extract what they need from requests, call these handlers,
//! and hand the built response back to the framework.

pub mod force_login;
pub mod login;
pub mod logout;
pub mod single_logout;
pub mod validate;

pub use force_login::handle_force_login;
pub use login::handle_login;
pub use logout::handle_logout;
pub use single_logout::handle_single_logout;
pub use validate::handle_validate;
