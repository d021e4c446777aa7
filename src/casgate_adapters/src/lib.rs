//! Adapters connecting the CAS use cases to the outside world: the CAS
//! server, session storage, cookies, configuration and the browser script.

pub mod authentication;
pub mod client;
pub mod config;
pub mod destination;
pub mod handlers;
pub mod persistence;

pub use authentication::{CasAttributeSettings, CasProtocol, CasTicketValidator};
pub use client::{LogoutScript, ScriptRenderError};
pub use config::{CasGateSettings, SettingsError};
pub use destination::{CookieDestinationResolver, CookieFactory};
pub use persistence::{HashMapSessionStore, RedisSessionStore};
