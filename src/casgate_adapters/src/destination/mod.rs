pub mod cookie_destination_resolver;
pub mod cookies;

pub use cookie_destination_resolver::CookieDestinationResolver;
pub use cookies::{CookieFactory, read_session_id};
