pub mod end_session;
pub mod rebind_menu;
pub mod redirect_logout;
pub mod resolve_session;
