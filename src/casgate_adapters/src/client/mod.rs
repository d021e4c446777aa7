//! Browser-side assets: the logout script served to the host's pages.

pub mod logout_script;

pub use logout_script::{LogoutScript, ScriptRenderError};
