//! Framework-agnostic handler for CAS back-channel single logout.

use casgate_application::EndSessionUseCase;
use casgate_core::{RedirectResponseBuilder, RedirectResponseHelpers, SessionStore};

use crate::authentication::parse_logout_request;

/// Handle a `logoutRequest` CAS posted to the validate URL.
///
/// Unknown tickets are acknowledged like known ones. Only an unreadable
/// notice is a client error.
pub async fn handle_single_logout<S, B>(
    end_session: &EndSessionUseCase<S>,
    logout_request: &str,
    builder: B,
) -> B::Response
where
    S: SessionStore,
    B: RedirectResponseBuilder,
{
    let ticket = match parse_logout_request(logout_request) {
        Ok(ticket) => ticket,
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting unreadable single logout request");
            return builder.bad_request("Malformed logout request");
        }
    };

    match end_session.single_logout(&ticket).await {
        Ok(Some(session_id)) => {
            tracing::info!(session_id = %session_id, "Session ended by CAS single logout");
            builder.ok_text("OK")
        }
        Ok(None) => builder.ok_text("OK"),
        Err(e) => {
            tracing::error!(error = %e, "Single logout failed");
            builder.internal_error("Single logout failed")
        }
    }
}
