//! Framework-agnostic logout handler.

use casgate_application::EndSessionUseCase;
use casgate_core::{CasRequest, RedirectResponseBuilder, RedirectResponseHelpers, SessionStore};

use crate::destination::{CookieFactory, read_session_id};

/// Log the local session out, then hand the browser to the CAS logout page
/// so the single-sign-on session ends too.
///
/// Store failures are logged; the browser is redirected regardless.
pub async fn handle_logout<S, R, B>(
    end_session: &EndSessionUseCase<S>,
    cas_logout_url: &str,
    cookies: &CookieFactory,
    request: &R,
    builder: B,
) -> B::Response
where
    S: SessionStore,
    R: CasRequest,
    B: RedirectResponseBuilder,
{
    if let Some(session_id) = read_session_id(request, cookies.session_cookie_name()) {
        if let Err(e) = end_session.execute(&session_id).await {
            tracing::error!(error = %e, "Failed to clear local session on logout");
        }
    }

    builder
        .cookie(&cookies.session_removal().to_string())
        .found(cas_logout_url)
}
