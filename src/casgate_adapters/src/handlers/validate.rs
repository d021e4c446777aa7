//! Framework-agnostic handler for the return trip from CAS.

use casgate_application::SessionResolver;
use casgate_core::{
    Authenticator, CasRequest, DestinationResolver, RedirectResponseBuilder,
    RedirectResponseHelpers, SessionId, SessionStore,
};

use crate::destination::{CookieFactory, read_session_id};

/// Handle the browser coming back from CAS with a ticket.
///
/// Resolves the session, drops the redirect cookie and sends the browser on.
/// The session cookie is (re)issued whenever the resolved session differs
/// from the one presented, which includes every successful login.
///
/// # Arguments
///
/// * `resolver` - The session resolution use case
/// * `cookies` - Cookie settings of this deployment
/// * `request` - The HTTP request (implements CasRequest trait)
/// * `builder` - Response builder (framework-specific but implements our trait)
pub async fn handle_validate<A, S, D, R, B>(
    resolver: &SessionResolver<A, S, D>,
    cookies: &CookieFactory,
    request: &R,
    builder: B,
) -> B::Response
where
    A: Authenticator + Clone + 'static,
    S: SessionStore,
    D: DestinationResolver,
    R: CasRequest + Sync,
    B: RedirectResponseBuilder,
{
    let presented = read_session_id(request, cookies.session_cookie_name());
    let session_id = presented.clone().unwrap_or_else(SessionId::new);

    let resolution = resolver.execute(&session_id, request).await;

    let mut builder = builder.cookie(&cookies.redirect_removal().to_string());
    if presented.as_ref() != Some(&resolution.session_id) {
        builder = builder.cookie(&cookies.session(&resolution.session_id).to_string());
    }

    builder.found(resolution.redirect_to.as_str())
}
