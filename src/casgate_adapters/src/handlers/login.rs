//! Framework-agnostic handler that starts a CAS login.

use casgate_core::{CasRequest, RedirectResponseBuilder, RedirectResponseHelpers};

use crate::{
    config::routes::RETURN_TO_PARAMETER,
    destination::{CookieDestinationResolver, CookieFactory},
};

/// Send the browser to the CAS login page.
///
/// A same-site `return_to` parameter is remembered in the redirect cookie so
/// the validate route can resume there; anything else is dropped.
pub fn handle_login<R, B>(
    cas_login_url: &str,
    service_url: &str,
    destinations: &CookieDestinationResolver,
    cookies: &CookieFactory,
    request: &R,
    builder: B,
) -> B::Response
where
    R: CasRequest,
    B: RedirectResponseBuilder,
{
    let builder = match request
        .query_param(RETURN_TO_PARAMETER)
        .and_then(|raw| destinations.accept(&raw))
    {
        Some(destination) => builder.cookie(&cookies.redirect(&destination).to_string()),
        None => builder,
    };

    builder.found(&cas_login_redirect(cas_login_url, service_url))
}

/// The CAS login URL with this service attached as `service=`.
pub fn cas_login_redirect(cas_login_url: &str, service_url: &str) -> String {
    let separator = if cas_login_url.contains('?') { '&' } else { '?' };
    format!(
        "{cas_login_url}{separator}service={}",
        urlencoding::encode(service_url)
    )
}
