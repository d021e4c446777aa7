//! Framework-agnostic handler that sends anonymous page views to CAS.

use casgate_core::{RedirectResponseBuilder, RedirectResponseHelpers};

use super::login::cas_login_redirect;
use crate::destination::{CookieDestinationResolver, CookieFactory};

/// Redirect to the CAS login page, remembering `requested` (path and query of
/// the page the browser asked for) in the redirect cookie when it is same-site.
pub fn handle_force_login<B>(
    cas_login_url: &str,
    service_url: &str,
    destinations: &CookieDestinationResolver,
    cookies: &CookieFactory,
    requested: &str,
    builder: B,
) -> B::Response
where
    B: RedirectResponseBuilder,
{
    let builder = match destinations.accept(requested) {
        Some(destination) => builder.cookie(&cookies.redirect(&destination).to_string()),
        None => builder,
    };

    tracing::debug!(requested, "Anonymous page request sent to CAS login");
    builder.found(&cas_login_redirect(cas_login_url, service_url))
}
