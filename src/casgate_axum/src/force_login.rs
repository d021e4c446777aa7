//! Middleware sending anonymous page views through CAS login.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{Method, header},
    middleware::Next,
    response::Response,
};
use casgate_adapters::{
    destination::{CookieDestinationResolver, CookieFactory, read_session_id},
    handlers,
};
use casgate_core::SessionStore;

use crate::adapters::{AxumRequest, response_builder};

pub struct ForceLoginState<S> {
    pub session_store: S,
    pub cas_login_url: String,
    pub service_url: String,
    pub destinations: CookieDestinationResolver,
    pub cookies: CookieFactory,
    /// Paths served without a session: the CAS routes and the logout script.
    pub exempt_paths: Arc<[String]>,
}

impl<S: Clone> Clone for ForceLoginState<S> {
    fn clone(&self) -> Self {
        Self {
            session_store: self.session_store.clone(),
            cas_login_url: self.cas_login_url.clone(),
            service_url: self.service_url.clone(),
            destinations: self.destinations.clone(),
            cookies: self.cookies.clone(),
            exempt_paths: Arc::clone(&self.exempt_paths),
        }
    }
}

impl<S> ForceLoginState<S> {
    fn is_exempt(&self, path: &str) -> bool {
        path.contains("favicon.ico") || self.exempt_paths.iter().any(|exempt| exempt == path)
    }
}

/// Redirect HTML page requests without an authenticated session to CAS
/// login, recording the requested page so validation can return there.
///
/// Non-GET requests, clients that do not accept HTML and exempt paths go
/// straight through. A session store failure is treated as anonymous.
///
/// ```ignore
/// router.layer(axum::middleware::from_fn_with_state(state, force_cas_login::<S>))
/// ```
pub async fn force_cas_login<S>(
    State(state): State<ForceLoginState<S>>,
    request: Request,
    next: Next,
) -> Response
where
    S: SessionStore + Clone + 'static,
{
    let wants_page = matches!(*request.method(), Method::GET | Method::HEAD)
        && request
            .headers()
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|accept| accept.contains("html"));
    if !wants_page || state.is_exempt(request.uri().path()) {
        return next.run(request).await;
    }

    let (parts, body) = request.into_parts();
    let page = AxumRequest(parts);
    if is_authenticated(&state, &page).await {
        return next.run(Request::from_parts(page.0, body)).await;
    }

    let requested = page
        .0
        .uri
        .path_and_query()
        .map_or("/", |path_and_query| path_and_query.as_str());

    handlers::handle_force_login(
        &state.cas_login_url,
        &state.service_url,
        &state.destinations,
        &state.cookies,
        requested,
        response_builder(),
    )
}

async fn is_authenticated<S: SessionStore>(state: &ForceLoginState<S>, page: &AxumRequest) -> bool {
    let Some(session_id) = read_session_id(page, state.cookies.session_cookie_name()) else {
        return false;
    };

    match state.session_store.load(&session_id).await {
        Ok(session) => session.is_authenticated(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load session, forcing CAS login");
            false
        }
    }
}
