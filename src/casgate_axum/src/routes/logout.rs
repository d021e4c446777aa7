//! Axum-specific logout route.

use std::sync::Arc;

use axum::{extract::State, http::request::Parts, response::Response};
use casgate_adapters::{destination::CookieFactory, handlers};
use casgate_application::EndSessionUseCase;
use casgate_core::SessionStore;

use crate::adapters::{AxumRequest, response_builder};

pub struct LogoutState<S> {
    pub end_session: Arc<EndSessionUseCase<S>>,
    pub cas_logout_url: String,
    pub cookies: CookieFactory,
}

impl<S> Clone for LogoutState<S> {
    fn clone(&self) -> Self {
        Self {
            end_session: Arc::clone(&self.end_session),
            cas_logout_url: self.cas_logout_url.clone(),
            cookies: self.cookies.clone(),
        }
    }
}

/// Axum logout route.
///
/// Target of the rebound logout control: ends the local session, then sends
/// the browser to CAS.
#[tracing::instrument(name = "CAS logout", skip_all)]
pub async fn logout<S>(State(state): State<LogoutState<S>>, parts: Parts) -> Response
where
    S: SessionStore + 'static,
{
    let request = AxumRequest(parts);

    handlers::handle_logout(
        &state.end_session,
        &state.cas_logout_url,
        &state.cookies,
        &request,
        response_builder(),
    )
    .await
}
