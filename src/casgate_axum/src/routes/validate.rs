//! Axum-specific routes on the CAS service URL.
//!
//! CAS sends the browser back here with `GET ?ticket=` and posts its
//! back-channel `logoutRequest` notices to the same URL.

use std::sync::Arc;

use axum::{
    Form,
    extract::State,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use casgate_adapters::{
    destination::{CookieDestinationResolver, CookieFactory},
    handlers,
};
use casgate_application::{EndSessionUseCase, SessionResolver};
use casgate_core::{Authenticator, SessionStore};
use serde::Deserialize;
use thiserror::Error;

use crate::adapters::{AxumRequest, response_builder};

pub struct ValidateState<A, S> {
    pub resolver: Arc<SessionResolver<A, S, CookieDestinationResolver>>,
    pub end_session: Arc<EndSessionUseCase<S>>,
    pub cookies: CookieFactory,
}

impl<A, S> Clone for ValidateState<A, S> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            end_session: Arc::clone(&self.end_session),
            cookies: self.cookies.clone(),
        }
    }
}

/// Axum validate route.
///
/// Always answers with a redirect; authentication problems end in an
/// anonymous session, never in an error page.
#[tracing::instrument(name = "CAS validate", skip_all)]
pub async fn validate<A, S>(State(state): State<ValidateState<A, S>>, parts: Parts) -> Response
where
    A: Authenticator + Clone + 'static,
    S: SessionStore + 'static,
{
    let request = AxumRequest(parts);

    handlers::handle_validate(&state.resolver, &state.cookies, &request, response_builder()).await
}

/// Form body of a CAS back-channel logout notice.
#[derive(Debug, Deserialize)]
pub struct LogoutNotice {
    #[serde(rename = "logoutRequest", default)]
    pub logout_request: Option<String>,
}

#[derive(Debug, Error)]
pub enum SingleLogoutError {
    #[error("Missing logoutRequest field")]
    MissingLogoutRequest,
}

impl IntoResponse for SingleLogoutError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/// Axum single logout route.
#[tracing::instrument(name = "CAS single logout", skip_all)]
pub async fn single_logout<A, S>(
    State(state): State<ValidateState<A, S>>,
    Form(notice): Form<LogoutNotice>,
) -> Result<Response, SingleLogoutError>
where
    A: Authenticator + Clone + 'static,
    S: SessionStore + 'static,
{
    let logout_request = notice
        .logout_request
        .ok_or(SingleLogoutError::MissingLogoutRequest)?;

    Ok(handlers::handle_single_logout(&state.end_session, &logout_request, response_builder()).await)
}
