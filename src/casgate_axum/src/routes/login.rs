//! Axum-specific login route.

use axum::{extract::State, http::request::Parts, response::Response};
use casgate_adapters::{
    destination::{CookieDestinationResolver, CookieFactory},
    handlers,
};

use crate::adapters::{AxumRequest, response_builder};

#[derive(Clone)]
pub struct LoginState {
    pub cas_login_url: String,
    pub service_url: String,
    pub destinations: CookieDestinationResolver,
    pub cookies: CookieFactory,
}

/// Axum login route: records `return_to` and redirects to CAS.
#[tracing::instrument(name = "CAS login", skip_all)]
pub async fn login(State(state): State<LoginState>, parts: Parts) -> Response {
    let request = AxumRequest(parts);

    handlers::handle_login(
        &state.cas_login_url,
        &state.service_url,
        &state.destinations,
        &state.cookies,
        &request,
        response_builder(),
    )
}
