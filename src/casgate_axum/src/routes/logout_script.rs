//! Serves the browser rendition of the logout rebinding.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use casgate_adapters::LogoutScript;

pub async fn logout_script(State(script): State<LogoutScript>) -> Response {
    (
        [
            (header::CONTENT_TYPE, LogoutScript::CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        script.body().to_owned(),
    )
        .into_response()
}
