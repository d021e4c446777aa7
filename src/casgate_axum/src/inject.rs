//! Middleware appending the logout script tag to HTML pages.

use std::sync::Arc;

use axum::{
    body::{Body, HttpBody, to_bytes},
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

const MAX_INJECTED_BODY: usize = 16 * 1024 * 1024;

/// The `<script>` tag appended to HTML responses.
#[derive(Debug, Clone)]
pub struct ScriptTag(Arc<str>);

impl ScriptTag {
    pub fn new(tag: impl Into<Arc<str>>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Append the logout script tag to `text/html` responses for clients that
/// accept HTML. `favicon.ico` is never touched.
///
/// Encoded bodies (`Content-Encoding` other than `identity`) and bodies that
/// are not known to fit in memory are passed through unchanged.
///
/// ```ignore
/// router.layer(axum::middleware::from_fn_with_state(tag, inject_logout_script))
/// ```
pub async fn inject_logout_script(
    State(tag): State<ScriptTag>,
    request: Request,
    next: Next,
) -> Response {
    let accepts_html = request
        .headers()
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("html"));
    let blacklisted = request.uri().path().contains("favicon.ico");

    let response = next.run(request).await;
    if !accepts_html || blacklisted || !is_html(&response) || is_encoded(&response) {
        return response;
    }
    if !response
        .body()
        .size_hint()
        .upper()
        .is_some_and(|len| len <= MAX_INJECTED_BODY as u64)
    {
        tracing::debug!("HTML response too large to buffer, script not injected");
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let mut html = match to_bytes(body, MAX_INJECTED_BODY).await {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to buffer HTML response for script injection");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    html.extend_from_slice(tag.as_str().as_bytes());

    tracing::debug!("Injected CAS logout script");
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(html))
}

fn is_encoded(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_ENCODING)
        .is_some_and(|encoding| {
            !encoding
                .to_str()
                .is_ok_and(|value| value.trim().eq_ignore_ascii_case("identity"))
        })
}

fn is_html(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("text/html"))
}
