//! Axum framework adapters for the CAS HTTP traits.
//!
//! This module implements `CasRequest` and `RedirectResponseBuilder` for Axum's
//! types using newtype wrappers to avoid the orphan rule.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │  casgate_core::CasRequest (trait)          │
//! └────────────────┬───────────────────────────┘
//!                  │
//!                  ▼
//! ┌────────────────────────────────────────────┐
//! │  AxumRequest(request::Parts)               │
//! │  impl CasRequest for AxumRequest { }       │
//! └────────────────────────────────────────────┘
//! ```
//!
//! The request wrapper holds the request head only. None of the CAS
//! endpoints read a body through the trait, and the head can be shared
//! across the awaits of the session resolver.

use axum::body::Body;
use axum::extract::Query;
use axum::http::{Response, StatusCode, header, request::Parts};
use casgate_core::{CasRequest, RedirectResponseBuilder};

/// Newtype wrapper around the head of an Axum request.
#[repr(transparent)]
pub struct AxumRequest(pub Parts);

impl From<Parts> for AxumRequest {
    fn from(parts: Parts) -> Self {
        AxumRequest(parts)
    }
}

impl From<AxumRequest> for Parts {
    fn from(wrapper: AxumRequest) -> Self {
        wrapper.0
    }
}

impl CasRequest for AxumRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.0.headers.get(name)?.to_str().ok()
    }

    fn cookie(&self, name: &str) -> Option<&str> {
        // Browsers may split cookies over several Cookie headers
        self.0
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .find_map(|pair| {
                let (key, value) = pair.trim().split_once('=')?;
                (key == name).then_some(value)
            })
    }

    fn query_param(&self, name: &str) -> Option<String> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&self.0.uri).ok()?;
        pairs
            .into_iter()
            .find_map(|(key, value)| (key == name).then_some(value))
    }

    fn method(&self) -> &str {
        self.0.method.as_str()
    }

    fn path(&self) -> &str {
        self.0.uri.path()
    }
}

/// Newtype wrapper around Axum's response builder.
pub struct AxumResponseBuilder {
    builder: axum::http::response::Builder,
    body: Option<String>,
}

impl AxumResponseBuilder {
    /// Create a new Axum response builder
    pub fn new() -> Self {
        Self {
            builder: Response::builder(),
            body: None,
        }
    }
}

impl Default for AxumResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RedirectResponseBuilder for AxumResponseBuilder {
    type Response = Response<Body>;

    fn status(mut self, code: u16) -> Self {
        self.builder = self.builder.status(code);
        self
    }

    fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    fn text_body(mut self, content_type: &str, body: String) -> Self {
        self.builder = self.builder.header(header::CONTENT_TYPE, content_type);
        self.body = Some(body);
        self
    }

    fn build(self) -> Self::Response {
        let body = self.body.unwrap_or_default();
        self.builder.body(Body::from(body)).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to build response");
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        })
    }
}

/// Helper function to create an Axum response builder
pub fn response_builder() -> AxumResponseBuilder {
    AxumResponseBuilder::new()
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, Request};
    use casgate_core::RedirectResponseHelpers;

    use super::*;

    fn parts(uri: &str, cookies: &[&str]) -> AxumRequest {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        for cookie in cookies {
            builder = builder.header("cookie", *cookie);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        AxumRequest(parts)
    }

    #[test]
    fn test_cas_request_implementation() {
        let request = parts(
            "/cas/validate?ticket=ST-1-abc&other=x",
            &["casgate_session=abc123; casgate_redirect=%2Fdashboard"],
        );

        assert_eq!(request.method(), "GET");
        assert_eq!(request.path(), "/cas/validate");
        assert_eq!(request.query_param("ticket"), Some("ST-1-abc".to_string()));
        assert_eq!(request.query_param("missing"), None);
        assert_eq!(request.cookie("casgate_session"), Some("abc123"));
        assert_eq!(request.cookie("casgate_redirect"), Some("%2Fdashboard"));
        assert_eq!(request.cookie("nonexistent"), None);
    }

    #[test]
    fn test_query_param_is_decoded() {
        let request = parts("/cas/login?return_to=%2Fprojects%3Fq%3Da+b", &[]);
        assert_eq!(
            request.query_param("return_to"),
            Some("/projects?q=a b".to_string())
        );
    }

    #[test]
    fn test_bare_key_reads_as_empty_value() {
        let request = parts("/cas/login?renew&return_to=%2Fdashboard", &[]);
        assert_eq!(request.query_param("renew"), Some(String::new()));
        assert_eq!(
            request.query_param("return_to"),
            Some("/dashboard".to_string())
        );
    }

    #[test]
    fn test_first_occurrence_wins() {
        let request = parts("/cas/validate?ticket=ST-1-a&ticket=ST-2-b", &[]);
        assert_eq!(request.query_param("ticket"), Some("ST-1-a".to_string()));
    }

    #[test]
    fn test_cookie_spread_over_headers() {
        let request = parts("/", &["a=1", "casgate_session=xyz"]);
        assert_eq!(request.cookie("casgate_session"), Some("xyz"));
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let (parts, _) = Request::builder()
            .header("Accept", "text/html")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(AxumRequest(parts).header("accept"), Some("text/html"));
    }

    #[test]
    fn test_found_response() {
        let resp = response_builder()
            .cookie("casgate_redirect=; Max-Age=0")
            .found("/dashboard");

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get("location").and_then(|v| v.to_str().ok()),
            Some("/dashboard")
        );
        assert!(resp.headers().contains_key("set-cookie"));
    }

    #[test]
    fn test_invalid_header_value_yields_server_error() {
        let resp = response_builder().header("location", "bad\nvalue").build();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
