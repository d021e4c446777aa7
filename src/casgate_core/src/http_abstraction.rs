//! Zero-cost HTTP abstraction traits for the CAS endpoints.
//!
//! Frameworks implement these traits on newtype wrappers of their own request
//! and response types, so the CAS handlers stay framework agnostic.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  casgate_core: Defines HTTP traits       │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  casgate_axum: Newtype wrappers          │
//! │  struct AxumRequest(request::Parts)      │
//! │  impl CasRequest for AxumRequest { }     │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  Handlers use CasRequest trait methods   │
//! └──────────────────────────────────────────┘
//! ```

/// Trait for inbound HTTP requests handled by the CAS endpoints.
///
/// # Implementation Notes
///
/// - Header lookup must be case-insensitive
/// - `query_param` returns the percent-decoded value of the first occurrence
pub trait CasRequest {
    /// Get a header value by name.
    fn header(&self, name: &str) -> Option<&str>;

    /// Get a cookie value by name.
    fn cookie(&self, name: &str) -> Option<&str>;

    /// Get a decoded query string parameter by name.
    fn query_param(&self, name: &str) -> Option<String>;

    /// Get the HTTP method (GET, POST, etc.)
    fn method(&self) -> &str;

    /// Get the request path
    fn path(&self) -> &str;
}

/// Trait for building the redirect-heavy responses of the CAS endpoints.
///
/// Follows the builder pattern:
/// ```ignore
/// builder
///     .status(302)
///     .header("location", "/dashboard")
///     .cookie("casgate_session=...; HttpOnly")
///     .build()
/// ```
pub trait RedirectResponseBuilder: Sized {
    /// The final response type produced by this builder
    type Response;

    /// Set the HTTP status code
    fn status(self, code: u16) -> Self;

    /// Add an HTTP header
    fn header(self, name: &str, value: &str) -> Self;

    /// Add a Set-Cookie header
    ///
    /// The cookie_value should be a complete cookie string like:
    /// `"casgate_session=...; HttpOnly; Secure; SameSite=Lax; Path=/"`
    fn cookie(self, cookie_value: &str) -> Self {
        self.header("set-cookie", cookie_value)
    }

    /// Set a plain text body with its Content-Type header
    fn text_body(self, content_type: &str, body: String) -> Self;

    /// Build the final response
    fn build(self) -> Self::Response;
}

/// Helper methods for the responses the CAS endpoints produce.
///
/// Automatically implemented for all types that implement `RedirectResponseBuilder`.
pub trait RedirectResponseHelpers: RedirectResponseBuilder {
    /// 302 Found pointing at `location`
    fn found(self, location: &str) -> Self::Response {
        self.status(302).header("location", location).build()
    }

    /// 200 OK with a plain text body
    fn ok_text(self, body: &str) -> Self::Response {
        self.status(200)
            .text_body("text/plain; charset=utf-8", body.to_owned())
            .build()
    }

    /// 400 Bad Request with a plain text body
    fn bad_request(self, message: &str) -> Self::Response {
        self.status(400)
            .text_body("text/plain; charset=utf-8", message.to_owned())
            .build()
    }

    /// 500 Internal Server Error with a plain text body
    fn internal_error(self, message: &str) -> Self::Response {
        self.status(500)
            .text_body("text/plain; charset=utf-8", message.to_owned())
            .build()
    }
}

// Blanket implementation for all RedirectResponseBuilder types
impl<T: RedirectResponseBuilder> RedirectResponseHelpers for T {}
