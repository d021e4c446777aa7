use casgate_core::{CasRequest, Destination, DestinationResolver};

/// Reads the original destination from the redirect cookie set when the user
/// was sent to CAS.
///
/// Only same-site destinations are honoured: host paths, and absolute URLs
/// on the service's own origin.
#[derive(Debug, Clone)]
pub struct CookieDestinationResolver {
    cookie_name: String,
    service_origin: Option<String>,
}

impl CookieDestinationResolver {
    pub fn new(cookie_name: impl Into<String>, service_url: &str) -> Self {
        let service_origin = reqwest::Url::parse(service_url)
            .ok()
            .map(|url| url.origin().ascii_serialization())
            .filter(|origin| origin != "null");

        Self {
            cookie_name: cookie_name.into(),
            service_origin,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Parse `raw` and keep it only if it stays on this site.
    pub fn accept(&self, raw: &str) -> Option<Destination> {
        let destination = match Destination::parse(raw) {
            Ok(destination) => destination,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unusable destination");
                return None;
            }
        };

        let same_site = destination.is_local_path()
            || self
                .service_origin
                .as_deref()
                .is_some_and(|origin| destination.is_within(origin));
        if !same_site {
            tracing::warn!(destination = %destination, "Ignoring off-site destination");
            return None;
        }

        Some(destination)
    }
}

impl DestinationResolver for CookieDestinationResolver {
    fn resolve_original_destination<R: CasRequest>(&self, request: &R) -> Option<Destination> {
        let raw = request.cookie(&self.cookie_name)?;
        let decoded = urlencoding::decode(raw).ok()?;
        self.accept(&decoded)
    }
}
