use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DestinationError {
    #[error("Destination is empty")]
    Empty,
    #[error("Destination must be an absolute path or an http(s) URL")]
    UnsupportedForm,
    #[error("Destination contains whitespace or control characters")]
    InvalidCharacters,
}

/// Where the browser is sent once a CAS round-trip is over.
///
/// Either a path on the host (`/dashboard?tab=1`) or an absolute `http(s)` URL.
/// Protocol-relative values (`//evil.example`) are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Destination(String);

impl Destination {
    pub fn parse(raw: &str) -> Result<Self, DestinationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DestinationError::Empty);
        }
        if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(DestinationError::InvalidCharacters);
        }

        let is_path = raw.starts_with('/') && !raw.starts_with("//") && !raw.contains('\\');
        let is_url = raw.starts_with("https://") || raw.starts_with("http://");
        if !is_path && !is_url {
            return Err(DestinationError::UnsupportedForm);
        }

        Ok(Self(raw.to_owned()))
    }

    pub fn is_local_path(&self) -> bool {
        self.0.starts_with('/')
    }

    /// True when this destination is a local path or lives under `base_url`.
    pub fn is_within(&self, base_url: &str) -> bool {
        if self.is_local_path() {
            return true;
        }

        let base = base_url.trim_end_matches('/');
        match self.0.strip_prefix(base) {
            Some(rest) => rest.is_empty() || rest.starts_with(['/', '?', '#']),
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Destination {
    type Error = DestinationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Destination> for String {
    fn from(destination: Destination) -> Self {
        destination.0
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
