use std::fmt;

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::identity::Identity;

#[derive(Debug, Error, PartialEq)]
pub enum SessionIdError {
    #[error("Session id is not a valid UUID")]
    Malformed,
}

/// Identifier of a host session, carried in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn parse(raw: &str) -> Result<Self, SessionIdError> {
        let id = Uuid::parse_str(raw.trim()).map_err(|_| SessionIdError::Malformed)?;
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque assertion token left in the session by the CAS layer.
#[derive(Debug, Clone)]
pub struct CasAssertion(Secret<String>);

impl CasAssertion {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Secret::new(token.into()))
    }
}

impl AsRef<Secret<String>> for CasAssertion {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for CasAssertion {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

/// The slice of a host session this crate reads and writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub current_user: Option<Identity>,
    pub cas_assertion: Option<CasAssertion>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}
