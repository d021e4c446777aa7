use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdentityError {
    #[error("Login must not be empty")]
    EmptyLogin,
}

/// The authenticated principal CAS vouched for, plus the profile attributes
/// released alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    login: String,
    display_name: Option<String>,
    email: Option<String>,
    groups: BTreeSet<String>,
}

impl Identity {
    pub fn new(login: impl Into<String>) -> Result<Self, IdentityError> {
        let login = login.into().trim().to_owned();
        if login.is_empty() {
            return Err(IdentityError::EmptyLogin);
        }

        Ok(Self {
            login,
            display_name: None,
            email: None,
            groups: BTreeSet::new(),
        })
    }

    /// Blank values are ignored.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = non_blank(display_name.into());
        self
    }

    /// Blank values are ignored.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = non_blank(email.into());
        self
    }

    pub fn with_groups<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<String>,
    {
        self.groups = groups
            .into_iter()
            .filter_map(|group| non_blank(group.into()))
            .collect();
        self
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
