use std::collections::BTreeMap;

use casgate_core::{Identity, IdentityError};
use serde::Deserialize;

/// Which CAS attributes feed the identity's profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CasAttributeSettings {
    /// Comma separated; values of every listed attribute become groups.
    pub role_attributes: String,
    pub full_name_attribute: String,
    pub email_attribute: String,
}

impl Default for CasAttributeSettings {
    fn default() -> Self {
        Self {
            role_attributes: "groups,roles".to_owned(),
            full_name_attribute: "cn".to_owned(),
            email_attribute: "mail".to_owned(),
        }
    }
}

impl CasAttributeSettings {
    pub fn role_attribute_names(&self) -> impl Iterator<Item = &str> {
        self.role_attributes
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Build the identity for `user` from the attributes CAS released.
    pub fn identity_from(
        &self,
        user: &str,
        attributes: &BTreeMap<String, Vec<String>>,
    ) -> Result<Identity, IdentityError> {
        let first = |name: &str| {
            attributes
                .get(name)
                .and_then(|values| values.first())
                .cloned()
        };

        let mut identity = Identity::new(user)?;
        if let Some(display_name) = first(&self.full_name_attribute) {
            identity = identity.with_display_name(display_name);
        }
        if let Some(email) = first(&self.email_attribute) {
            identity = identity.with_email(email);
        }

        let groups = self
            .role_attribute_names()
            .filter_map(|name| attributes.get(name))
            .flatten()
            .cloned();
        Ok(identity.with_groups(groups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes(pairs: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(name, values)| {
                (
                    name.to_string(),
                    values.iter().map(|v| v.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_default_mapping() {
        let attrs = attributes(&[
            ("cn", &["Jane Doe"]),
            ("mail", &["jane@example.com"]),
            ("groups", &["admin", "dev"]),
            ("roles", &["auditor"]),
            ("department", &["ignored"]),
        ]);

        let identity = CasAttributeSettings::default()
            .identity_from("jdoe", &attrs)
            .unwrap();

        assert_eq!(identity.login(), "jdoe");
        assert_eq!(identity.display_name(), Some("Jane Doe"));
        assert_eq!(identity.email(), Some("jane@example.com"));
        assert_eq!(
            identity.groups().iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["admin", "auditor", "dev"]
        );
    }

    #[test]
    fn test_role_attribute_list_tolerates_spacing() {
        let settings = CasAttributeSettings {
            role_attributes: " memberOf , ,teams".to_owned(),
            ..Default::default()
        };

        assert_eq!(
            settings.role_attribute_names().collect::<Vec<_>>(),
            vec!["memberOf", "teams"]
        );
    }

    #[test]
    fn test_missing_attributes_leave_profile_empty() {
        let identity = CasAttributeSettings::default()
            .identity_from("jdoe", &BTreeMap::new())
            .unwrap();

        assert_eq!(identity.display_name(), None);
        assert!(identity.groups().is_empty());
    }

    #[test]
    fn test_blank_user_is_rejected() {
        assert_eq!(
            CasAttributeSettings::default().identity_from("  ", &BTreeMap::new()),
            Err(IdentityError::EmptyLogin)
        );
    }
}
