use async_trait::async_trait;
use casgate_core::{AuthenticationError, Authenticator, CasCredentials, Identity};
use reqwest::{Client, Url};
use secrecy::ExposeSecret;
use serde::Deserialize;

use super::{
    attribute_settings::CasAttributeSettings,
    service_response::{ServiceResponse, parse_cas1_response, parse_service_response},
};

/// CAS protocol revision used for ticket validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasProtocol {
    Cas1,
    Cas2,
    #[default]
    Cas3,
}

impl CasProtocol {
    pub fn validation_path(self) -> &'static str {
        match self {
            CasProtocol::Cas1 => "/validate",
            CasProtocol::Cas2 => "/serviceValidate",
            CasProtocol::Cas3 => "/p3/serviceValidate",
        }
    }
}

/// Validates service tickets against the CAS server over HTTP.
///
/// Rejections reported by CAS become [`AuthenticationError::Rejected`];
/// transport errors, error statuses and unreadable answers are faults.
#[derive(Clone)]
pub struct CasTicketValidator {
    http_client: Client,
    server_url_prefix: String,
    protocol: CasProtocol,
    attributes: CasAttributeSettings,
}

impl CasTicketValidator {
    pub fn new(
        server_url_prefix: String,
        protocol: CasProtocol,
        attributes: CasAttributeSettings,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            server_url_prefix,
            protocol,
            attributes,
        }
    }

    fn validation_url(&self) -> Result<Url, AuthenticationError> {
        let url = format!(
            "{}{}",
            self.server_url_prefix.trim_end_matches('/'),
            self.protocol.validation_path()
        );
        Url::parse(&url).map_err(|e| fault("invalid CAS validation URL", e))
    }
}

#[async_trait]
impl Authenticator for CasTicketValidator {
    #[tracing::instrument(name = "Validating CAS ticket", skip_all)]
    async fn authenticate(
        &self,
        credentials: CasCredentials,
    ) -> Result<Identity, AuthenticationError> {
        let ticket = credentials
            .ticket
            .ok_or(AuthenticationError::MissingTicket)?;
        let url = self.validation_url()?;

        let body = self
            .http_client
            .get(url)
            .query(&[
                ("ticket", ticket.as_ref().expose_secret().as_str()),
                ("service", credentials.service_url.as_str()),
            ])
            .send()
            .await
            .map_err(|e| fault("CAS request failed", e))?
            .error_for_status()
            .map_err(|e| fault("CAS answered with an error status", e))?
            .text()
            .await
            .map_err(|e| fault("CAS response body unreadable", e))?;

        let response = match self.protocol {
            CasProtocol::Cas1 => parse_cas1_response(&body),
            CasProtocol::Cas2 | CasProtocol::Cas3 => parse_service_response(&body),
        }
        .map_err(|e| fault("CAS response unusable", e))?;

        match response {
            ServiceResponse::Success { user, attributes } => self
                .attributes
                .identity_from(&user, &attributes)
                .map_err(|e| fault("CAS vouched for an unusable user", e)),
            ServiceResponse::Failure { code, message } => {
                Err(AuthenticationError::Rejected { code, message })
            }
        }
    }
}

fn fault(context: &str, error: impl std::fmt::Display) -> AuthenticationError {
    AuthenticationError::Fault(format!("{context}: {error}"))
}
