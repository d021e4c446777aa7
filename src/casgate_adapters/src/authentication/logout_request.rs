//! Parse CAS back-channel single logout notices (SAML `LogoutRequest`).

use casgate_core::{ServiceTicket, TicketError};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use thiserror::Error;

const MAX_LOGOUT_REQUEST_LEN: usize = 64 * 1024;

#[derive(Debug, Error, PartialEq)]
pub enum LogoutRequestError {
    #[error("Logout request too large")]
    TooLarge,
    #[error("XML parse error: {0}")]
    Malformed(String),
    #[error("Logout request has no SessionIndex")]
    MissingSessionIndex,
    #[error("SessionIndex is not a ticket: {0}")]
    InvalidTicket(#[from] TicketError),
}

/// Extract the service ticket named by the request's `SessionIndex`.
pub fn parse_logout_request(xml: &str) -> Result<ServiceTicket, LogoutRequestError> {
    if xml.len() > MAX_LOGOUT_REQUEST_LEN {
        return Err(LogoutRequestError::TooLarge);
    }

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_logout_request = false;
    let mut current_element = String::new();
    let mut session_index = None;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let local = String::from_utf8_lossy(e.local_name().into_inner()).to_string();
                if local == "LogoutRequest" {
                    in_logout_request = true;
                }
                current_element = local;
            }
            Ok(Event::Text(ref e)) => {
                if in_logout_request && current_element == "SessionIndex" {
                    let text = e
                        .unescape()
                        .map_err(|e| LogoutRequestError::Malformed(e.to_string()))?;
                    session_index = Some(text.into_owned());
                }
            }
            Ok(Event::End(_)) => current_element.clear(),
            Ok(Event::Eof) => break,
            Err(e) => return Err(LogoutRequestError::Malformed(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    let session_index = session_index.ok_or(LogoutRequestError::MissingSessionIndex)?;
    Ok(ServiceTicket::parse(&session_index)?)
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_parse_cas_logout_request() {
        let xml = r#"<samlp:LogoutRequest xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol"
    ID="LR-1-abc" Version="2.0" IssueInstant="2026-10-19T10:00:00Z">
    <saml:NameID xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion">@NOT_USED@</saml:NameID>
    <samlp:SessionIndex>ST-123-valid</samlp:SessionIndex>
</samlp:LogoutRequest>"#;

        let ticket = parse_logout_request(xml).unwrap();
        assert_eq!(ticket.as_ref().expose_secret(), "ST-123-valid");
    }

    #[test]
    fn test_missing_session_index() {
        let xml = r#"<samlp:LogoutRequest xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol" ID="LR-2">
    <saml:NameID xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion">@NOT_USED@</saml:NameID>
</samlp:LogoutRequest>"#;

        assert_eq!(
            parse_logout_request(xml).unwrap_err(),
            LogoutRequestError::MissingSessionIndex
        );
    }

    #[test]
    fn test_session_index_outside_logout_request_is_ignored() {
        let xml = "<other><SessionIndex>ST-1</SessionIndex></other>";
        assert_eq!(
            parse_logout_request(xml).unwrap_err(),
            LogoutRequestError::MissingSessionIndex
        );
    }

    #[test]
    fn test_malformed_xml() {
        let xml = "<samlp:LogoutRequest><samlp:SessionIndex>ST-1</samlp:LogoutRequest>";
        assert!(matches!(
            parse_logout_request(xml),
            Err(LogoutRequestError::Malformed(_))
        ));
    }

    #[test]
    fn test_oversized_request() {
        let xml = "x".repeat(MAX_LOGOUT_REQUEST_LEN + 1);
        assert_eq!(
            parse_logout_request(&xml).unwrap_err(),
            LogoutRequestError::TooLarge
        );
    }
}
