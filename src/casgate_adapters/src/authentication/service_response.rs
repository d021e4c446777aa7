//! Parse CAS ticket validation responses.

use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use thiserror::Error;

/// Code reported for CAS 1.0 rejections, which carry no code of their own.
pub const CAS1_FAILURE_CODE: &str = "INVALID_TICKET";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceResponse {
    Success {
        user: String,
        attributes: BTreeMap<String, Vec<String>>,
    },
    Failure {
        code: String,
        message: String,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ServiceResponseError {
    #[error("Malformed CAS response: {0}")]
    Malformed(String),
    #[error("CAS response carries no authentication outcome")]
    MissingOutcome,
}

/// Parse a CAS 2.0 / 3.0 `serviceResponse` document.
pub fn parse_service_response(xml: &str) -> Result<ServiceResponse, ServiceResponseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut parts = ResponseParts::default();

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = local_name(e);
                parts.open(&name, e)?;
                path.push(name);
            }
            Ok(Event::Empty(ref e)) => {
                parts.open(&local_name(e), e)?;
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| ServiceResponseError::Malformed(e.to_string()))?;
                parts.text(&path, &text);
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                parts.text(&path, text.trim());
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ServiceResponseError::Malformed(format!(
                    "XML parse error at {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    parts.finish()
}

/// Parse the two-line CAS 1.0 `/validate` answer (`yes\n<user>\n` or `no\n\n`).
pub fn parse_cas1_response(body: &str) -> Result<ServiceResponse, ServiceResponseError> {
    let mut lines = body.lines().map(str::trim);

    match lines.next() {
        Some("yes") => {
            let user = lines
                .next()
                .filter(|user| !user.is_empty())
                .ok_or_else(|| ServiceResponseError::Malformed("missing user line".to_owned()))?;
            Ok(ServiceResponse::Success {
                user: user.to_owned(),
                attributes: BTreeMap::new(),
            })
        }
        Some("no") => Ok(ServiceResponse::Failure {
            code: CAS1_FAILURE_CODE.to_owned(),
            message: "ticket not validated".to_owned(),
        }),
        _ => Err(ServiceResponseError::Malformed(
            "expected `yes` or `no`".to_owned(),
        )),
    }
}

fn local_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().into_inner()).into_owned()
}

#[derive(Default)]
struct ResponseParts {
    success: bool,
    user: Option<String>,
    attributes: BTreeMap<String, Vec<String>>,
    failure_code: Option<String>,
    failure_message: String,
}

impl ResponseParts {
    fn open(&mut self, name: &str, element: &BytesStart<'_>) -> Result<(), ServiceResponseError> {
        match name {
            "authenticationSuccess" => self.success = true,
            "authenticationFailure" => {
                let code = element
                    .try_get_attribute("code")
                    .map_err(|e| ServiceResponseError::Malformed(e.to_string()))?
                    .map(|attr| attr.unescape_value().map(|v| v.into_owned()))
                    .transpose()
                    .map_err(|e| ServiceResponseError::Malformed(e.to_string()))?;
                self.failure_code = Some(code.unwrap_or_else(|| "UNKNOWN".to_owned()));
            }
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, path: &[String], text: &str) {
        let names: Vec<&str> = path.iter().map(String::as_str).collect();

        match names.as_slice() {
            [.., "authenticationSuccess", "user"] => self.user = Some(text.to_owned()),
            [.., "authenticationFailure"] => self.failure_message.push_str(text),
            [.., "authenticationSuccess", "attributes", attribute] => self
                .attributes
                .entry((*attribute).to_owned())
                .or_default()
                .push(text.to_owned()),
            _ => {}
        }
    }

    fn finish(self) -> Result<ServiceResponse, ServiceResponseError> {
        if let Some(code) = self.failure_code {
            return Ok(ServiceResponse::Failure {
                code,
                message: self.failure_message.trim().to_owned(),
            });
        }
        if !self.success {
            return Err(ServiceResponseError::MissingOutcome);
        }

        let user = self
            .user
            .filter(|user| !user.trim().is_empty())
            .ok_or_else(|| {
                ServiceResponseError::Malformed("authenticationSuccess without user".to_owned())
            })?;

        Ok(ServiceResponse::Success {
            user,
            attributes: self.attributes,
        })
    }
}
