use std::sync::Arc;

use askama::Template;
use casgate_application::PollConfig;
use casgate_core::LookupChain;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptRenderError {
    #[error("Failed to encode script parameters: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Failed to render logout script: {0}")]
    Render(#[from] askama::Error),
}

#[derive(Template)]
#[template(path = "cas_logout.js", escape = "none")]
struct LogoutScriptTemplate {
    logout_url: String,
    chain: String,
    interval_ms: u128,
    warn_after_ms: String,
    max_attempts: String,
}

/// The rebinding poller as a browser script, rendered once at startup.
#[derive(Debug, Clone)]
pub struct LogoutScript {
    body: Arc<str>,
}

impl LogoutScript {
    pub const CONTENT_TYPE: &'static str = "application/javascript; charset=utf-8";

    pub fn render(
        logout_url: &str,
        chain: &LookupChain,
        poll: &PollConfig,
    ) -> Result<Self, ScriptRenderError> {
        let template = LogoutScriptTemplate {
            logout_url: js_literal(&logout_url)?,
            chain: js_literal(chain)?,
            interval_ms: poll.interval.as_millis(),
            warn_after_ms: js_literal(&poll.warn_after.map(|d| d.as_millis() as u64))?,
            max_attempts: js_literal(&poll.max_attempts)?,
        };

        Ok(Self {
            body: template.render()?.into(),
        })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// The tag that loads the script from `script_path`.
    pub fn tag(script_path: &str) -> String {
        format!("<script type='text/javascript' src='{script_path}'></script>")
    }
}

/// JSON is valid JavaScript; `<` is escaped so values cannot close a script block.
fn js_literal<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}
