use std::{path::Path, time::Duration};

use casgate_application::PollConfig;
use casgate_core::{Destination, HostLayout, LookupChain};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

use super::constants::{
    BASE_CONFIG_FILE, CONFIG_DIR, DEFAULT_REDIRECT_COOKIE_NAME, DEFAULT_SESSION_COOKIE_NAME,
    ENV_PREFIX, ENV_SEPARATOR, routes,
};
use crate::authentication::{CasAttributeSettings, CasProtocol};

const MIN_POLL_INTERVAL_MS: u64 = 100;
const MAX_POLL_INTERVAL_MS: u64 = 500;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Everything the CAS gateway needs to run.
///
/// Loaded from `config/base.json`, then overridden by `CASGATE__`-prefixed
/// environment variables (`CASGATE__CAS__LOGIN_URL=...`).
#[derive(Debug, Clone, Deserialize)]
pub struct CasGateSettings {
    pub server: ServerSettings,
    pub cas: CasSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub client: ClientSettings,
    #[serde(default)]
    pub redis: Option<RedisSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub address: String,
    pub default_landing_url: Destination,
    /// Send anonymous HTML page views of the host through CAS login.
    #[serde(default)]
    pub force_login: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CasSettings {
    /// Base URL of the CAS server, e.g. `https://cas.example.com/cas`.
    pub server_url_prefix: String,
    pub login_url: String,
    pub logout_url: String,
    /// This service's validate URL, as registered with CAS.
    pub service_url: String,
    #[serde(default)]
    pub protocol: CasProtocol,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub attributes: CasAttributeSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub ttl_secs: u64,
    pub redirect_cookie_name: String,
    pub redirect_cookie_max_age_secs: i64,
    pub secure_cookies: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_owned(),
            ttl_secs: 8 * 60 * 60,
            redirect_cookie_name: DEFAULT_REDIRECT_COOKIE_NAME.to_owned(),
            redirect_cookie_max_age_secs: 300,
            secure_cookies: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub layout: HostLayout,
    /// Replaces the layout preset when set.
    pub lookup_chain: Option<LookupChain>,
    pub poll_interval_ms: u64,
    pub warn_after_ms: Option<u64>,
    pub max_attempts: Option<u64>,
    pub script_path: String,
    pub inject_script: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            layout: HostLayout::default(),
            lookup_chain: None,
            poll_interval_ms: 250,
            warn_after_ms: Some(60_000),
            max_attempts: None,
            script_path: routes::LOGOUT_SCRIPT.to_owned(),
            inject_script: true,
        }
    }
}

impl ClientSettings {
    pub fn lookup_chain(&self) -> LookupChain {
        self.lookup_chain
            .clone()
            .unwrap_or_else(|| self.layout.lookup_chain())
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_millis(self.poll_interval_ms),
            warn_after: self.warn_after_ms.map(Duration::from_millis),
            max_attempts: self.max_attempts,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl CasGateSettings {
    /// Load settings from `config/` and the environment, reading `.env` first.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        Self::load_from(CONFIG_DIR)
    }

    pub fn load_from(config_dir: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let base = config_dir.as_ref().join(BASE_CONFIG_FILE);
        let builder = Config::builder().add_source(File::from(base).required(true));
        Self::build(builder)
    }

    /// Load from a JSON document plus the environment.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let builder = Config::builder().add_source(File::from_str(json, FileFormat::Json));
        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, SettingsError> {
        let settings: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn cas_request_timeout(&self) -> Duration {
        Duration::from_millis(self.cas.request_timeout_ms)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        require_http_url("cas.server_url_prefix", &self.cas.server_url_prefix)?;
        require_http_url("cas.login_url", &self.cas.login_url)?;
        require_http_url("cas.service_url", &self.cas.service_url)?;
        Destination::parse(&self.cas.logout_url).map_err(|e| SettingsError::Invalid {
            key: "cas.logout_url",
            reason: e.to_string(),
        })?;

        if self.session.cookie_name.trim().is_empty() {
            return Err(invalid("session.cookie_name", "must not be blank"));
        }
        if self.session.redirect_cookie_name.trim().is_empty() {
            return Err(invalid("session.redirect_cookie_name", "must not be blank"));
        }
        if self.session.cookie_name == self.session.redirect_cookie_name {
            return Err(invalid(
                "session.redirect_cookie_name",
                "must differ from session.cookie_name",
            ));
        }

        let interval = self.client.poll_interval_ms;
        if !(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&interval) {
            return Err(invalid(
                "client.poll_interval_ms",
                "must be between 100 and 500",
            ));
        }
        if self.client.max_attempts == Some(0) {
            return Err(invalid(
                "client.max_attempts",
                "must be at least 1, leave unset to poll until found",
            ));
        }
        if !self.client.script_path.starts_with('/') {
            return Err(invalid("client.script_path", "must be an absolute path"));
        }

        Ok(())
    }
}

fn invalid(key: &'static str, reason: &str) -> SettingsError {
    SettingsError::Invalid {
        key,
        reason: reason.to_owned(),
    }
}

fn require_http_url(key: &'static str, value: &str) -> Result<(), SettingsError> {
    match reqwest::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        Ok(_) => Err(invalid(key, "must be an http(s) URL")),
        Err(e) => Err(SettingsError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}
