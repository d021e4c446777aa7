pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    CasGateSettings, CasSettings, ClientSettings, RedisSettings, ServerSettings, SessionSettings,
    SettingsError,
};
