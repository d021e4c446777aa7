pub const CONFIG_DIR: &str = "config";
pub const BASE_CONFIG_FILE: &str = "base";
pub const ENV_PREFIX: &str = "CASGATE";
pub const ENV_SEPARATOR: &str = "__";

pub const DEFAULT_SESSION_COOKIE_NAME: &str = "casgate_session";
pub const DEFAULT_REDIRECT_COOKIE_NAME: &str = "casgate_redirect";

/// Routes served by the CAS integration.
pub mod routes {
    pub const VALIDATE: &str = "/cas/validate";
    pub const LOGIN: &str = "/cas/login";
    pub const LOGOUT: &str = "/cas/logout";
    pub const LOGOUT_SCRIPT: &str = "/js/casLogoutUrl.js";

    /// Query parameter of the login route naming the page to come back to.
    pub const RETURN_TO_PARAMETER: &str = "return_to";
    /// Form field CAS posts single logout notices in.
    pub const LOGOUT_REQUEST_FIELD: &str = "logoutRequest";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";

    pub mod cas_client {
        use std::time::Duration;

        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
