use axum_extra::extract::cookie::{Cookie, SameSite};
use casgate_core::{CasRequest, Destination, SessionId};

use crate::config::SessionSettings;

/// Builds the cookies the CAS routes hand out.
///
/// All cookies are HTTP-only, `SameSite=Lax` and scoped to `/`.
#[derive(Debug, Clone)]
pub struct CookieFactory {
    session_cookie_name: String,
    redirect_cookie_name: String,
    redirect_max_age: time::Duration,
    secure: bool,
}

impl CookieFactory {
    pub fn new(settings: &SessionSettings) -> Self {
        Self {
            session_cookie_name: settings.cookie_name.clone(),
            redirect_cookie_name: settings.redirect_cookie_name.clone(),
            redirect_max_age: time::Duration::seconds(settings.redirect_cookie_max_age_secs),
            secure: settings.secure_cookies,
        }
    }

    pub fn session_cookie_name(&self) -> &str {
        &self.session_cookie_name
    }

    pub fn redirect_cookie_name(&self) -> &str {
        &self.redirect_cookie_name
    }

    pub fn session(&self, session_id: &SessionId) -> Cookie<'static> {
        self.build(self.session_cookie_name.clone(), session_id.to_string())
    }

    /// Remember `destination` for the trip back from CAS.
    pub fn redirect(&self, destination: &Destination) -> Cookie<'static> {
        let value = urlencoding::encode(destination.as_str()).into_owned();
        let mut cookie = self.build(self.redirect_cookie_name.clone(), value);
        cookie.set_max_age(self.redirect_max_age);
        cookie
    }

    pub fn redirect_removal(&self) -> Cookie<'static> {
        self.removal(self.redirect_cookie_name.clone())
    }

    pub fn session_removal(&self) -> Cookie<'static> {
        self.removal(self.session_cookie_name.clone())
    }

    fn removal(&self, name: String) -> Cookie<'static> {
        let mut cookie = self.build(name, String::new());
        cookie.make_removal();
        cookie
    }

    fn build(&self, name: String, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build()
    }
}

/// Session id carried by the request, if it has a well-formed one.
pub fn read_session_id<R: CasRequest>(request: &R, cookie_name: &str) -> Option<SessionId> {
    request
        .cookie(cookie_name)
        .and_then(|raw| SessionId::parse(raw).ok())
}
