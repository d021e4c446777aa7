use casgate_core::{ActivationEvent, Navigator};

/// Turns an activation of the host's logout control into a navigation to the
/// CAS logout endpoint.
pub struct LogoutRedirector<N> {
    logout_url: String,
    navigator: N,
}

impl<N: Navigator> LogoutRedirector<N> {
    pub fn new(logout_url: impl Into<String>, navigator: N) -> Self {
        Self {
            logout_url: logout_url.into(),
            navigator,
        }
    }

    pub fn logout_url(&self) -> &str {
        &self.logout_url
    }

    /// Handle one activation of the logout control.
    ///
    /// The host's own logout listeners and the anchor's default action must
    /// not run, so exactly one navigation happens per activation.
    pub fn on_activate(&self, event: &mut dyn ActivationEvent) {
        if !event.stop_immediate_propagation() {
            tracing::debug!("Immediate propagation stop unavailable, stopping propagation only");
            event.stop_propagation();
        }
        event.prevent_default();

        tracing::info!(logout_url = %self.logout_url, "Redirecting logout to CAS");
        self.navigator.navigate(&self.logout_url);
    }
}
