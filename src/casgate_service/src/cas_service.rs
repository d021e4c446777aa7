use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use casgate_adapters::{
    CasGateSettings, CookieDestinationResolver, CookieFactory, LogoutScript, ScriptRenderError,
    config::routes,
};
use casgate_application::{EndSessionUseCase, SessionResolver};
use casgate_axum::{
    ForceLoginState, ScriptTag, force_cas_login, inject_logout_script,
    routes::{
        LoginState, LogoutState, ValidateState, login, logout, logout_script, single_logout,
        validate,
    },
};
use casgate_core::{Authenticator, SessionStore};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The CAS routes of one deployment, ready to be served on their own or
/// merged with the host application's router.
pub struct CasService {
    router: Router,
    script_tag: Option<ScriptTag>,
    force_login: Option<HostLayer>,
}

type HostLayer = Box<dyn FnOnce(Router) -> Router + Send + Sync>;

impl CasService {
    /// Create a new CasService from loaded settings
    ///
    /// # Arguments
    /// * `settings` - Loaded and validated settings
    /// * `authenticator` - Validates CAS tickets (must be Clone)
    /// * `session_store` - Store for the host sessions (must be Clone)
    ///
    /// # Errors
    /// Fails when the logout script cannot be rendered from the client settings.
    pub fn new<A, S>(
        settings: &CasGateSettings,
        authenticator: A,
        session_store: S,
    ) -> Result<Self, ScriptRenderError>
    where
        A: Authenticator + Clone + 'static,
        S: SessionStore + Clone + 'static,
    {
        let cookies = CookieFactory::new(&settings.session);
        let destinations = CookieDestinationResolver::new(
            settings.session.redirect_cookie_name.clone(),
            &settings.cas.service_url,
        );
        let force_login = settings.server.force_login.then(|| {
            let state = ForceLoginState {
                session_store: session_store.clone(),
                cas_login_url: settings.cas.login_url.clone(),
                service_url: settings.cas.service_url.clone(),
                destinations: destinations.clone(),
                cookies: cookies.clone(),
                exempt_paths: [
                    routes::VALIDATE,
                    routes::LOGIN,
                    routes::LOGOUT,
                    settings.client.script_path.as_str(),
                ]
                .map(str::to_owned)
                .into(),
            };
            Box::new(move |host: Router| {
                host.layer(middleware::from_fn_with_state(state, force_cas_login::<S>))
            }) as HostLayer
        });
        let end_session = Arc::new(EndSessionUseCase::new(session_store.clone()));
        let resolver = Arc::new(SessionResolver::new(
            authenticator,
            session_store,
            destinations.clone(),
            settings.cas.service_url.clone(),
            settings.server.default_landing_url.clone(),
        ));

        let script = LogoutScript::render(
            routes::LOGOUT,
            &settings.client.lookup_chain(),
            &settings.client.poll_config(),
        )?;
        let script_tag = settings
            .client
            .inject_script
            .then(|| ScriptTag::new(LogoutScript::tag(&settings.client.script_path)));

        let router = Router::new()
            // The service URL takes the browser's ticket and CAS's logout notices
            .route(
                routes::VALIDATE,
                get(validate::<A, S>).post(single_logout::<A, S>),
            )
            .with_state(ValidateState {
                resolver,
                end_session: end_session.clone(),
                cookies: cookies.clone(),
            })
            .route(routes::LOGIN, get(login))
            .with_state(LoginState {
                cas_login_url: settings.cas.login_url.clone(),
                service_url: settings.cas.service_url.clone(),
                destinations,
                cookies: cookies.clone(),
            })
            .route(routes::LOGOUT, get(logout::<S>).post(logout::<S>))
            .with_state(LogoutState {
                end_session,
                cas_logout_url: settings.cas.logout_url.clone(),
                cookies,
            })
            .route(&settings.client.script_path, get(logout_script))
            .with_state(script);

        Ok(Self {
            router,
            script_tag,
            force_login,
        })
    }

    /// Put the host application's routes behind the CAS routes.
    ///
    /// Script injection, when enabled, applies to the host's pages. With
    /// `server.force_login` set, the host's pages also require a CAS session.
    pub fn with_host_router(mut self, host: Router) -> Self {
        let host = match self.force_login.take() {
            Some(force_login) => force_login(host),
            None => host,
        };
        self.router = self.router.merge(host);
        self
    }

    fn with_script_injection(mut self) -> Self {
        if let Some(tag) = self.script_tag.take() {
            self.router = self
                .router
                .layer(middleware::from_fn_with_state(tag, inject_logout_script));
        }
        self
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the CasService into a router that can be mounted on another router
    pub fn as_nested_router(self) -> Router {
        self.with_script_injection().with_trace_layer().router
    }

    /// Run the CAS service as a standalone server
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.as_nested_router();

        tracing::info!("CAS gateway listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
