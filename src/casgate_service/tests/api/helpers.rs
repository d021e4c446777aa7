use axum::{Router, response::Html, routing::get};
use casgate_adapters::{
    CasAttributeSettings, CasGateSettings, CasProtocol, CasTicketValidator, HashMapSessionStore,
    config::test,
};
use casgate_core::{Identity, ServiceTicket, SessionId, SessionStore};
use casgate_service::CasService;
use reqwest::{Response, redirect::Policy};
use tokio::net::TcpListener;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

pub const SESSION_ID: &str = "5f0c6a3e-2d7b-4b8e-9a51-0c1f3b7d9e42";
pub const SCRIPT_TAG: &str = "<script type='text/javascript' src='/js/casLogoutUrl.js'></script>";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub cas_server: MockServer,
    pub session_store: HashMapSessionStore,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::spawn(false).await
    }

    /// An app whose host pages require a CAS session.
    pub async fn with_force_login() -> Self {
        Self::spawn(true).await
    }

    async fn spawn(force_login: bool) -> Self {
        let cas_server = MockServer::start().await;
        let listener = TcpListener::bind(test::APP_ADDRESS).await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());

        let settings = CasGateSettings::from_json(&settings_json(&cas_server.uri(), &address, force_login))
            .expect("Failed to load test settings");

        let cas_client = reqwest::Client::builder()
            .timeout(test::cas_client::TIMEOUT)
            .build()
            .unwrap();
        let authenticator = CasTicketValidator::new(
            settings.cas.server_url_prefix.clone(),
            CasProtocol::Cas3,
            CasAttributeSettings::default(),
            cas_client,
        );
        let session_store = HashMapSessionStore::default();

        let service = CasService::new(&settings, authenticator, session_store.clone())
            .expect("Failed to build CAS service")
            .with_host_router(host_router());

        tokio::spawn(service.run_standalone(listener));

        let http_client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap();

        Self {
            address,
            http_client,
            cas_server,
            session_store,
        }
    }

    pub fn service_url(&self) -> String {
        format!("{}/cas/validate", self.address)
    }

    pub async fn get(&self, route: &str, cookies: Option<&str>) -> Response {
        let mut request = self
            .http_client
            .get(format!("{}{}", self.address, route))
            .header("accept", "text/html");
        if let Some(cookies) = cookies {
            request = request.header("cookie", cookies);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn post_logout_request(&self, body: String) -> Response {
        self.http_client
            .post(self.service_url())
            .header("content-type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Have the mock CAS server accept `ticket` for `user`.
    pub async fn accept_ticket(&self, ticket: &str, user: &str) {
        Mock::given(method("GET"))
            .and(path("/cas/p3/serviceValidate"))
            .and(query_param("ticket", ticket))
            .and(query_param("service", self.service_url()))
            .respond_with(ResponseTemplate::new(200).set_body_string(success_response(user)))
            .mount(&self.cas_server)
            .await;
    }

    /// Log `SESSION_ID` in as `user`, bound to `ticket`.
    pub async fn seed_session(&self, ticket: &str, user: &str) -> SessionId {
        let session_id = SessionId::parse(SESSION_ID).unwrap();
        self.session_store
            .set_current_user(&session_id, Some(Identity::new(user).unwrap()))
            .await
            .unwrap();
        self.session_store
            .bind_ticket(&ServiceTicket::parse(ticket).unwrap(), &session_id)
            .await
            .unwrap();
        session_id
    }

    pub async fn current_login(&self, session_id: &SessionId) -> Option<String> {
        self.session_store
            .load(session_id)
            .await
            .unwrap()
            .current_user
            .map(|user| user.login().to_owned())
    }
}

pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
}

pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_owned)
        .collect()
}

/// The session id issued by `response`, if it set one.
pub fn session_cookie(response: &Response) -> Option<SessionId> {
    set_cookies(response)
        .iter()
        .find_map(|cookie| cookie.strip_prefix("casgate_session="))
        .and_then(|rest| rest.split(';').next())
        .and_then(|value| SessionId::parse(value).ok())
}

pub fn logout_request(ticket: &str) -> String {
    format!(
        r#"<samlp:LogoutRequest xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol" xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion" ID="LR-1" Version="2.0" IssueInstant="2026-10-19T08:00:00Z"><saml:NameID>@NOT_USED@</saml:NameID><samlp:SessionIndex>{ticket}</samlp:SessionIndex></samlp:LogoutRequest>"#
    )
}

fn success_response(user: &str) -> String {
    format!(
        r#"<cas:serviceResponse xmlns:cas="http://www.yale.edu/tp/cas">
    <cas:authenticationSuccess>
        <cas:user>{user}</cas:user>
        <cas:attributes>
            <cas:cn>Jane Doe</cas:cn>
            <cas:groups>staff</cas:groups>
        </cas:attributes>
    </cas:authenticationSuccess>
</cas:serviceResponse>"#
    )
}

fn host_router() -> Router {
    Router::new()
        .route("/", get(|| async { Html("<html><body>home</body></html>") }))
        .route(
            "/dashboard",
            get(|| async { Html("<html><body>dashboard</body></html>") }),
        )
}

fn settings_json(cas_uri: &str, address: &str, force_login: bool) -> String {
    format!(
        r#"{{
            "server": {{
                "address": "{APP}",
                "default_landing_url": "/",
                "force_login": {force_login}
            }},
            "cas": {{
                "server_url_prefix": "{cas_uri}/cas",
                "login_url": "{cas_uri}/cas/login",
                "logout_url": "{cas_uri}/cas/logout",
                "service_url": "{address}/cas/validate"
            }},
            "session": {{ "secure_cookies": false }}
        }}"#,
        APP = test::APP_ADDRESS,
    )
}
