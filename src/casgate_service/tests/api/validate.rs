use casgate_core::{SessionId, SessionStore};

use crate::helpers::{SESSION_ID, TestApp, location, session_cookie, set_cookies};

#[tokio::test]
async fn valid_ticket_logs_in_and_returns_to_recorded_destination() {
    let app = TestApp::new().await;
    app.accept_ticket("ST-123-valid", "jdoe").await;

    let response = app
        .get(
            "/cas/validate?ticket=ST-123-valid",
            Some(&format!(
                "casgate_session={SESSION_ID}; casgate_redirect=%2Fdashboard"
            )),
        )
        .await;

    assert_eq!(response.status().as_u16(), 302);
    assert_eq!(location(&response), Some("/dashboard"));
    assert!(
        set_cookies(&response)
            .iter()
            .any(|cookie| cookie.starts_with("casgate_redirect=;"))
    );

    let issued = session_cookie(&response).expect("login must issue a session cookie");
    assert_eq!(app.current_login(&issued).await.as_deref(), Some("jdoe"));
    let state = app.session_store.load(&issued).await.unwrap();
    assert!(state.cas_assertion.is_none());
}

#[tokio::test]
async fn login_with_planted_session_id_does_not_authenticate_it() {
    let app = TestApp::new().await;
    app.accept_ticket("ST-123-valid", "jdoe").await;
    let planted = "11111111-1111-4111-8111-111111111111";

    let response = app
        .get(
            "/cas/validate?ticket=ST-123-valid",
            Some(&format!("casgate_session={planted}")),
        )
        .await;

    let issued = session_cookie(&response).expect("login must issue a session cookie");
    assert_ne!(issued.as_str(), planted);
    assert_eq!(app.current_login(&issued).await.as_deref(), Some("jdoe"));
    let planted = SessionId::parse(planted).unwrap();
    assert_eq!(app.current_login(&planted).await, None);
}

#[tokio::test]
async fn cas_outage_leaves_session_anonymous_and_lands_on_default_page() {
    let app = TestApp::new().await;
    // No mock mounted: wiremock answers 404, which is a collaborator fault
    app.seed_session("ST-1-previous", "jdoe").await;

    let response = app
        .get(
            "/cas/validate?ticket=ST-999-expired",
            Some(&format!("casgate_session={SESSION_ID}")),
        )
        .await;

    assert_eq!(response.status().as_u16(), 302);
    assert_eq!(location(&response), Some("/"));
    let session_id = SessionId::parse(SESSION_ID).unwrap();
    assert_eq!(app.current_login(&session_id).await, None);
}

#[tokio::test]
async fn missing_ticket_redirects_without_calling_cas() {
    let app = TestApp::new().await;

    let response = app.get("/cas/validate", None).await;

    assert_eq!(response.status().as_u16(), 302);
    assert_eq!(location(&response), Some("/"));
    assert!(
        set_cookies(&response)
            .iter()
            .any(|cookie| cookie.starts_with("casgate_session="))
    );
    assert!(app.cas_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn off_site_redirect_cookie_is_ignored() {
    let app = TestApp::new().await;
    app.accept_ticket("ST-123-valid", "jdoe").await;

    let response = app
        .get(
            "/cas/validate?ticket=ST-123-valid",
            Some(&format!(
                "casgate_session={SESSION_ID}; casgate_redirect=https%3A%2F%2Fevil.example.com%2F"
            )),
        )
        .await;

    assert_eq!(location(&response), Some("/"));
}
