use crate::helpers::{TestApp, location, session_cookie, set_cookies};

#[tokio::test]
async fn anonymous_page_view_round_trips_through_cas() {
    let app = TestApp::with_force_login().await;
    app.accept_ticket("ST-123-valid", "jdoe").await;

    let response = app.get("/dashboard", None).await;

    assert_eq!(response.status().as_u16(), 302);
    let expected_login = format!(
        "{}/cas/login?service={}",
        app.cas_server.uri(),
        urlencoding::encode(&app.service_url())
    );
    assert_eq!(location(&response), Some(expected_login.as_str()));
    assert!(
        set_cookies(&response)
            .iter()
            .any(|cookie| cookie.starts_with("casgate_redirect=%2Fdashboard;"))
    );

    let response = app
        .get(
            "/cas/validate?ticket=ST-123-valid",
            Some("casgate_redirect=%2Fdashboard"),
        )
        .await;
    assert_eq!(location(&response), Some("/dashboard"));
    let issued = session_cookie(&response).expect("login must issue a session cookie");

    let response = app
        .get("/dashboard", Some(&format!("casgate_session={issued}")))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains("dashboard"));
}

#[tokio::test]
async fn cas_routes_stay_reachable_without_a_session() {
    let app = TestApp::with_force_login().await;

    let response = app.get("/js/casLogoutUrl.js", None).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.get("/cas/validate", None).await;
    assert_eq!(location(&response), Some("/"));
}

#[tokio::test]
async fn host_pages_are_open_when_force_login_is_off() {
    let app = TestApp::new().await;

    let response = app.get("/dashboard", None).await;
    assert_eq!(response.status().as_u16(), 200);
}
