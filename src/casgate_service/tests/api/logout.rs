use crate::helpers::{SESSION_ID, TestApp, location, set_cookies};

#[tokio::test]
async fn logout_clears_session_and_redirects_to_cas() {
    let app = TestApp::new().await;
    let session_id = app.seed_session("ST-123-valid", "jdoe").await;

    let response = app
        .get("/cas/logout", Some(&format!("casgate_session={SESSION_ID}")))
        .await;

    assert_eq!(response.status().as_u16(), 302);
    let expected = format!("{}/cas/logout", app.cas_server.uri());
    assert_eq!(location(&response), Some(expected.as_str()));
    assert!(
        set_cookies(&response)
            .iter()
            .any(|cookie| cookie.starts_with("casgate_session=;"))
    );
    assert_eq!(app.current_login(&session_id).await, None);
}

#[tokio::test]
async fn logout_without_session_still_redirects() {
    let app = TestApp::new().await;

    let response = app.get("/cas/logout", None).await;

    assert_eq!(response.status().as_u16(), 302);
}
