use crate::helpers::{TestApp, logout_request};

fn form(xml: &str) -> String {
    format!("logoutRequest={}", urlencoding::encode(xml))
}

#[tokio::test]
async fn logout_notice_ends_the_bound_session() {
    let app = TestApp::new().await;
    let session_id = app.seed_session("ST-123-valid", "jdoe").await;

    let response = app
        .post_logout_request(form(&logout_request("ST-123-valid")))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(app.current_login(&session_id).await, None);
}

#[tokio::test]
async fn unknown_ticket_is_acknowledged() {
    let app = TestApp::new().await;
    let session_id = app.seed_session("ST-123-valid", "jdoe").await;

    let response = app
        .post_logout_request(form(&logout_request("ST-404-unknown")))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(app.current_login(&session_id).await.as_deref(), Some("jdoe"));
}

#[tokio::test]
async fn malformed_notice_is_rejected() {
    let app = TestApp::new().await;

    let response = app.post_logout_request(form("<LogoutRequest>")).await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app.post_logout_request("something=else".to_owned()).await;
    assert_eq!(response.status().as_u16(), 400);
}
