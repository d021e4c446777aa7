use crate::helpers::{SCRIPT_TAG, TestApp};

#[tokio::test]
async fn script_is_served_as_javascript() {
    let app = TestApp::new().await;

    let response = app.get("/js/casLogoutUrl.js", None).await;

    assert_eq!(response.status().as_u16(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(
        content_type.as_deref(),
        Some("application/javascript; charset=utf-8")
    );
    let body = response.text().await.unwrap();
    assert!(body.contains(r#"var logoutUrl = "/cas/logout";"#));
}

#[tokio::test]
async fn host_pages_get_the_script_tag() {
    let app = TestApp::new().await;

    let body = app.get("/dashboard", None).await.text().await.unwrap();

    assert_eq!(body, format!("<html><body>dashboard</body></html>{SCRIPT_TAG}"));
}

#[tokio::test]
async fn non_html_clients_get_the_page_untouched() {
    let app = TestApp::new().await;

    let body = app
        .http_client
        .get(format!("{}/dashboard", app.address))
        .header("accept", "application/json")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(!body.contains("casLogoutUrl"));
}
