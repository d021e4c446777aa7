use crate::helpers::{TestApp, location, set_cookies};

#[tokio::test]
async fn login_redirects_to_cas_with_service_and_records_destination() {
    let app = TestApp::new().await;

    let response = app.get("/cas/login?return_to=%2Fdashboard", None).await;

    assert_eq!(response.status().as_u16(), 302);
    let expected = format!(
        "{}/cas/login?service={}",
        app.cas_server.uri(),
        urlencoding::encode(&app.service_url())
    );
    assert_eq!(location(&response), Some(expected.as_str()));
    assert!(
        set_cookies(&response)
            .iter()
            .any(|cookie| cookie.starts_with("casgate_redirect=%2Fdashboard"))
    );
}

#[tokio::test]
async fn login_drops_off_site_return_to() {
    let app = TestApp::new().await;

    let response = app
        .get("/cas/login?return_to=https%3A%2F%2Fevil.example.com", None)
        .await;

    assert_eq!(response.status().as_u16(), 302);
    assert!(set_cookies(&response).is_empty());
}
