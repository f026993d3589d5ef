//! Probes, static assets and response headers.

use reqwest::StatusCode;

use pin_gate_integration_tests::TestApp;

#[tokio::test]
async fn test_health_probes() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.expect("body"), "ok");

    assert_eq!(app.get("/health/ready").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_home_links_both_pages() {
    let app = TestApp::spawn().await;

    let page = app.page("/").await;
    assert!(page.contains(r#"href="/pin""#));
    assert!(page.contains(r#"href="/admin""#));
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let app = TestApp::spawn().await;

    let response = app.get("/pin").await;
    let headers = response.headers();
    assert!(headers.contains_key("content-security-policy"));
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_stylesheet_served() {
    let app = TestApp::spawn().await;

    let response = app.get("/static/app.css").await;
    assert_eq!(response.status(), StatusCode::OK);
}
