//! Behaviour when the table store cannot be reached.

use reqwest::StatusCode;
use tower_sessions::MemoryStore;

use pin_gate_core::StoredCredential;
use pin_gate_integration_tests::{
    ADMIN_EMAIL, ADMIN_PASSWORD, TestApp, location, messages, unreachable_database,
};
use pin_gate_web::db::Database;

/// A logged-in admin browsing an app whose table store is down.
///
/// The login happens on a healthy app sharing the same session store.
async fn admin_on_unreachable_store() -> TestApp {
    let sessions = MemoryStore::default();

    let healthy = TestApp::spawn_with(Database::memory(), sessions.clone()).await;
    healthy
        .seed_admin(
            ADMIN_EMAIL,
            &StoredCredential::hash(ADMIN_PASSWORD).expect("hash"),
        )
        .await;
    let response = healthy.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(location(&response), Some("/admin"));

    TestApp::spawn_with(unreachable_database(), sessions)
        .await
        .sharing_cookies_with(&healthy)
}

#[tokio::test]
async fn test_check_reports_store_error_as_failure() {
    let app = TestApp::spawn_with_db(unreachable_database()).await;

    app.press("123456").await;
    let response = app.post_form("/pin/check", &[]).await;
    assert_eq!(location(&response), Some("/pin"));

    let page = app.page("/pin").await;
    assert!(page.contains(r#"aria-label="failure""#));
    assert!(page.contains(messages::PIN_CHECK_FAILED));
    assert!(!page.contains(messages::PIN_MISMATCH));
    assert!(!page.contains("pin-description"));
}

#[tokio::test]
async fn test_login_store_error_is_not_invalid_credentials() {
    let app = TestApp::spawn_with_db(unreachable_database()).await;

    let response = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(location(&response), Some("/admin/login?error=failed"));

    let page = app.page("/admin/login?error=failed").await;
    assert!(page.contains(messages::LOGIN_FAILED));
    assert!(!page.contains(messages::LOGIN_INVALID));
    assert_eq!(location(&app.get("/admin").await), Some("/admin/login"));
}

#[tokio::test]
async fn test_dashboard_shows_load_error_instead_of_empty_list() {
    let app = admin_on_unreachable_store().await;

    let response = app.get("/admin").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = response.text().await.expect("body");
    assert!(page.contains(ADMIN_EMAIL));
    assert!(page.contains(messages::PIN_LIST_FAILED));
    assert!(!page.contains("pin-count"));
    assert!(!page.contains(r#"class="muted empty""#));
}

#[tokio::test]
async fn test_add_store_error_shows_generic_toast() {
    let app = admin_on_unreachable_store().await;
    // Consume the welcome notification.
    app.page("/admin").await;

    let response = app
        .post_form("/admin/pins", &[("pin_code", "123456"), ("description", "")])
        .await;
    assert_eq!(location(&response), Some("/admin"));

    let page = app.page("/admin").await;
    assert!(page.contains(messages::PIN_ADD_FAILED));
    assert!(!page.contains(messages::PIN_ADDED));
}

#[tokio::test]
async fn test_deactivate_store_error_shows_generic_toast() {
    let app = admin_on_unreachable_store().await;
    app.page("/admin").await;

    let response = app
        .post_form(
            "/admin/pins/7f8e6c1a-2b3d-4e5f-8a9b-0c1d2e3f4a5b/deactivate",
            &[],
        )
        .await;
    assert_eq!(location(&response), Some("/admin"));

    let page = app.page("/admin").await;
    assert!(page.contains(messages::PIN_DEACTIVATE_FAILED));
    assert!(!page.contains(messages::PIN_DEACTIVATED));
}

#[tokio::test]
async fn test_readiness_fails_without_store() {
    let app = TestApp::spawn_with_db(unreachable_database()).await;

    assert_eq!(app.get("/health").await.status(), StatusCode::OK);
    assert_eq!(
        app.get("/health/ready").await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}
