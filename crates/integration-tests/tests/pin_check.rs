//! Keypad and PIN verification over HTTP.

use pin_gate_integration_tests::{TestApp, location, messages};

#[tokio::test]
async fn test_matching_pin_shows_description() {
    let app = TestApp::spawn().await;
    app.seed_pin("123456", Some("VIP")).await;

    app.press("123456").await;
    let response = app.post_form("/pin/check", &[]).await;
    assert_eq!(location(&response), Some("/pin"));

    let page = app.page("/pin").await;
    assert!(page.contains(r#"aria-label="success""#));
    assert!(page.contains(r#"<p class="pin-description">VIP</p>"#));
    assert_eq!(page.matches(r#"class="slot filled success""#).count(), 6);
}

#[tokio::test]
async fn test_matching_pin_without_description() {
    let app = TestApp::spawn().await;
    app.seed_pin("246810", None).await;

    app.press("246810").await;
    app.post_form("/pin/check", &[]).await;

    let page = app.page("/pin").await;
    assert!(page.contains(r#"aria-label="success""#));
    assert!(page.contains(messages::PIN_MATCH));
    assert!(!page.contains("pin-description"));
}

#[tokio::test]
async fn test_unknown_pin_fails() {
    let app = TestApp::spawn().await;
    app.seed_pin("123456", Some("VIP")).await;

    app.press("000000").await;
    app.post_form("/pin/check", &[]).await;

    let page = app.page("/pin").await;
    assert!(page.contains(r#"aria-label="failure""#));
    assert!(page.contains(messages::PIN_MISMATCH));
    assert!(!page.contains("VIP"));
    assert_eq!(page.matches(r#"class="slot filled failure""#).count(), 6);
}

#[tokio::test]
async fn test_deactivated_pin_no_longer_matches() {
    let app = TestApp::spawn().await;
    let record = app.seed_pin("135790", Some("Guest")).await;
    pin_gate_web::db::PinCodeRepository::new(&app.db)
        .deactivate(record.id)
        .await
        .expect("deactivate");

    app.press("135790").await;
    app.post_form("/pin/check", &[]).await;

    let page = app.page("/pin").await;
    assert!(page.contains(r#"aria-label="failure""#));
    assert!(!page.contains("Guest"));
}

#[tokio::test]
async fn test_incomplete_entry_is_not_checked() {
    let app = TestApp::spawn().await;

    app.press("123").await;
    let page = app.page("/pin").await;
    assert!(page.contains(r#"class="button-primary" disabled"#));

    app.post_form("/pin/check", &[]).await;
    let page = app.page("/pin").await;
    assert!(page.contains(messages::PIN_INCOMPLETE));
    assert!(!page.contains("aria-label=\"failure\""));
    assert_eq!(page.matches(r#"class="slot filled""#).count(), 3);
}

#[tokio::test]
async fn test_seventh_digit_is_ignored() {
    let app = TestApp::spawn().await;
    app.seed_pin("123456", None).await;

    app.press("1234567").await;
    app.post_form("/pin/check", &[]).await;

    let page = app.page("/pin").await;
    assert!(page.contains(r#"aria-label="success""#));
}

#[tokio::test]
async fn test_non_digit_key_is_ignored() {
    let app = TestApp::spawn().await;

    app.post_form("/pin/digit", &[("digit", "x")]).await;
    app.post_form("/pin/digit", &[("digit", "12")]).await;

    let page = app.page("/pin").await;
    assert_eq!(page.matches(r#"class="slot filled""#).count(), 0);
}

#[tokio::test]
async fn test_clear_resets_entry_and_result() {
    let app = TestApp::spawn().await;

    app.press("000000").await;
    app.post_form("/pin/check", &[]).await;
    // Consume the failure notification.
    app.page("/pin").await;

    let response = app.post_form("/pin/clear", &[]).await;
    assert_eq!(location(&response), Some("/pin"));

    let page = app.page("/pin").await;
    assert!(!page.contains("slot filled"));
    assert!(!page.contains("aria-label=\"failure\""));
}

#[tokio::test]
async fn test_notification_shows_once() {
    let app = TestApp::spawn().await;

    app.press("000000").await;
    app.post_form("/pin/check", &[]).await;

    assert!(app.page("/pin").await.contains(messages::PIN_MISMATCH));
    assert!(!app.page("/pin").await.contains(messages::PIN_MISMATCH));
}

#[tokio::test]
async fn test_entries_are_per_browser() {
    let app = TestApp::spawn().await;
    let other = app.new_session();

    app.press("123").await;

    let page = other.page("/pin").await;
    assert_eq!(page.matches("slot filled").count(), 0);
}
