//! Admin login, logout and the dashboard guard.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use reqwest::StatusCode;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, SessionStore};
use tower_sessions::MemoryStore;

use pin_gate_core::StoredCredential;
use pin_gate_integration_tests::{
    ADMIN_EMAIL, ADMIN_PASSWORD, SESSION_COOKIE_NAME, TestApp, location, messages,
    session_cookie_max_age, session_cookie_value,
};

#[tokio::test]
async fn test_dashboard_requires_login() {
    let app = TestApp::spawn().await;

    let response = app.get("/admin").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/admin/login"));
}

#[tokio::test]
async fn test_login_opens_dashboard() {
    let app = TestApp::with_admin().await;

    let response = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(location(&response), Some("/admin"));

    let response = app.get("/admin").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = response.text().await.expect("body");
    assert!(page.contains(ADMIN_EMAIL));
    assert!(page.contains(messages::LOGIN_WELCOME));
}

#[tokio::test]
async fn test_login_accepts_plaintext_row() {
    let app = TestApp::spawn().await;
    app.seed_admin(
        "legacy@system.com",
        &StoredCredential::from_stored("admin1234".to_owned()),
    )
    .await;

    let response = app.login("legacy@system.com", "admin1234").await;
    assert_eq!(location(&response), Some("/admin"));
}

#[tokio::test]
async fn test_login_errors_do_not_reveal_which_field() {
    let app = TestApp::with_admin().await;

    let unknown = app.login("nobody@system.com", ADMIN_PASSWORD).await;
    let wrong = app.login(ADMIN_EMAIL, "not-the-password").await;
    let malformed = app.login("not-an-email", ADMIN_PASSWORD).await;

    assert_eq!(location(&unknown), location(&wrong));
    assert_eq!(location(&unknown), location(&malformed));
    assert_eq!(location(&unknown), Some("/admin/login?error=invalid"));

    let page = app.page("/admin/login?error=invalid").await;
    assert!(page.contains(messages::LOGIN_INVALID));

    assert_eq!(
        location(&app.get("/admin").await),
        Some("/admin/login"),
        "failed login must not authenticate"
    );
}

#[tokio::test]
async fn test_login_page_redirects_when_signed_in() {
    let app = TestApp::with_admin().await;
    app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = app.get("/admin/login").await;
    assert_eq!(location(&response), Some("/admin"));
}

#[tokio::test]
async fn test_logout_returns_to_login() {
    let app = TestApp::with_admin().await;
    app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = app.post_form("/admin/logout", &[]).await;
    assert_eq!(location(&response), Some("/admin/login"));

    let page = app.page("/admin/login").await;
    assert!(page.contains(messages::LOGOUT_THANKS));

    let response = app.get("/admin").await;
    assert_eq!(location(&response), Some("/admin/login"));
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let app = TestApp::with_admin().await;

    let response = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let cookie = response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(SESSION_COOKIE_NAME))
        .expect("session cookie set on login")
        .to_owned();

    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_login_issues_new_session_id() {
    let app = TestApp::with_admin().await;

    let response = app.post_form("/pin/digit", &[("digit", "1")]).await;
    let visitor_id = session_cookie_value(&response).expect("visitor session cookie");

    let response = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let admin_id = session_cookie_value(&response).expect("session cookie set on login");
    assert_ne!(admin_id, visitor_id);
}

#[tokio::test]
async fn test_visitor_sessions_are_short_lived() {
    const DAY: i64 = 24 * 60 * 60;
    let app = TestApp::with_admin().await;

    let response = app.post_form("/pin/digit", &[("digit", "1")]).await;
    let visitor = session_cookie_max_age(&response).expect("visitor Max-Age");
    assert!(visitor <= DAY, "visitor session lasts {visitor}s");

    let response = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let admin = session_cookie_max_age(&response).expect("admin Max-Age");
    assert!(admin > 300 * DAY, "admin session lasts {admin}s");

    let response = app.post_form("/admin/logout", &[]).await;
    let after_logout = session_cookie_max_age(&response).expect("Max-Age after logout");
    assert!(after_logout <= DAY, "logged-out session lasts {after_logout}s");
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let app = TestApp::with_admin().await;
    let other = app.new_session();

    app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    assert_eq!(app.get("/admin").await.status(), StatusCode::OK);
    assert_eq!(location(&other.get("/admin").await), Some("/admin/login"));
}

/// Session store whose reads fail while `down` is set.
#[derive(Debug, Clone, Default)]
struct FlakyStore {
    inner: MemoryStore,
    down: Arc<AtomicBool>,
}

impl FlakyStore {
    fn check(&self) -> session_store::Result<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(session_store::Error::Backend("store offline".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FlakyStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        self.check()?;
        self.inner.create(record).await
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.check()?;
        self.inner.save(record).await
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        self.check()?;
        self.inner.load(id).await
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        self.check()?;
        self.inner.delete(id).await
    }
}

#[tokio::test]
async fn test_unreadable_session_shows_loading() {
    let store = FlakyStore::default();
    let down = Arc::clone(&store.down);
    let app = TestApp::spawn_with_store(store).await;
    app.seed_admin(
        ADMIN_EMAIL,
        &StoredCredential::hash(ADMIN_PASSWORD).expect("hash"),
    )
    .await;
    app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    down.store(true, Ordering::SeqCst);
    let response = app.get("/admin").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(location(&response).is_none());
    let page = response.text().await.expect("body");
    assert!(page.contains(messages::LOADING));
    assert!(page.contains(r#"http-equiv="refresh""#));

    down.store(false, Ordering::SeqCst);
    assert_eq!(app.get("/admin").await.status(), StatusCode::OK);
}
