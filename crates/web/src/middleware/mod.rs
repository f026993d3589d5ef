//! HTTP middleware stack.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions, `PostgreSQL` or memory store)
//! 5. Security headers (CSP, frame denial, etc.)
//!
//! The admin guard is an extractor ([`RequireAdminAuth`]) applied per handler.

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{
    AdminAuthRejection, GuardState, LOGIN_PATH, LoadingTemplate, OptionalAdminAuth,
    RequireAdminAuth, clear_current_admin, get_current_admin, set_current_admin,
};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{
    AdminSessionStore, SESSION_COOKIE_NAME, admin_expiry, create_session_layer, visitor_expiry,
};
