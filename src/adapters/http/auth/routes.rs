//! Axum router configuration for auth endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{change_password, login, me, AuthAppState};

/// Create the auth router, mounted at `/api/auth`.
///
/// - `POST /login` - Public
/// - `GET /me` - Authenticated
/// - `PUT /change-password` - Authenticated
pub fn auth_routes() -> Router<AuthAppState> {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/change-password", put(change_password))
}
