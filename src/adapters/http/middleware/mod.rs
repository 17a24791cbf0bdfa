//! HTTP middleware for axum.
//!
//! - `auth` - Bearer token middleware plus the `RequireAuth` and
//!   `RequireAdmin` extractors

pub mod auth;

pub use auth::{auth_middleware, AuthRejection, AuthState, RequireAdmin, RequireAuth};
