//! HTTP adapter for auth endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{AuthApiError, AuthAppState};
pub use routes::auth_routes;
