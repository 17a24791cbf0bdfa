//! HTTP adapters - REST API implementations.
//!
//! Each bounded context has its own dto/handlers/routes triplet. The
//! combined router puts the auth middleware in front of everything under
//! `/api`; `/health` stays public.

pub mod auth;
pub mod categories;
pub mod error;
pub mod middleware;
pub mod products;

use std::sync::Arc;

use axum::{routing::get, Router};

pub use auth::{auth_routes, AuthAppState};
pub use categories::{category_routes, CategoryAppState};
pub use error::ErrorResponse;
pub use middleware::{auth_middleware, AuthState};
pub use products::{product_routes, ProductAppState};

use crate::ports::SessionValidator;

/// Builds the full API router.
pub fn api_router(
    categories: CategoryAppState,
    products: ProductAppState,
    auth: AuthAppState,
    validator: Arc<dyn SessionValidator>,
) -> Router {
    let api = Router::new()
        .nest("/categories", category_routes().with_state(categories))
        .nest("/products", product_routes().with_state(products))
        .nest("/auth", auth_routes().with_state(auth))
        .layer(axum::middleware::from_fn_with_state(
            validator,
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
}

async fn health() -> &'static str {
    "ok"
}
