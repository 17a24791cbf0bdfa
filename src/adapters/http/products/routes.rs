//! Axum router configuration for product endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{
    create_product, delete_product, get_product, list_products, update_product, update_stock,
    ProductAppState,
};

/// Create the product API router, mounted at `/api/products`.
///
/// # Routes
///
/// ## Authenticated
/// - `GET /` - Listing (`page`, `limit`, `search`, `category`, `status`)
/// - `GET /:id` - One product
///
/// ## Admin only
/// - `POST /` - Create
/// - `PUT /bulk/stock` - Bulk stock levels
/// - `PUT /:id` - Update
/// - `DELETE /:id` - Delete
pub fn product_routes() -> Router<ProductAppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/bulk/stock", put(update_stock))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}
