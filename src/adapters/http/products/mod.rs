//! HTTP adapter for product endpoints.
//!
//! - `GET /api/products` - Paged listing with search, category and status filters
//! - `GET /api/products/:id` - One product
//! - `POST /api/products` - Create (admin)
//! - `PUT /api/products/:id` - Update (admin)
//! - `DELETE /api/products/:id` - Delete (admin)
//! - `PUT /api/products/bulk/stock` - Bulk stock levels (admin)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{ProductApiError, ProductAppState};
pub use routes::product_routes;
