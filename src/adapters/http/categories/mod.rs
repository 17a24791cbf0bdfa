//! HTTP adapter for category endpoints.
//!
//! - `GET /api/categories` - Listing, nested by default
//! - `GET /api/categories/:id` - One category with subcategories
//! - `GET /api/categories/:id/subcategories` - Direct children
//! - `POST /api/categories` - Create (admin)
//! - `PUT /api/categories/:id` - Update (admin)
//! - `DELETE /api/categories/:id` - Delete (admin)
//! - `PUT /api/categories/reorder` - Reorder (admin)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{CategoryApiError, CategoryAppState};
pub use routes::category_routes;
