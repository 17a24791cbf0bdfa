//! Axum router configuration for category endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{
    create_category, delete_category, get_category, list_categories, list_subcategories,
    reorder_categories, update_category, CategoryAppState,
};

/// Create the category API router, mounted at `/api/categories`.
///
/// # Routes
///
/// ## Authenticated
/// - `GET /` - Listing (`?include_subcategories=false` for top level only)
/// - `GET /:id` - One category with subcategories
/// - `GET /:id/subcategories` - Direct children
///
/// ## Admin only
/// - `POST /` - Create
/// - `PUT /reorder` - Bulk sort order
/// - `PUT /:id` - Update
/// - `DELETE /:id` - Delete
pub fn category_routes() -> Router<CategoryAppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/reorder", put(reorder_categories))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/:id/subcategories", get(list_subcategories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCatalogStore;
    use std::sync::Arc;

    #[test]
    fn category_routes_creates_router() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let state = CategoryAppState {
            reader: store.clone(),
            repository: store,
        };
        let _: Router<()> = category_routes().with_state(state);
    }
}
