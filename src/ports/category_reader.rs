//! Category reader port (read side).
//!
//! Read queries return categories decorated by the store: `parent_name` is
//! joined from the parent row and `product_count` is the number of active
//! products assigned directly to the category.

use async_trait::async_trait;

use crate::domain::catalog::Category;
use crate::domain::foundation::{CategoryId, DomainError};

/// Read-side queries over the category hierarchy.
#[async_trait]
pub trait CategoryReader: Send + Sync {
    /// Every category, top-level first, then by `sort_order`, then `name`.
    async fn list_all(&self) -> Result<Vec<Category>, DomainError>;

    /// Top-level categories only, by `sort_order`, then `name`.
    async fn list_top_level(&self) -> Result<Vec<Category>, DomainError>;

    /// Direct children of `parent_id`, by `sort_order`, then `name`.
    async fn list_subcategories(&self, parent_id: CategoryId)
        -> Result<Vec<Category>, DomainError>;

    /// Finds one category.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, DomainError>;
}
