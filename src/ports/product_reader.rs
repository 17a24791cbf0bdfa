//! Product reader port (read side).
//!
//! Products come back decorated with `category_name` and
//! `parent_category_name`, newest first.

use async_trait::async_trait;

use crate::domain::catalog::{Product, ProductFilter, ProductPage};
use crate::domain::foundation::{DomainError, ProductId};

#[async_trait]
pub trait ProductReader: Send + Sync {
    /// One page of products matching `filter`, plus the unpaged match count.
    async fn list(&self, filter: &ProductFilter) -> Result<ProductPage, DomainError>;

    /// Finds one product.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, DomainError>;
}
