//! Product repository port (write side).

use async_trait::async_trait;

use crate::domain::catalog::{ProductDraft, StockUpdate};
use crate::domain::foundation::{DomainError, ProductId};

/// Write operations for products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Inserts a product and returns its new id.
    ///
    /// # Errors
    ///
    /// - `DuplicateProduct` if the SKU is taken
    /// - `DatabaseError` on persistence failure
    async fn create(&self, draft: &ProductDraft) -> Result<ProductId, DomainError>;

    /// Replaces every editable field of a product.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if the product doesn't exist
    /// - `DuplicateProduct` if the SKU is taken
    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<(), DomainError>;

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if the product doesn't exist
    async fn delete(&self, id: ProductId) -> Result<(), DomainError>;

    /// Applies all stock levels atomically.
    ///
    /// Updates naming unknown ids are skipped.
    async fn update_stock(&self, updates: &[StockUpdate]) -> Result<(), DomainError>;
}
