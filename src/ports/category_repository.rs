//! Category repository port (write side).

use async_trait::async_trait;

use crate::domain::catalog::{CategoryDraft, SortPosition};
use crate::domain::foundation::{CategoryId, DomainError};

/// Write operations and guard queries for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Inserts a category and returns its new id.
    ///
    /// # Errors
    ///
    /// - `DuplicateCategory` if the name or slug is taken
    /// - `DatabaseError` on persistence failure
    async fn create(&self, draft: &CategoryDraft) -> Result<CategoryId, DomainError>;

    /// Replaces every editable field of a category.
    ///
    /// # Errors
    ///
    /// - `CategoryNotFound` if the category doesn't exist
    /// - `DuplicateCategory` if the name or slug is taken
    async fn update(&self, id: CategoryId, draft: &CategoryDraft) -> Result<(), DomainError>;

    /// Deletes a category.
    ///
    /// # Errors
    ///
    /// - `CategoryNotFound` if the category doesn't exist
    async fn delete(&self, id: CategoryId) -> Result<(), DomainError>;

    /// Applies all sort positions atomically.
    ///
    /// Positions naming unknown ids are skipped.
    async fn reorder(&self, positions: &[SortPosition]) -> Result<(), DomainError>;

    /// Check if a category exists.
    async fn exists(&self, id: CategoryId) -> Result<bool, DomainError>;

    /// Parent of a category: `None` if missing, `Some(None)` for a root.
    async fn parent_of(&self, id: CategoryId) -> Result<Option<Option<CategoryId>>, DomainError>;

    /// Products assigned to the category, active or not.
    async fn count_products(&self, id: CategoryId) -> Result<u64, DomainError>;

    /// Direct subcategories of the category.
    async fn count_subcategories(&self, id: CategoryId) -> Result<u64, DomainError>;
}
