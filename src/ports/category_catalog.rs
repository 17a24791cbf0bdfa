//! Category catalog port (consumer side).
//!
//! The admin table does not talk to the store directly; it goes through this
//! port, which the REST client implements.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Category, CategoryDraft, CategoryWithSubcategories};
use crate::domain::foundation::{CategoryId, DomainError};

/// Nested listing plus the flat snapshot it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryListing {
    pub categories: Vec<CategoryWithSubcategories>,
    #[serde(default)]
    pub flat_categories: Vec<Category>,
}

/// Remote access to the category store.
#[async_trait]
pub trait CategoryCatalog: Send + Sync {
    /// Top-level categories with subcategories, plus every category flat.
    async fn list_tree(&self) -> Result<CategoryListing, DomainError>;

    /// Top-level categories only.
    async fn list_top_level(&self) -> Result<Vec<Category>, DomainError>;

    async fn create(&self, draft: &CategoryDraft) -> Result<Category, DomainError>;

    async fn update(&self, id: CategoryId, draft: &CategoryDraft) -> Result<Category, DomainError>;

    async fn delete(&self, id: CategoryId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_catalog_is_object_safe() {
        fn _accepts_dyn(_catalog: &dyn CategoryCatalog) {}
    }

    #[test]
    fn listing_tolerates_missing_flat_list() {
        let listing: CategoryListing = serde_json::from_str(r#"{"categories": []}"#).unwrap();
        assert!(listing.flat_categories.is_empty());
    }
}
