//! ListCategoriesHandler - Query handler for the category listing.
//!
//! The nested form groups the flat snapshot under its top-level categories.
//! Categories whose parent is missing from the snapshot appear only in the
//! flat list.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::catalog::{Category, CategoryError, CategoryWithSubcategories};
use crate::domain::foundation::CategoryId;
use crate::ports::{CategoryListing, CategoryReader};

/// Query for the category listing.
#[derive(Debug, Clone, Copy)]
pub struct ListCategoriesQuery {
    pub include_subcategories: bool,
}

impl Default for ListCategoriesQuery {
    fn default() -> Self {
        Self {
            include_subcategories: true,
        }
    }
}

/// Listing in the requested shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCategoriesResult {
    Nested(CategoryListing),
    TopLevel(Vec<Category>),
}

/// Handler for listing categories.
pub struct ListCategoriesHandler {
    reader: Arc<dyn CategoryReader>,
}

impl ListCategoriesHandler {
    pub fn new(reader: Arc<dyn CategoryReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: ListCategoriesQuery,
    ) -> Result<ListCategoriesResult, CategoryError> {
        if !query.include_subcategories {
            let top_level = self.reader.list_top_level().await?;
            return Ok(ListCategoriesResult::TopLevel(top_level));
        }

        let flat = self.reader.list_all().await?;
        let categories = nest(&flat);
        tracing::debug!(
            total = flat.len(),
            top_level = categories.len(),
            "Listed categories"
        );

        Ok(ListCategoriesResult::Nested(CategoryListing {
            categories,
            flat_categories: flat,
        }))
    }
}

/// Groups an ordered flat list into top-level categories with children.
///
/// Input order is preserved for both parents and children.
pub fn nest(flat: &[Category]) -> Vec<CategoryWithSubcategories> {
    let mut roots: Vec<CategoryWithSubcategories> = Vec::new();
    let mut position: HashMap<CategoryId, usize> = HashMap::new();

    for category in flat.iter().filter(|c| c.is_top_level()) {
        position.insert(category.id, roots.len());
        roots.push(CategoryWithSubcategories::new(category.clone(), Vec::new()));
    }

    for category in flat {
        let Some(parent_id) = category.parent_id else {
            continue;
        };
        if let Some(&index) = position.get(&parent_id) {
            roots[index].subcategories.push(category.clone());
        }
    }

    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCatalogStore;
    use crate::domain::catalog::CategoryDraft;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::ports::CategoryRepository;
    use async_trait::async_trait;

    struct FailingReader;

    #[async_trait]
    impl CategoryReader for FailingReader {
        async fn list_all(&self) -> Result<Vec<Category>, DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "Simulated failure"))
        }
        async fn list_top_level(&self) -> Result<Vec<Category>, DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "Simulated failure"))
        }
        async fn list_subcategories(
            &self,
            _parent_id: CategoryId,
        ) -> Result<Vec<Category>, DomainError> {
            Ok(vec![])
        }
        async fn find_by_id(&self, _id: CategoryId) -> Result<Option<Category>, DomainError> {
            Ok(None)
        }
    }

    fn cat(id: i64, parent: Option<i64>) -> Category {
        Category::new(
            CategoryId::new(id),
            parent.map(CategoryId::new),
            format!("C{}", id),
            format!("c{}", id),
        )
    }

    #[test]
    fn nest_attaches_children_in_order_and_drops_orphans() {
        let flat = vec![cat(1, None), cat(2, None), cat(4, Some(1)), cat(3, Some(1)), cat(5, Some(99))];

        let nested = nest(&flat);

        assert_eq!(nested.len(), 2);
        let children: Vec<i64> = nested[0]
            .subcategories
            .iter()
            .map(|c| c.id.as_i64())
            .collect();
        assert_eq!(children, vec![4, 3]);
        assert!(nested[1].subcategories.is_empty());
    }

    #[tokio::test]
    async fn nested_listing_carries_flat_snapshot() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let parent = store.create(&CategoryDraft::new("Apparel", "apparel")).await.unwrap();
        let child = store
            .create(&CategoryDraft::new("Shirts", "shirts").with_parent(parent))
            .await
            .unwrap();
        store.add_active_products(child, 3).await;

        let handler = ListCategoriesHandler::new(store);
        let result = handler.handle(ListCategoriesQuery::default()).await.unwrap();

        let ListCategoriesResult::Nested(listing) = result else {
            panic!("expected nested listing");
        };
        assert_eq!(listing.flat_categories.len(), 2);
        assert_eq!(listing.categories.len(), 1);
        assert_eq!(listing.categories[0].subcategories[0].product_count, Some(3));
    }

    #[tokio::test]
    async fn top_level_listing_excludes_children() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let parent = store.create(&CategoryDraft::new("Apparel", "apparel")).await.unwrap();
        store
            .create(&CategoryDraft::new("Shirts", "shirts").with_parent(parent))
            .await
            .unwrap();

        let handler = ListCategoriesHandler::new(store);
        let result = handler
            .handle(ListCategoriesQuery {
                include_subcategories: false,
            })
            .await
            .unwrap();

        match result {
            ListCategoriesResult::TopLevel(list) => {
                assert_eq!(list.len(), 1);
                assert_eq!(list[0].id, parent);
            }
            other => panic!("expected top-level listing, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn store_failure_is_infrastructure_error() {
        let handler = ListCategoriesHandler::new(Arc::new(FailingReader));
        let err = handler.handle(ListCategoriesQuery::default()).await.unwrap_err();
        assert!(matches!(err, CategoryError::Infrastructure(_)));
    }
}
