//! UpdateProductHandler - Command handler for replacing a product.

use std::sync::Arc;

use crate::domain::catalog::{Product, ProductDraft, ProductError};
use crate::domain::foundation::ProductId;
use crate::ports::{CategoryRepository, ProductReader, ProductRepository};

use super::create_product::ensure_category;

/// Command to update a product.
#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub id: ProductId,
    pub draft: ProductDraft,
}

/// Handler for updating products.
///
/// Moving a product or toggling `is_active` changes the counts reported on
/// the old and new categories.
pub struct UpdateProductHandler {
    repository: Arc<dyn ProductRepository>,
    reader: Arc<dyn ProductReader>,
    categories: Arc<dyn CategoryRepository>,
}

impl UpdateProductHandler {
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        reader: Arc<dyn ProductReader>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            repository,
            reader,
            categories,
        }
    }

    pub async fn handle(&self, cmd: UpdateProductCommand) -> Result<Product, ProductError> {
        let draft = cmd.draft.validate()?;
        ensure_category(self.categories.as_ref(), &draft).await?;

        self.repository.update(cmd.id, &draft).await?;
        tracing::info!(product_id = %cmd.id, "Product updated");

        self.reader
            .find_by_id(cmd.id)
            .await?
            .ok_or(ProductError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCatalogStore;
    use crate::domain::catalog::CategoryDraft;
    use crate::ports::CategoryReader;

    fn handler(store: &Arc<InMemoryCatalogStore>) -> UpdateProductHandler {
        UpdateProductHandler::new(store.clone(), store.clone(), store.clone())
    }

    #[tokio::test]
    async fn moving_a_product_moves_its_count() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let indoor = CategoryRepository::create(store.as_ref(), &CategoryDraft::new("Indoor", "indoor"))
            .await
            .unwrap();
        let outdoor = CategoryRepository::create(store.as_ref(), &CategoryDraft::new("Outdoor", "outdoor"))
            .await
            .unwrap();
        let id = store.add_product(Some(indoor), true).await;

        let updated = handler(&store)
            .handle(UpdateProductCommand {
                id,
                draft: ProductDraft::new("Lantern", "LANTERN-1", 30.0).in_category(outdoor),
            })
            .await
            .unwrap();

        assert_eq!(updated.category_name.as_deref(), Some("Outdoor"));
        let indoor = CategoryReader::find_by_id(store.as_ref(), indoor).await.unwrap().unwrap();
        let outdoor = CategoryReader::find_by_id(store.as_ref(), outdoor).await.unwrap().unwrap();
        assert_eq!(indoor.product_count, Some(0));
        assert_eq!(outdoor.product_count, Some(1));
    }

    #[tokio::test]
    async fn missing_is_not_found() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let err = handler(&store)
            .handle(UpdateProductCommand {
                id: ProductId::new(12),
                draft: ProductDraft::new("Lantern", "LANTERN-1", 30.0),
            })
            .await
            .unwrap_err();
        assert_eq!(err, ProductError::NotFound);
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let id = store.add_product(None, true).await;

        let err = handler(&store)
            .handle(UpdateProductCommand {
                id,
                draft: ProductDraft::new("", "LANTERN-1", 30.0),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::ValidationFailed { .. }));
    }
}
