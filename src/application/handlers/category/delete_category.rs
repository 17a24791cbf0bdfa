//! DeleteCategoryHandler - Command handler for deleting categories.

use std::sync::Arc;

use crate::domain::catalog::CategoryError;
use crate::domain::foundation::CategoryId;
use crate::ports::CategoryRepository;

/// Command to delete a category.
#[derive(Debug, Clone, Copy)]
pub struct DeleteCategoryCommand {
    pub id: CategoryId,
}

/// Handler for deleting categories.
///
/// A category is only deleted once no product (active or not) and no
/// subcategory references it.
pub struct DeleteCategoryHandler {
    repository: Arc<dyn CategoryRepository>,
}

impl DeleteCategoryHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteCategoryCommand) -> Result<(), CategoryError> {
        let products = self.repository.count_products(cmd.id).await?;
        if products > 0 {
            return Err(CategoryError::HasProducts(products));
        }

        let subcategories = self.repository.count_subcategories(cmd.id).await?;
        if subcategories > 0 {
            return Err(CategoryError::HasSubcategories(subcategories));
        }

        self.repository.delete(cmd.id).await?;
        tracing::info!(category_id = %cmd.id, "Category deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCatalogStore;
    use crate::domain::catalog::CategoryDraft;

    #[tokio::test]
    async fn deletes_empty_leaf() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let id = store.create(&CategoryDraft::new("Toys", "toys")).await.unwrap();

        DeleteCategoryHandler::new(store.clone())
            .handle(DeleteCategoryCommand { id })
            .await
            .unwrap();
        assert_eq!(store.category_count().await, 0);
    }

    #[tokio::test]
    async fn refuses_when_inactive_products_remain() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let id = store.create(&CategoryDraft::new("Toys", "toys")).await.unwrap();
        store.add_product(Some(id), false).await;

        let err = DeleteCategoryHandler::new(store.clone())
            .handle(DeleteCategoryCommand { id })
            .await
            .unwrap_err();
        assert_eq!(err, CategoryError::HasProducts(1));
        assert_eq!(store.category_count().await, 1);
    }

    #[tokio::test]
    async fn refuses_when_subcategories_remain() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let id = store.create(&CategoryDraft::new("Toys", "toys")).await.unwrap();
        store
            .create(&CategoryDraft::new("Puzzles", "puzzles").with_parent(id))
            .await
            .unwrap();

        let err = DeleteCategoryHandler::new(store)
            .handle(DeleteCategoryCommand { id })
            .await
            .unwrap_err();
        assert_eq!(err, CategoryError::HasSubcategories(1));
    }

    #[tokio::test]
    async fn missing_is_not_found() {
        let err = DeleteCategoryHandler::new(Arc::new(InMemoryCatalogStore::new()))
            .handle(DeleteCategoryCommand {
                id: CategoryId::new(5),
            })
            .await
            .unwrap_err();
        assert_eq!(err, CategoryError::NotFound);
    }
}
