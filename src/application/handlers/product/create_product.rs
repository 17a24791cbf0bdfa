//! CreateProductHandler - Command handler for creating products.

use std::sync::Arc;

use crate::domain::catalog::{Product, ProductDraft, ProductError};
use crate::ports::{CategoryRepository, ProductReader, ProductRepository};

/// Command to create a product.
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub draft: ProductDraft,
}

/// Fails when the draft names a category the store does not have.
pub(super) async fn ensure_category(
    categories: &dyn CategoryRepository,
    draft: &ProductDraft,
) -> Result<(), ProductError> {
    if let Some(category_id) = draft.category_id {
        if !categories.exists(category_id).await? {
            return Err(ProductError::CategoryNotFound(category_id));
        }
    }
    Ok(())
}

/// Handler for creating products.
pub struct CreateProductHandler {
    repository: Arc<dyn ProductRepository>,
    reader: Arc<dyn ProductReader>,
    categories: Arc<dyn CategoryRepository>,
}

impl CreateProductHandler {
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

    pub async fn handle(&self, cmd: CreateProductCommand) -> Result<Product, ProductError> {
        let draft = cmd.draft.validate()?;
        ensure_category(self.categories.as_ref(), &draft).await?;

        let id = self.repository.create(&draft).await?;
        tracing::info!(product_id = %id, sku = %draft.sku, "Product created");

        self.reader
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCatalogStore;
    use crate::domain::catalog::{CategoryDraft, StockStatus, DEFAULT_LOW_STOCK_THRESHOLD};
    use crate::domain::foundation::CategoryId;

    fn handler(store: &Arc<InMemoryCatalogStore>) -> CreateProductHandler {
        CreateProductHandler::new(store.clone(), store.clone(), store.clone())
    }

    #[tokio::test]
    async fn creates_with_defaults_and_category_name() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let lighting = CategoryRepository::create(store.as_ref(), &CategoryDraft::new("Lighting", "lighting"))
            .await
            .unwrap();

        let created = handler(&store)
            .handle(CreateProductCommand {
                draft: ProductDraft::new("Desk Lamp", "LAMP-1", 25.0).in_category(lighting),
            })
            .await
            .unwrap();

        assert_eq!(created.category_name.as_deref(), Some("Lighting"));
        assert_eq!(created.low_stock_threshold, DEFAULT_LOW_STOCK_THRESHOLD);
        assert_eq!(created.status(), StockStatus::OutOfStock);
    }

    #[tokio::test]
    async fn rejects_missing_price_before_touching_the_store() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let err = handler(&store)
            .handle(CreateProductCommand {
                draft: ProductDraft::new("Desk Lamp", "LAMP-1", 0.0),
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Name, SKU, and price are required");
        assert_eq!(store.product_count().await, 0);
    }

    #[tokio::test]
    async fn rejects_unknown_category() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let err = handler(&store)
            .handle(CreateProductCommand {
                draft: ProductDraft::new("Desk Lamp", "LAMP-1", 25.0).in_category(CategoryId::new(6)),
            })
            .await
            .unwrap_err();

        assert_eq!(err, ProductError::CategoryNotFound(CategoryId::new(6)));
    }

    #[tokio::test]
    async fn duplicate_sku_is_conflict() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let handler = handler(&store);
        handler
            .handle(CreateProductCommand {
                draft: ProductDraft::new("Desk Lamp", "LAMP-1", 25.0),
            })
            .await
            .unwrap();

        let err = handler
            .handle(CreateProductCommand {
                draft: ProductDraft::new("Floor Lamp", "LAMP-1", 60.0),
            })
            .await
            .unwrap_err();
        assert_eq!(err, ProductError::DuplicateSku);
    }
}
