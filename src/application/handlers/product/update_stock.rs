//! UpdateStockHandler - Command handler for bulk stock changes.

use std::sync::Arc;

use crate::domain::catalog::{validate_stock_updates, ProductError, StockUpdate};
use crate::ports::ProductRepository;

/// Command to set the stock level of several products at once.
#[derive(Debug, Clone)]
pub struct UpdateStockCommand {
    pub updates: Vec<StockUpdate>,
}

/// Handler for bulk stock updates, applied in one transaction.
pub struct UpdateStockHandler {
    repository: Arc<dyn ProductRepository>,
}

impl UpdateStockHandler {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateStockCommand) -> Result<(), ProductError> {
        validate_stock_updates(&cmd.updates)?;

        self.repository.update_stock(&cmd.updates).await?;
        tracing::info!(count = cmd.updates.len(), "Stock updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCatalogStore;
    use crate::domain::catalog::StockStatus;
    use crate::ports::ProductReader;

    #[tokio::test]
    async fn empty_update_is_rejected() {
        let err = UpdateStockHandler::new(Arc::new(InMemoryCatalogStore::new()))
            .handle(UpdateStockCommand { updates: vec![] })
            .await
            .unwrap_err();
        assert_eq!(err, ProductError::EmptyStockUpdate);
    }

    #[tokio::test]
    async fn applies_levels_and_status_follows() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let id = store.add_product(None, true).await;

        UpdateStockHandler::new(store.clone())
            .handle(UpdateStockCommand {
                updates: vec![StockUpdate { id, stock_quantity: 50 }],
            })
            .await
            .unwrap();

        let product = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.stock_quantity, 50);
        assert_eq!(product.status(), StockStatus::Active);
    }

    #[tokio::test]
    async fn negative_level_rejects_the_whole_batch() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let a = store.add_product(None, true).await;
        let b = store.add_product(None, true).await;

        let err = UpdateStockHandler::new(store.clone())
            .handle(UpdateStockCommand {
                updates: vec![
                    StockUpdate { id: a, stock_quantity: 5 },
                    StockUpdate { id: b, stock_quantity: -1 },
                ],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::ValidationFailed { .. }));
        assert_eq!(store.find_by_id(a).await.unwrap().unwrap().stock_quantity, 0);
    }
}
