//! ListProductsHandler - Query handler for the paged product listing.

use std::sync::Arc;

use crate::domain::catalog::{ProductError, ProductFilter, ProductPage};
use crate::ports::ProductReader;

/// Query for one page of products.
#[derive(Debug, Clone, Default)]
pub struct ListProductsQuery {
    pub filter: ProductFilter,
}

/// Handler for listing products.
pub struct ListProductsHandler {
    reader: Arc<dyn ProductReader>,
}

impl ListProductsHandler {
    pub fn new(reader: Arc<dyn ProductReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: ListProductsQuery) -> Result<ProductPage, ProductError> {
        Ok(self.reader.list(&query.filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCatalogStore;
    use crate::domain::catalog::StockStatus;

    #[tokio::test]
    async fn filters_by_status_and_reports_unpaged_total() {
        let store = Arc::new(InMemoryCatalogStore::new());
        for _ in 0..3 {
            store.add_product(None, true).await;
        }
        store.add_product(None, false).await;

        let page = ListProductsHandler::new(store)
            .handle(ListProductsQuery {
                filter: ProductFilter::default()
                    .with_status(StockStatus::Inactive)
                    .with_page(1, 10),
            })
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert!(!page.products[0].is_active);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty_but_keeps_total() {
        let store = Arc::new(InMemoryCatalogStore::new());
        store.add_product(None, true).await;

        let page = ListProductsHandler::new(store)
            .handle(ListProductsQuery {
                filter: ProductFilter::default().with_page(4, 10),
            })
            .await
            .unwrap();

        assert!(page.products.is_empty());
        assert_eq!(page.total, 1);
    }
}
