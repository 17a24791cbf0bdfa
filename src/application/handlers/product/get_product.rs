//! GetProductHandler - Query handler for one product.

use std::sync::Arc;

use crate::domain::catalog::{Product, ProductError};
use crate::domain::foundation::ProductId;
use crate::ports::ProductReader;

/// Query to get a product.
#[derive(Debug, Clone, Copy)]
pub struct GetProductQuery {
    pub id: ProductId,
}

/// Handler for getting a product with its category names.
pub struct GetProductHandler {
    reader: Arc<dyn ProductReader>,
}

impl GetProductHandler {
    pub fn new(reader: Arc<dyn ProductReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: GetProductQuery) -> Result<Product, ProductError> {
        self.reader
            .find_by_id(query.id)
            .await?
            .ok_or(ProductError::NotFound)
    }
}
