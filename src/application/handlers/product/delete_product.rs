//! DeleteProductHandler - Command handler for deleting products.

use std::sync::Arc;

use crate::domain::catalog::ProductError;
use crate::domain::foundation::ProductId;
use crate::ports::ProductRepository;

/// Command to delete a product.
#[derive(Debug, Clone, Copy)]
pub struct DeleteProductCommand {
    pub id: ProductId,
}

/// Handler for deleting products.
pub struct DeleteProductHandler {
    repository: Arc<dyn ProductRepository>,
}

impl DeleteProductHandler {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteProductCommand) -> Result<(), ProductError> {
        self.repository.delete(cmd.id).await?;
        tracing::info!(product_id = %cmd.id, "Product deleted");
        Ok(())
    }
}
