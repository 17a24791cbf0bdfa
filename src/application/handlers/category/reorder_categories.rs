//! ReorderCategoriesHandler - Command handler for bulk sort order changes.

use std::sync::Arc;

use crate::domain::catalog::{CategoryError, SortPosition};
use crate::ports::CategoryRepository;

/// Command to reorder categories.
#[derive(Debug, Clone)]
pub struct ReorderCategoriesCommand {
    pub positions: Vec<SortPosition>,
}

/// Handler for reordering categories in one transaction.
pub struct ReorderCategoriesHandler {
    repository: Arc<dyn CategoryRepository>,
}

impl ReorderCategoriesHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: ReorderCategoriesCommand) -> Result<(), CategoryError> {
        if cmd.positions.is_empty() {
            return Err(CategoryError::EmptyReorder);
        }

        self.repository.reorder(&cmd.positions).await?;
        tracing::info!(count = cmd.positions.len(), "Categories reordered");
        Ok(())
    }
}
