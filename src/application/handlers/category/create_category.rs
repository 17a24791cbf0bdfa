//! CreateCategoryHandler - Command handler for creating categories.

use std::sync::Arc;

use crate::domain::catalog::{Category, CategoryDraft, CategoryError};
use crate::ports::{CategoryReader, CategoryRepository};

/// Command to create a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub draft: CategoryDraft,
}

/// Handler for creating categories.
pub struct CreateCategoryHandler {
    repository: Arc<dyn CategoryRepository>,
    reader: Arc<dyn CategoryReader>,
}

impl CreateCategoryHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>, reader: Arc<dyn CategoryReader>) -> Self {
        Self { repository, reader }
    }

    pub async fn handle(&self, cmd: CreateCategoryCommand) -> Result<Category, CategoryError> {
        let draft = cmd.draft.validate()?;

        if let Some(parent_id) = draft.parent_id {
            if !self.repository.exists(parent_id).await? {
                return Err(CategoryError::ParentNotFound(parent_id));
            }
        }

        let id = self.repository.create(&draft).await?;
        tracing::info!(category_id = %id, slug = %draft.slug, "Category created");

        self.reader
            .find_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound)
    }
}
