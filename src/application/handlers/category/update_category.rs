//! UpdateCategoryHandler - Command handler for editing categories.
//!
//! Besides field validation, rejects parent changes that would put a
//! category under itself, directly or through its descendants.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::catalog::{Category, CategoryDraft, CategoryError};
use crate::domain::foundation::CategoryId;
use crate::ports::{CategoryReader, CategoryRepository};

/// Command to update a category.
#[derive(Debug, Clone)]
pub struct UpdateCategoryCommand {
    pub id: CategoryId,
    pub draft: CategoryDraft,
}

/// Handler for updating categories.
pub struct UpdateCategoryHandler {
    repository: Arc<dyn CategoryRepository>,
    reader: Arc<dyn CategoryReader>,
}

impl UpdateCategoryHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>, reader: Arc<dyn CategoryReader>) -> Self {
        Self { repository, reader }
    }

    pub async fn handle(&self, cmd: UpdateCategoryCommand) -> Result<Category, CategoryError> {
        if cmd.draft.parent_id == Some(cmd.id) {
            return Err(CategoryError::SelfParent);
        }
        let draft = cmd.draft.validate()?;

        if !self.repository.exists(cmd.id).await? {
            return Err(CategoryError::NotFound);
        }

        if let Some(parent_id) = draft.parent_id {
            self.check_parent(cmd.id, parent_id).await?;
        }

        self.repository.update(cmd.id, &draft).await?;
        tracing::info!(category_id = %cmd.id, "Category updated");

        self.reader
            .find_by_id(cmd.id)
            .await?
            .ok_or(CategoryError::NotFound)
    }

    /// Walks up from the new parent; reaching `id` means a cycle.
    async fn check_parent(&self, id: CategoryId, parent_id: CategoryId) -> Result<(), CategoryError> {
        let mut seen = HashSet::new();
        let mut current = match self.repository.parent_of(parent_id).await? {
            None => return Err(CategoryError::ParentNotFound(parent_id)),
            Some(grandparent) => grandparent,
        };

        while let Some(ancestor) = current {
            if ancestor == id {
                tracing::warn!(category_id = %id, parent_id = %parent_id, "Rejected cyclic parent");
                return Err(CategoryError::CyclicParent(parent_id));
            }
            if !seen.insert(ancestor) {
                break;
            }
            current = self.repository.parent_of(ancestor).await?.flatten();
        }

        Ok(())
    }
}
