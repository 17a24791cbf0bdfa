//! GetCategoryHandler - Query handler for one category with its children.

use std::sync::Arc;

use crate::domain::catalog::{Category, CategoryError, CategoryWithSubcategories};
use crate::domain::foundation::CategoryId;
use crate::ports::CategoryReader;

/// Query to get a category.
#[derive(Debug, Clone, Copy)]
pub struct GetCategoryQuery {
    pub id: CategoryId,
}

/// Handler for getting a category with its direct subcategories.
pub struct GetCategoryHandler {
    reader: Arc<dyn CategoryReader>,
}

impl GetCategoryHandler {
    pub fn new(reader: Arc<dyn CategoryReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: GetCategoryQuery,
    ) -> Result<CategoryWithSubcategories, CategoryError> {
        let category = self
            .reader
            .find_by_id(query.id)
            .await?
            .ok_or(CategoryError::NotFound)?;
        let subcategories = self.reader.list_subcategories(query.id).await?;

        Ok(CategoryWithSubcategories::new(category, subcategories))
    }
}

/// Query for the direct children of a category.
#[derive(Debug, Clone, Copy)]
pub struct ListSubcategoriesQuery {
    pub parent_id: CategoryId,
}

/// Handler for listing subcategories.
///
/// An unknown parent yields an empty list.
pub struct ListSubcategoriesHandler {
    reader: Arc<dyn CategoryReader>,
}

impl ListSubcategoriesHandler {
    pub fn new(reader: Arc<dyn CategoryReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: ListSubcategoriesQuery) -> Result<Vec<Category>, CategoryError> {
        Ok(self.reader.list_subcategories(query.parent_id).await?)
    }
}
