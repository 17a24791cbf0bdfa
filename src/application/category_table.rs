//! CategoryTableController - Drives the admin category table.
//!
//! Fetches the nested listing through the [`CategoryCatalog`] port, runs the
//! aggregator and keeps the resulting [`CategoryTable`]. Mutations go through
//! the port and are followed by a refresh so totals are recomputed from fresh
//! data.

use std::sync::Arc;

use crate::domain::catalog::{
    Category, CategoryError, CategoryForm, CategorySubmission, CategoryTable, EnrichedCatalog,
};
use crate::domain::foundation::CategoryId;
use crate::ports::CategoryCatalog;

pub struct CategoryTableController {
    catalog: Arc<dyn CategoryCatalog>,
    table: CategoryTable,
}

impl CategoryTableController {
    pub fn new(catalog: Arc<dyn CategoryCatalog>) -> Self {
        Self {
            catalog,
            table: CategoryTable::default(),
        }
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut CategoryTable {
        &mut self.table
    }

    /// Refetches and re-enriches the listing.
    ///
    /// Returns `false` when the fetch failed; the previous table is kept.
    pub async fn refresh(&mut self) -> bool {
        match self.catalog.list_tree().await {
            Ok(listing) => {
                let enriched = EnrichedCatalog::build(&listing.categories, &listing.flat_categories);
                tracing::debug!(
                    top_level = enriched.top_level.len(),
                    flat = enriched.flat.len(),
                    "Category table refreshed"
                );
                self.table.replace(enriched);
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "Error fetching categories");
                false
            }
        }
    }

    /// Deletes a category, then refreshes.
    pub async fn delete_category(&mut self, id: CategoryId) -> Result<(), CategoryError> {
        self.catalog.delete(id).await?;
        self.refresh().await;
        Ok(())
    }

    /// Submits the form as a create or an update, then refreshes.
    pub async fn save_form(&mut self, form: &CategoryForm) -> Result<Category, CategoryError> {
        let saved = match form.submit() {
            CategorySubmission::Create(draft) => self.catalog.create(&draft).await?,
            CategorySubmission::Update(id, draft) => self.catalog.update(id, &draft).await?,
        };
        self.refresh().await;
        Ok(saved)
    }

    /// Top-level categories for the form's parent selector.
    pub async fn parent_options(&self) -> Result<Vec<Category>, CategoryError> {
        Ok(self.catalog.list_top_level().await?)
    }
}
