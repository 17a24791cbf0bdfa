//! Category records and the write-side draft used to create or update them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, Timestamp};

use super::CategoryError;

fn default_active() -> bool {
    true
}

/// A category as reported by the store.
///
/// `product_count` is the number of active products assigned directly to this
/// category. It is computed by the store at query time and may be absent on
/// the wire; consumers treat a missing value as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub product_count: Option<u64>,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

impl Category {
    /// Creates an active category with no description, image, or products.
    pub fn new(
        id: CategoryId,
        parent_id: Option<CategoryId>,
        name: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            parent_id,
            name: name.into(),
            slug: slug.into(),
            description: None,
            image_url: None,
            is_active: true,
            sort_order: 0,
            parent_name: None,
            product_count: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the directly assigned product count.
    pub fn with_product_count(mut self, count: u64) -> Self {
        self.product_count = Some(count);
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the sort order.
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Whether this is a root category.
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Directly assigned active products, with absent treated as zero.
    pub fn own_product_count(&self) -> u64 {
        self.product_count.unwrap_or(0)
    }
}

/// A top-level category together with its direct subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWithSubcategories {
    #[serde(flatten)]
    pub category: Category,
    #[serde(default)]
    pub subcategories: Vec<Category>,
}

impl CategoryWithSubcategories {
    pub fn new(category: Category, subcategories: Vec<Category>) -> Self {
        Self {
            category,
            subcategories,
        }
    }
}

/// Fields accepted when creating or updating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

impl CategoryDraft {
    /// Creates a draft with the store defaults (active, sort order 0).
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            description: None,
            image_url: None,
            parent_id: None,
            is_active: true,
            sort_order: 0,
        }
    }

    /// Places the draft under a parent.
    pub fn with_parent(mut self, parent_id: CategoryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Checks that name and slug are present.
    ///
    /// Blank optional text fields are normalized to `None`.
    pub fn validate(mut self) -> Result<Self, CategoryError> {
        self.name = self.name.trim().to_string();
        self.slug = self.slug.trim().to_string();

        if self.name.is_empty() || self.slug.is_empty() {
            return Err(CategoryError::validation(
                "name",
                "Category name and slug are required",
            ));
        }

        self.description = self.description.filter(|d| !d.trim().is_empty());
        self.image_url = self.image_url.filter(|u| !u.trim().is_empty());
        Ok(self)
    }
}

/// A new sort position for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortPosition {
    pub id: CategoryId,
    pub sort_order: i32,
}

/// Derives a URL slug from a display name.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, and trims leading and trailing dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}
