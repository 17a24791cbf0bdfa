//! Request and response bodies for the category endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Category, CategoryDraft, CategoryWithSubcategories, SortPosition};
use crate::domain::foundation::CategoryId;
use crate::ports::CategoryListing;

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Query string for `GET /api/categories`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCategoriesParams {
    pub include_subcategories: Option<String>,
}

impl ListCategoriesParams {
    /// Anything but the literal `"false"` includes subcategories.
    pub fn include_subcategories(&self) -> bool {
        self.include_subcategories.as_deref() != Some("false")
    }
}

/// Body for create and update.
///
/// Every field is optional on the wire; missing name or slug fails
/// validation in the handler rather than in the JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl From<CategoryRequest> for CategoryDraft {
    fn from(req: CategoryRequest) -> Self {
        CategoryDraft {
            name: req.name.unwrap_or_default(),
            slug: req.slug.unwrap_or_default(),
            description: req.description,
            image_url: req.image_url,
            parent_id: req.parent_id,
            is_active: req.is_active.unwrap_or(true),
            sort_order: req.sort_order.unwrap_or(0),
        }
    }
}

impl From<&CategoryDraft> for CategoryRequest {
    fn from(draft: &CategoryDraft) -> Self {
        CategoryRequest {
            name: Some(draft.name.clone()),
            slug: Some(draft.slug.clone()),
            description: draft.description.clone(),
            image_url: draft.image_url.clone(),
            parent_id: draft.parent_id,
            is_active: Some(draft.is_active),
            sort_order: Some(draft.sort_order),
        }
    }
}

/// Body for `PUT /api/categories/reorder`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReorderRequest {
    #[serde(default)]
    pub categories: Option<Vec<SortPosition>>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// Listing body; the nested form also carries `flat_categories`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ListCategoriesResponse {
    Nested(CategoryListing),
    TopLevel { categories: Vec<Category> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcategoriesResponse {
    pub subcategories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub category: CategoryWithSubcategories,
}

/// Confirmation for writes. Create and update echo the stored category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            category: None,
        }
    }

    pub fn with_category(message: impl Into<String>, category: Category) -> Self {
        Self {
            message: message.into(),
            category: Some(category),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_subcategories_defaults_to_true() {
        let params = ListCategoriesParams::default();
        assert!(params.include_subcategories());

        let params = ListCategoriesParams {
            include_subcategories: Some("0".to_string()),
        };
        assert!(params.include_subcategories());

        let params = ListCategoriesParams {
            include_subcategories: Some("false".to_string()),
        };
        assert!(!params.include_subcategories());
    }

    #[test]
    fn request_defaults_fill_draft() {
        let req: CategoryRequest =
            serde_json::from_str(r#"{"name": "Toys", "slug": "toys", "parent_id": 3}"#).unwrap();
        let draft = CategoryDraft::from(req);

        assert!(draft.is_active);
        assert_eq!(draft.sort_order, 0);
        assert_eq!(draft.parent_id, Some(CategoryId::new(3)));
    }

    #[test]
    fn top_level_response_has_no_flat_list() {
        let body = ListCategoriesResponse::TopLevel { categories: vec![] };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("flat_categories").is_none());
        assert!(json["categories"].is_array());
    }

    #[test]
    fn reorder_request_tolerates_missing_array() {
        let req: ReorderRequest = serde_json::from_str("{}").unwrap();
        assert!(req.categories.is_none());
    }
}
