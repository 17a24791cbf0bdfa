//! View-models for the category admin table and the category form.
//!
//! Everything here is pure: the table is built from an [`EnrichedCatalog`]
//! snapshot and a small amount of UI state (expanded ids, search term).
//! Fetching and mutation live in `application::category_table`.

use std::collections::HashSet;

use crate::domain::foundation::CategoryId;

use super::{slugify, Category, CategoryDraft, EnrichedCatalog, EnrichedCategory, EnrichedTopLevel};

/// Fallback shown when a category has no description.
pub const NO_DESCRIPTION: &str = "No description";

/// Shown when the search filter hides every top-level category.
pub const NO_MATCHES: &str = "No categories found matching your criteria.";

/// Formats a product count as `"1 Product"` or `"N Products"`.
pub fn format_product_label(count: u64) -> String {
    format!("{} Product{}", count, if count == 1 { "" } else { "s" })
}

// ════════════════════════════════════════════════════════════════════════════════
// Table
// ════════════════════════════════════════════════════════════════════════════════

/// Avatar content for a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    Image { url: String, fallback: String },
    Initial(String),
}

/// Position of a row in the two-level table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// A top-level category. `expander` is `Some(expanded)` only when the
    /// category has subcategories.
    Parent { expander: Option<bool> },
    /// A subcategory rendered under its expanded parent.
    Subcategory { parent_id: CategoryId },
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub id: CategoryId,
    pub kind: RowKind,
    pub name: String,
    pub subtitle: String,
    pub description: String,
    pub product_label: String,
    pub status: &'static str,
    pub avatar: Avatar,
}

impl CategoryRow {
    /// Only parent rows offer "Add Subcategory".
    pub fn can_add_subcategory(&self) -> bool {
        matches!(self.kind, RowKind::Parent { .. })
    }

    pub fn is_subcategory(&self) -> bool {
        matches!(self.kind, RowKind::Subcategory { .. })
    }

    fn build(category: &Category, kind: RowKind, product_count: u64) -> Self {
        let subtitle = match category.parent_name.as_deref() {
            Some(parent) if !parent.is_empty() => {
                format!("{} • Parent: {}", category.slug, parent)
            }
            _ => category.slug.clone(),
        };

        let description = category
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(NO_DESCRIPTION)
            .to_string();

        let initial: String = category.name.chars().take(1).collect();
        let avatar = match category.image_url.as_deref() {
            Some(url) if !url.is_empty() => Avatar::Image {
                url: url.to_string(),
                fallback: initial,
            },
            _ => Avatar::Initial(initial),
        };

        Self {
            id: category.id,
            kind,
            name: category.name.clone(),
            subtitle,
            description,
            product_label: format_product_label(product_count),
            status: if category.is_active { "Active" } else { "Inactive" },
            avatar,
        }
    }
}

fn matches_term(category: &Category, term: &str) -> bool {
    category.name.to_lowercase().contains(term)
        || category
            .description
            .as_deref()
            .map(|d| d.to_lowercase().contains(term))
            .unwrap_or(false)
}

/// Expandable two-level category table.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    catalog: EnrichedCatalog,
    expanded: HashSet<CategoryId>,
    search: String,
}

impl CategoryTable {
    pub fn new(catalog: EnrichedCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Replaces the data snapshot. Expansion and search state are kept.
    pub fn replace(&mut self, catalog: EnrichedCatalog) {
        self.catalog = catalog;
    }

    pub fn catalog(&self) -> &EnrichedCatalog {
        &self.catalog
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Flips the expanded state of `id`. No data is refetched.
    pub fn toggle_expanded(&mut self, id: CategoryId) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn is_expanded(&self, id: CategoryId) -> bool {
        self.expanded.contains(&id)
    }

    /// Top-level categories that pass the search filter.
    ///
    /// A category is shown when its own name or description contains the
    /// term (case-insensitive) or when any of its subcategories' do.
    pub fn visible(&self) -> Vec<&EnrichedTopLevel> {
        let term = self.search.to_lowercase();
        self.catalog
            .top_level
            .iter()
            .filter(|top| {
                matches_term(&top.category.category, &term)
                    || top.subcategories.iter().any(|sub| matches_term(sub, &term))
            })
            .collect()
    }

    /// Rows in display order.
    ///
    /// Subcategory rows are resolved against the enriched flat list so they
    /// show their own product count.
    pub fn rows(&self) -> Vec<CategoryRow> {
        let mut rows = Vec::new();

        for top in self.visible() {
            let id = top.id();
            let expanded = self.is_expanded(id);
            let expander = if top.subcategories.is_empty() {
                None
            } else {
                Some(expanded)
            };

            rows.push(CategoryRow::build(
                &top.category.category,
                RowKind::Parent { expander },
                top.category.total_product_count,
            ));

            if !expanded {
                continue;
            }

            for sub in &top.subcategories {
                let (category, own) = match self.catalog.find(sub.id) {
                    Some(EnrichedCategory {
                        category,
                        own_product_count,
                        ..
                    }) => (category, *own_product_count),
                    None => (sub, sub.own_product_count()),
                };
                rows.push(CategoryRow::build(
                    category,
                    RowKind::Subcategory { parent_id: id },
                    own,
                ));
            }
        }

        rows
    }

    /// Message for an empty filtered table, if any.
    pub fn empty_message(&self) -> Option<&'static str> {
        if self.visible().is_empty() {
            Some(NO_MATCHES)
        } else {
            None
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Form
// ════════════════════════════════════════════════════════════════════════════════

/// What submitting a [`CategoryForm`] does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySubmission {
    Create(CategoryDraft),
    Update(CategoryId, CategoryDraft),
}

/// Editable category form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryForm {
    editing: Option<CategoryId>,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image_url: String,
    pub parent_id: Option<CategoryId>,
    pub is_active: bool,
    pub sort_order: i32,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            editing: None,
            name: String::new(),
            slug: String::new(),
            description: String::new(),
            image_url: String::new(),
            parent_id: None,
            is_active: true,
            sort_order: 0,
        }
    }
}

impl CategoryForm {
    /// A blank form for a new top-level category.
    pub fn blank() -> Self {
        Self::default()
    }

    /// A blank form preset to create a child of `parent`.
    pub fn for_new_subcategory(parent: CategoryId) -> Self {
        Self {
            parent_id: Some(parent),
            ..Self::default()
        }
    }

    /// A form prefilled from an existing category.
    pub fn for_edit(category: &Category) -> Self {
        Self {
            editing: Some(category.id),
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone().unwrap_or_default(),
            image_url: category.image_url.clone().unwrap_or_default(),
            parent_id: category.parent_id,
            is_active: category.is_active,
            sort_order: category.sort_order,
        }
    }

    pub fn editing(&self) -> Option<CategoryId> {
        self.editing
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Category"
        } else {
            "Add New Category"
        }
    }

    /// Sets the name, deriving the slug while the slug is still empty.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        if self.slug.is_empty() {
            self.slug = slugify(&self.name);
        }
    }

    /// Parent choices for the selector: top-level categories except the one
    /// being edited.
    pub fn parent_choices<'a>(&self, top_level: &'a [Category]) -> Vec<&'a Category> {
        top_level
            .iter()
            .filter(|c| Some(c.id) != self.editing)
            .collect()
    }

    /// Turns the form into a create or update request.
    pub fn submit(&self) -> CategorySubmission {
        let non_empty = |s: &str| {
            if s.trim().is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        };

        let draft = CategoryDraft {
            name: self.name.clone(),
            slug: self.slug.clone(),
            description: non_empty(&self.description),
            image_url: non_empty(&self.image_url),
            parent_id: self.parent_id,
            is_active: self.is_active,
            sort_order: self.sort_order,
        };

        match self.editing {
            Some(id) => CategorySubmission::Update(id, draft),
            None => CategorySubmission::Create(draft),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CategoryWithSubcategories;

    fn cat(id: i64, parent: Option<i64>, name: &str, count: u64) -> Category {
        Category::new(
            CategoryId::new(id),
            parent.map(CategoryId::new),
            name,
            slugify(name),
        )
        .with_product_count(count)
    }

    /// Electronics(1) { Phones(2), Laptops(3) }, Garden(4) {}
    fn table() -> CategoryTable {
        let electronics = cat(1, None, "Electronics", 1).with_description("Gadgets and devices");
        let mut phones = cat(2, Some(1), "Phones", 4).with_description("Smart phones");
        phones.parent_name = Some("Electronics".to_string());
        let laptops = cat(3, Some(1), "Laptops", 2);
        let garden = cat(4, None, "Garden", 0);

        let flat = vec![electronics.clone(), phones.clone(), laptops.clone(), garden.clone()];
        let top = vec![
            CategoryWithSubcategories::new(electronics, vec![phones, laptops]),
            CategoryWithSubcategories::new(garden, vec![]),
        ];
        CategoryTable::new(EnrichedCatalog::build(&top, &flat))
    }

    #[test]
    fn format_product_label_pluralizes() {
        assert_eq!(format_product_label(0), "0 Products");
        assert_eq!(format_product_label(1), "1 Product");
        assert_eq!(format_product_label(2), "2 Products");
    }

    #[test]
    fn collapsed_table_shows_parents_with_totals() {
        let rows = table().rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Electronics");
        assert_eq!(rows[0].product_label, "7 Products");
        assert_eq!(rows[0].kind, RowKind::Parent { expander: Some(false) });
        assert_eq!(rows[1].kind, RowKind::Parent { expander: None });
        assert_eq!(rows[1].description, NO_DESCRIPTION);
    }

    #[test]
    fn expanding_shows_subcategories_with_own_counts() {
        let mut table = table();
        table.toggle_expanded(CategoryId::new(1));
        let rows = table.rows();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].kind, RowKind::Parent { expander: Some(true) });
        assert_eq!(rows[1].name, "Phones");
        assert_eq!(rows[1].product_label, "4 Products");
        assert_eq!(rows[1].subtitle, "phones • Parent: Electronics");
        assert!(rows[1].is_subcategory());
        assert!(!rows[1].can_add_subcategory());
        assert!(rows[0].can_add_subcategory());
        assert_eq!(rows[2].product_label, "2 Products");
        assert_eq!(rows[3].name, "Garden");
    }

    #[test]
    fn toggling_twice_collapses_again() {
        let mut table = table();
        table.toggle_expanded(CategoryId::new(1));
        table.toggle_expanded(CategoryId::new(1));

        assert!(!table.is_expanded(CategoryId::new(1)));
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn search_matches_parent_or_subcategory_case_insensitively() {
        let mut table = table();

        table.set_search("PHONE");
        let names: Vec<_> = table.visible().iter().map(|t| t.category.category.name.clone()).collect();
        assert_eq!(names, vec!["Electronics"]);

        table.set_search("gadgets");
        assert_eq!(table.visible().len(), 1);

        table.set_search("gar");
        assert_eq!(table.visible()[0].id(), CategoryId::new(4));

        table.set_search("");
        assert_eq!(table.visible().len(), 2);
        assert_eq!(table.empty_message(), None);
    }

    #[test]
    fn search_without_matches_reports_empty_message() {
        let mut table = table();
        table.set_search("furniture");

        assert!(table.rows().is_empty());
        assert_eq!(table.empty_message(), Some(NO_MATCHES));
    }

    #[test]
    fn row_text_fallbacks() {
        let mut inactive = cat(9, None, "Sale", 1);
        inactive.is_active = false;
        inactive.image_url = Some("https://cdn.example.com/sale.png".to_string());
        let flat = vec![inactive.clone()];
        let top = vec![CategoryWithSubcategories::new(inactive, vec![])];
        let rows = CategoryTable::new(EnrichedCatalog::build(&top, &flat)).rows();

        assert_eq!(rows[0].status, "Inactive");
        assert_eq!(rows[0].product_label, "1 Product");
        assert_eq!(rows[0].subtitle, "sale");
        assert_eq!(
            rows[0].avatar,
            Avatar::Image {
                url: "https://cdn.example.com/sale.png".to_string(),
                fallback: "S".to_string()
            }
        );
        assert_eq!(table().rows()[0].avatar, Avatar::Initial("E".to_string()));
    }

    #[test]
    fn form_derives_slug_only_while_empty() {
        let mut form = CategoryForm::blank();
        form.set_name("Home & Garden");
        assert_eq!(form.slug, "home-garden");

        form.set_name("Outdoor Living");
        assert_eq!(form.slug, "home-garden");

        form.slug.clear();
        form.set_name("Outdoor Living");
        assert_eq!(form.slug, "outdoor-living");
    }

    #[test]
    fn subcategory_form_creates_under_parent() {
        let mut form = CategoryForm::for_new_subcategory(CategoryId::new(1));
        form.set_name("Tablets");

        assert_eq!(form.title(), "Add New Category");
        match form.submit() {
            CategorySubmission::Create(draft) => {
                assert_eq!(draft.parent_id, Some(CategoryId::new(1)));
                assert_eq!(draft.slug, "tablets");
                assert!(draft.is_active);
                assert_eq!(draft.description, None);
            }
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn edit_form_updates_existing_and_excludes_self_from_parents() {
        let phones = cat(2, Some(1), "Phones", 4).with_sort_order(3);
        let form = CategoryForm::for_edit(&phones);

        assert_eq!(form.title(), "Edit Category");
        assert_eq!(form.sort_order, 3);

        let tops = vec![cat(1, None, "Electronics", 0), cat(2, None, "Phones", 0)];
        let choices: Vec<_> = form.parent_choices(&tops).iter().map(|c| c.id).collect();
        assert_eq!(choices, vec![CategoryId::new(1)]);

        match form.submit() {
            CategorySubmission::Update(id, draft) => {
                assert_eq!(id, CategoryId::new(2));
                assert_eq!(draft.name, "Phones");
            }
            other => panic!("expected update, got {:?}", other),
        }
    }
}
