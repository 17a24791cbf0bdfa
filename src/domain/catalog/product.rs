//! Product records, stock status, listing filters and the write-side draft.
//!
//! Products are what the category totals count: the store reports, for each
//! category, how many active products name it as their `category_id`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, ProductId, Timestamp};

use super::ProductError;

/// Threshold applied when a product is created without one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;

/// Page size when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a listing will return.
pub const MAX_PAGE_SIZE: u32 = 100;

fn default_active() -> bool {
    true
}

fn default_low_stock_threshold() -> i32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

// ════════════════════════════════════════════════════════════════════════════════
// Stock status
// ════════════════════════════════════════════════════════════════════════════════

/// Derived availability of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    Active,
    Inactive,
}

impl StockStatus {
    /// Stock level wins over the active flag: an empty shelf is out of stock
    /// and a shelf at or under the threshold is low, whatever `is_active` says.
    pub fn of(stock_quantity: i32, low_stock_threshold: i32, is_active: bool) -> Self {
        if stock_quantity <= 0 {
            StockStatus::OutOfStock
        } else if stock_quantity <= low_stock_threshold {
            StockStatus::LowStock
        } else if is_active {
            StockStatus::Active
        } else {
            StockStatus::Inactive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "out_of_stock",
            StockStatus::LowStock => "low_stock",
            StockStatus::Active => "active",
            StockStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "out_of_stock" => Ok(StockStatus::OutOfStock),
            "low_stock" => Ok(StockStatus::LowStock),
            "active" => Ok(StockStatus::Active),
            "inactive" => Ok(StockStatus::Inactive),
            other => Err(ProductError::validation(
                "status",
                format!("Unknown product status: {}", other),
            )),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Records
// ════════════════════════════════════════════════════════════════════════════════

/// A product as reported by the store.
///
/// `category_name` and `parent_category_name` are joined from the category
/// rows at query time and are absent for unassigned products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub sku: String,
    pub price: f64,
    #[serde(default)]
    pub cost_price: f64,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_category_name: Option<String>,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

impl Product {
    /// Materializes a stored product from a validated draft.
    pub fn from_draft(id: ProductId, draft: &ProductDraft, now: Timestamp) -> Self {
        Self {
            id,
            category_id: draft.category_id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            sku: draft.sku.clone(),
            price: draft.price,
            cost_price: draft.cost_price,
            stock_quantity: draft.stock_quantity,
            low_stock_threshold: draft.low_stock_threshold,
            image_url: draft.image_url.clone(),
            is_active: draft.is_active,
            is_featured: draft.is_featured,
            category_name: None,
            parent_category_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn status(&self) -> StockStatus {
        StockStatus::of(self.stock_quantity, self.low_stock_threshold, self.is_active)
    }
}

/// Fields accepted when creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub sku: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cost_price: f64,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i32,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

impl ProductDraft {
    /// Creates an active, unassigned draft with no stock.
    pub fn new(name: impl Into<String>, sku: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            sku: sku.into(),
            price,
            description: None,
            cost_price: 0.0,
            stock_quantity: 0,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            category_id: None,
            image_url: None,
            is_active: true,
            is_featured: false,
        }
    }

    pub fn in_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_stock(mut self, stock_quantity: i32) -> Self {
        self.stock_quantity = stock_quantity;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Checks required fields and non-negative amounts.
    ///
    /// A zero price counts as missing. Blank optional text fields are
    /// normalized to `None`.
    pub fn validate(mut self) -> Result<Self, ProductError> {
        self.name = self.name.trim().to_string();
        self.sku = self.sku.trim().to_string();

        if self.name.is_empty() || self.sku.is_empty() || !self.price.is_finite() || self.price <= 0.0 {
            return Err(ProductError::validation(
                "name",
                "Name, SKU, and price are required",
            ));
        }
        if !self.cost_price.is_finite() || self.cost_price < 0.0 {
            return Err(ProductError::validation(
                "cost_price",
                "Cost price cannot be negative",
            ));
        }
        if self.stock_quantity < 0 {
            return Err(ProductError::validation(
                "stock_quantity",
                "Stock quantity cannot be negative",
            ));
        }
        if self.low_stock_threshold < 0 {
            return Err(ProductError::validation(
                "low_stock_threshold",
                "Low stock threshold cannot be negative",
            ));
        }

        self.description = self.description.filter(|d| !d.trim().is_empty());
        self.image_url = self.image_url.filter(|u| !u.trim().is_empty());
        Ok(self)
    }
}

/// A new stock level for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub id: ProductId,
    pub stock_quantity: i32,
}

/// Checks a bulk stock request before any row is touched.
pub fn validate_stock_updates(updates: &[StockUpdate]) -> Result<(), ProductError> {
    if updates.is_empty() {
        return Err(ProductError::EmptyStockUpdate);
    }
    if let Some(bad) = updates.iter().find(|u| u.stock_quantity < 0) {
        return Err(ProductError::validation(
            "stock_quantity",
            format!("Stock quantity cannot be negative (product {})", bad.id),
        ));
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════════
// Listing
// ════════════════════════════════════════════════════════════════════════════════

/// Search, category, status and page selection for a product listing.
///
/// The status filter is a stock predicate rather than an equality test on
/// [`Product::status`]: `active` means active with stock on hand, so it
/// includes low-stock products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of name, SKU or description.
    pub search: Option<String>,
    /// Exact category name; `all` selects every category.
    pub category: Option<String>,
    pub status: Option<StockStatus>,
    pub page: u32,
    pub limit: u32,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            status: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProductFilter {
    /// Selects a page; page 0 is page 1 and the size is kept in `1..=100`.
    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = page.max(1);
        self.limit = limit.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = Some(search).filter(|s| !s.trim().is_empty());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = Some(category).filter(|c| !c.is_empty() && c != "all");
        self
    }

    pub fn with_status(mut self, status: StockStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Rows skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Whether a decorated product passes every filter except paging.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = product.name.to_lowercase().contains(&needle)
                || product.sku.to_lowercase().contains(&needle)
                || product
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if product.category_name.as_deref() != Some(category.as_str()) {
                return false;
            }
        }

        match self.status {
            None => true,
            Some(StockStatus::Active) => product.is_active && product.stock_quantity > 0,
            Some(StockStatus::OutOfStock) => product.stock_quantity == 0,
            Some(StockStatus::LowStock) => {
                product.stock_quantity > 0 && product.stock_quantity <= product.low_stock_threshold
            }
            Some(StockStatus::Inactive) => !product.is_active,
        }
    }
}

/// One page of a product listing plus the unpaged match count.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: u64,
}

impl ProductPage {
    /// Number of pages of size `limit` needed for `total` rows.
    pub fn pages(&self, limit: u32) -> u64 {
        let limit = u64::from(limit.max(1));
        self.total.div_ceil(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i32, active: bool) -> Product {
        let draft = ProductDraft::new("Desk Lamp", "LAMP-1", 25.0).with_stock(stock);
        let draft = if active { draft } else { draft.inactive() };
        Product::from_draft(ProductId::new(1), &draft, Timestamp::now())
    }

    #[test]
    fn status_prefers_stock_level_over_active_flag() {
        assert_eq!(StockStatus::of(0, 10, true), StockStatus::OutOfStock);
        assert_eq!(StockStatus::of(10, 10, false), StockStatus::LowStock);
        assert_eq!(StockStatus::of(11, 10, true), StockStatus::Active);
        assert_eq!(StockStatus::of(11, 10, false), StockStatus::Inactive);
    }

    #[test]
    fn status_parses_wire_names() {
        assert_eq!("low_stock".parse::<StockStatus>().unwrap(), StockStatus::LowStock);
        assert_eq!(StockStatus::OutOfStock.to_string(), "out_of_stock");
        assert!(matches!(
            "sold".parse::<StockStatus>(),
            Err(ProductError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn draft_requires_name_sku_and_nonzero_price() {
        let err = ProductDraft::new("Lamp", "LAMP-1", 0.0).validate().unwrap_err();
        assert_eq!(err.to_string(), "Name, SKU, and price are required");
        assert!(ProductDraft::new("Lamp", "  ", 5.0).validate().is_err());
        assert!(ProductDraft::new("Lamp", "LAMP-1", f64::NAN).validate().is_err());
    }

    #[test]
    fn draft_rejects_negative_stock() {
        let err = ProductDraft::new("Lamp", "LAMP-1", 5.0)
            .with_stock(-1)
            .validate()
            .unwrap_err();
        assert_eq!(err, ProductError::validation("stock_quantity", "Stock quantity cannot be negative"));
    }

    #[test]
    fn draft_deserializes_with_store_defaults() {
        let draft: ProductDraft =
            serde_json::from_str(r#"{"name": "Lamp", "sku": "LAMP-1", "price": 19.5}"#).unwrap();

        assert!(draft.is_active);
        assert!(!draft.is_featured);
        assert_eq!(draft.stock_quantity, 0);
        assert_eq!(draft.low_stock_threshold, DEFAULT_LOW_STOCK_THRESHOLD);
        assert_eq!(draft.cost_price, 0.0);
    }

    #[test]
    fn empty_or_negative_stock_updates_are_rejected() {
        assert_eq!(validate_stock_updates(&[]), Err(ProductError::EmptyStockUpdate));
        let updates = [StockUpdate { id: ProductId::new(3), stock_quantity: -2 }];
        assert!(matches!(
            validate_stock_updates(&updates),
            Err(ProductError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn filter_search_covers_name_sku_and_description() {
        let mut lamp = product(20, true);
        lamp.description = Some("Warm white LED".to_string());

        assert!(ProductFilter::default().with_search("desk").matches(&lamp));
        assert!(ProductFilter::default().with_search("lamp-1").matches(&lamp));
        assert!(ProductFilter::default().with_search("led").matches(&lamp));
        assert!(!ProductFilter::default().with_search("chair").matches(&lamp));
    }

    #[test]
    fn filter_category_matches_joined_name_and_all_is_ignored() {
        let mut lamp = product(20, true);
        lamp.category_name = Some("Lighting".to_string());

        assert!(ProductFilter::default().with_category("Lighting").matches(&lamp));
        assert!(!ProductFilter::default().with_category("Garden").matches(&lamp));
        assert_eq!(ProductFilter::default().with_category("all").category, None);
    }

    #[test]
    fn active_filter_includes_low_stock_products() {
        let low = product(3, true);
        let active = ProductFilter::default().with_status(StockStatus::Active);

        assert_eq!(low.status(), StockStatus::LowStock);
        assert!(active.matches(&low));
        assert!(!active.matches(&product(0, true)));
        assert!(ProductFilter::default()
            .with_status(StockStatus::Inactive)
            .matches(&product(0, false)));
    }

    #[test]
    fn paging_is_clamped_and_pages_round_up() {
        let filter = ProductFilter::default().with_page(0, 500);
        assert_eq!((filter.page, filter.limit), (1, MAX_PAGE_SIZE));
        assert_eq!(ProductFilter::default().with_page(3, 10).offset(), 20);

        let page = ProductPage { products: Vec::new(), total: 21 };
        assert_eq!(page.pages(10), 3);
        assert_eq!(ProductPage { products: Vec::new(), total: 0 }.pages(10), 0);
    }
}
