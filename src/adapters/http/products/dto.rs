//! Request and response bodies for the product endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{
    Product, ProductDraft, ProductError, ProductFilter, ProductPage, StockStatus, StockUpdate,
    DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_PAGE_SIZE,
};
use crate::domain::foundation::CategoryId;

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Query string for `GET /api/products`.
///
/// Paging values that are not positive integers fall back to the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListProductsParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

fn positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
}

impl ListProductsParams {
    /// Builds the listing filter; an unknown status is a validation error.
    pub fn to_filter(&self) -> Result<ProductFilter, ProductError> {
        let mut filter = ProductFilter::default().with_page(
            positive(self.page.as_deref()).unwrap_or(1),
            positive(self.limit.as_deref()).unwrap_or(DEFAULT_PAGE_SIZE),
        );
        if let Some(search) = &self.search {
            filter = filter.with_search(search.as_str());
        }
        if let Some(category) = &self.category {
            filter = filter.with_category(category.as_str());
        }
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            filter = filter.with_status(status.parse()?);
        }
        Ok(filter)
    }
}

/// Body for create and update.
///
/// Every field is optional on the wire; missing name, SKU or price fails
/// validation in the handler rather than in the JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub cost_price: Option<f64>,
    #[serde(default)]
    pub stock_quantity: Option<i32>,
    #[serde(default)]
    pub low_stock_threshold: Option<i32>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_featured: Option<bool>,
}

impl From<ProductRequest> for ProductDraft {
    fn from(req: ProductRequest) -> Self {
        ProductDraft {
            name: req.name.unwrap_or_default(),
            sku: req.sku.unwrap_or_default(),
            price: req.price.unwrap_or(0.0),
            description: req.description,
            cost_price: req.cost_price.unwrap_or(0.0),
            stock_quantity: req.stock_quantity.unwrap_or(0),
            low_stock_threshold: req.low_stock_threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD),
            category_id: req.category_id,
            image_url: req.image_url,
            is_active: req.is_active.unwrap_or(true),
            is_featured: req.is_featured.unwrap_or(false),
        }
    }
}

impl From<&ProductDraft> for ProductRequest {
    fn from(draft: &ProductDraft) -> Self {
        ProductRequest {
            name: Some(draft.name.clone()),
            description: draft.description.clone(),
            sku: Some(draft.sku.clone()),
            price: Some(draft.price),
            cost_price: Some(draft.cost_price),
            stock_quantity: Some(draft.stock_quantity),
            low_stock_threshold: Some(draft.low_stock_threshold),
            category_id: draft.category_id,
            image_url: draft.image_url.clone(),
            is_active: Some(draft.is_active),
            is_featured: Some(draft.is_featured),
        }
    }
}

/// Body for `PUT /api/products/bulk/stock`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockUpdateRequest {
    #[serde(default)]
    pub updates: Option<Vec<StockUpdate>>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// A product with its derived stock status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBody {
    #[serde(flatten)]
    pub product: Product,
    pub status: StockStatus,
}

impl From<Product> for ProductBody {
    fn from(product: Product) -> Self {
        let status = product.status();
        Self { product, status }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductBody>,
    pub pagination: Pagination,
}

impl ProductListResponse {
    pub fn new(page: ProductPage, filter: &ProductFilter) -> Self {
        let pagination = Pagination {
            page: filter.page,
            limit: filter.limit,
            total: page.total,
            pages: page.pages(filter.limit),
        };
        Self {
            products: page.products.into_iter().map(ProductBody::from).collect(),
            pagination,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub product: ProductBody,
}

/// Confirmation for writes. Create and update echo the stored product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductMessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductBody>,
}

impl ProductMessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            product: None,
        }
    }

    pub fn with_product(message: impl Into<String>, product: Product) -> Self {
        Self {
            message: message.into(),
            product: Some(product.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ProductId, Timestamp};

    #[test]
    fn paging_params_fall_back_to_defaults() {
        let params = ListProductsParams {
            page: Some("abc".to_string()),
            limit: Some("0".to_string()),
            ..Default::default()
        };
        let filter = params.to_filter().unwrap();
        assert_eq!((filter.page, filter.limit), (1, DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn unknown_status_is_rejected_and_empty_status_ignored() {
        let params = ListProductsParams {
            status: Some("sold".to_string()),
            ..Default::default()
        };
        assert!(params.to_filter().is_err());

        let params = ListProductsParams {
            status: Some(String::new()),
            category: Some("all".to_string()),
            ..Default::default()
        };
        let filter = params.to_filter().unwrap();
        assert_eq!(filter.status, None);
        assert_eq!(filter.category, None);
    }

    #[test]
    fn request_defaults_fill_draft() {
        let req: ProductRequest =
            serde_json::from_str(r#"{"name": "Lamp", "sku": "LAMP-1", "price": 20}"#).unwrap();
        let draft = ProductDraft::from(req);

        assert!(draft.is_active);
        assert_eq!(draft.low_stock_threshold, DEFAULT_LOW_STOCK_THRESHOLD);
        assert_eq!(draft.price, 20.0);
    }

    #[test]
    fn body_flattens_product_and_adds_status() {
        let draft = ProductDraft::new("Lamp", "LAMP-1", 20.0).with_stock(4);
        let body = ProductBody::from(Product::from_draft(ProductId::new(2), &draft, Timestamp::now()));

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["sku"], "LAMP-1");
        assert_eq!(json["status"], "low_stock");
    }
}
