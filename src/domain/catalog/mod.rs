//! Catalog module - category hierarchy, products and product-count aggregation.

mod aggregation;
mod category;
mod errors;
mod presentation;
mod product;

pub use aggregation::{
    compute_total, enrich, Enrich, EnrichedCatalog, EnrichedCategory, EnrichedTopLevel,
    ProductCountIndex,
};
pub use category::{slugify, Category, CategoryDraft, CategoryWithSubcategories, SortPosition};
pub use errors::{CategoryError, ProductError};
pub use presentation::{
    format_product_label, Avatar, CategoryForm, CategoryRow, CategorySubmission, CategoryTable,
    RowKind, NO_DESCRIPTION, NO_MATCHES,
};
pub use product::{
    validate_stock_updates, Product, ProductDraft, ProductFilter, ProductPage, StockStatus,
    StockUpdate, DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
