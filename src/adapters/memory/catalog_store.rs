//! In-memory catalog store.
//!
//! Implements the category and product ports over a single locked state,
//! mirroring the Postgres adapters' ordering, uniqueness and not-found
//! behaviour. Used by the integration tests and for running the API without
//! a database.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::catalog::{
    Category, CategoryDraft, Product, ProductDraft, ProductFilter, ProductPage, SortPosition,
    StockUpdate,
};
use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, ProductId, Timestamp};
use crate::ports::{CategoryReader, CategoryRepository, ProductReader, ProductRepository};

#[derive(Debug, Default)]
struct StoreState {
    categories: BTreeMap<CategoryId, Category>,
    products: BTreeMap<ProductId, Product>,
    next_id: i64,
    next_product_id: i64,
}

impl StoreState {
    fn decorate(&self, category: &Category) -> Category {
        let mut out = category.clone();
        out.parent_name = category
            .parent_id
            .and_then(|p| self.categories.get(&p))
            .map(|p| p.name.clone());
        let active = self
            .products
            .values()
            .filter(|p| p.category_id == Some(category.id) && p.is_active)
            .count();
        out.product_count = Some(active as u64);
        out
    }

    fn decorate_product(&self, product: &Product) -> Product {
        let mut out = product.clone();
        let category = product.category_id.and_then(|id| self.categories.get(&id));
        out.category_name = category.map(|c| c.name.clone());
        out.parent_category_name = category
            .and_then(|c| c.parent_id)
            .and_then(|p| self.categories.get(&p))
            .map(|p| p.name.clone());
        out
    }

    fn sorted<F>(&self, keep: F, top_level_first: bool) -> Vec<Category>
    where
        F: Fn(&Category) -> bool,
    {
        let mut items: Vec<Category> = self
            .categories
            .values()
            .filter(|c| keep(c))
            .map(|c| self.decorate(c))
            .collect();
        items.sort_by(|a, b| {
            let level = |c: &Category| top_level_first && c.parent_id.is_some();
            level(a)
                .cmp(&level(b))
                .then(a.sort_order.cmp(&b.sort_order))
                .then_with(|| a.name.cmp(&b.name))
        });
        items
    }

    fn conflicts(&self, draft: &CategoryDraft, except: Option<CategoryId>) -> bool {
        self.categories.values().any(|c| {
            Some(c.id) != except && (c.name == draft.name || c.slug == draft.slug)
        })
    }

    fn sku_taken(&self, sku: &str, except: Option<ProductId>) -> bool {
        self.products
            .values()
            .any(|p| Some(p.id) != except && p.sku == sku)
    }

    fn insert_product(&mut self, draft: &ProductDraft) -> ProductId {
        self.next_product_id += 1;
        let id = ProductId::new(self.next_product_id);
        self.products
            .insert(id, Product::from_draft(id, draft, Timestamp::now()));
        id
    }
}

fn duplicate() -> DomainError {
    DomainError::new(
        ErrorCode::DuplicateCategory,
        "Category name or slug already exists",
    )
}

fn not_found(id: CategoryId) -> DomainError {
    DomainError::new(
        ErrorCode::CategoryNotFound,
        format!("Category not found: {}", id),
    )
}

fn duplicate_sku() -> DomainError {
    DomainError::new(ErrorCode::DuplicateProduct, "SKU already exists")
}

fn product_not_found(id: ProductId) -> DomainError {
    DomainError::new(
        ErrorCode::ProductNotFound,
        format!("Product not found: {}", id),
    )
}

/// In-memory implementation of the category and product ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryCatalogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a placeholder product assigned to a category (or to none).
    pub async fn add_product(&self, category_id: Option<CategoryId>, is_active: bool) -> ProductId {
        let mut state = self.state.write().await;
        let n = state.next_product_id + 1;
        let mut draft = ProductDraft::new(format!("Product {}", n), format!("SKU-{}", n), 1.0);
        draft.category_id = category_id;
        draft.is_active = is_active;
        state.insert_product(&draft)
    }

    /// Adds `count` active placeholder products to a category.
    pub async fn add_active_products(&self, category_id: CategoryId, count: usize) {
        for _ in 0..count {
            self.add_product(Some(category_id), true).await;
        }
    }

    /// Get the number of stored products
    pub async fn product_count(&self) -> usize {
        self.state.read().await.products.len()
    }

    /// Get the number of stored categories
    pub async fn category_count(&self) -> usize {
        self.state.read().await.categories.len()
    }
}

#[async_trait]
impl CategoryReader for InMemoryCatalogStore {
    async fn list_all(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.state.read().await.sorted(|_| true, true))
    }

    async fn list_top_level(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.state.read().await.sorted(Category::is_top_level, false))
    }

    async fn list_subcategories(
        &self,
        parent_id: CategoryId,
    ) -> Result<Vec<Category>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .sorted(|c| c.parent_id == Some(parent_id), false))
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, DomainError> {
        let state = self.state.read().await;
        Ok(state.categories.get(&id).map(|c| state.decorate(c)))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalogStore {
    async fn create(&self, draft: &CategoryDraft) -> Result<CategoryId, DomainError> {
        let mut state = self.state.write().await;
        if state.conflicts(draft, None) {
            return Err(duplicate());
        }

        state.next_id += 1;
        let id = CategoryId::new(state.next_id);
        let mut category = Category::new(id, draft.parent_id, &draft.name, &draft.slug);
        category.description = draft.description.clone();
        category.image_url = draft.image_url.clone();
        category.is_active = draft.is_active;
        category.sort_order = draft.sort_order;
        state.categories.insert(id, category);

        Ok(id)
    }

    async fn update(&self, id: CategoryId, draft: &CategoryDraft) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if !state.categories.contains_key(&id) {
            return Err(not_found(id));
        }
        if state.conflicts(draft, Some(id)) {
            return Err(duplicate());
        }

        let category = state.categories.get_mut(&id).ok_or_else(|| not_found(id))?;
        category.name = draft.name.clone();
        category.slug = draft.slug.clone();
        category.description = draft.description.clone();
        category.image_url = draft.image_url.clone();
        category.parent_id = draft.parent_id;
        category.is_active = draft.is_active;
        category.sort_order = draft.sort_order;
        category.updated_at = Timestamp::now();

        Ok(())
    }

    async fn delete(&self, id: CategoryId) -> Result<(), DomainError> {
        self.state
            .write()
            .await
            .categories
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn reorder(&self, positions: &[SortPosition]) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let now = Timestamp::now();
        for position in positions {
            if let Some(category) = state.categories.get_mut(&position.id) {
                category.sort_order = position.sort_order;
                category.updated_at = now;
            }
        }
        Ok(())
    }

    async fn exists(&self, id: CategoryId) -> Result<bool, DomainError> {
        Ok(self.state.read().await.categories.contains_key(&id))
    }

    async fn parent_of(&self, id: CategoryId) -> Result<Option<Option<CategoryId>>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .categories
            .get(&id)
            .map(|c| c.parent_id))
    }

    async fn count_products(&self, id: CategoryId) -> Result<u64, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .products
            .values()
            .filter(|p| p.category_id == Some(id))
            .count() as u64)
    }

    async fn count_subcategories(&self, id: CategoryId) -> Result<u64, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .categories
            .values()
            .filter(|c| c.parent_id == Some(id))
            .count() as u64)
    }
}

#[async_trait]
impl ProductReader for InMemoryCatalogStore {
    async fn list(&self, filter: &ProductFilter) -> Result<ProductPage, DomainError> {
        let state = self.state.read().await;
        let mut matching: Vec<Product> = state
            .products
            .values()
            .map(|p| state.decorate_product(p))
            .filter(|p| filter.matches(p))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as u64;
        let offset = usize::try_from(filter.offset()).unwrap_or(usize::MAX);
        let products = matching
            .into_iter()
            .skip(offset)
            .take(filter.limit as usize)
            .collect();

        Ok(ProductPage { products, total })
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, DomainError> {
        let state = self.state.read().await;
        Ok(state.products.get(&id).map(|p| state.decorate_product(p)))
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalogStore {
    async fn create(&self, draft: &ProductDraft) -> Result<ProductId, DomainError> {
        let mut state = self.state.write().await;
        if state.sku_taken(&draft.sku, None) {
            return Err(duplicate_sku());
        }
        Ok(state.insert_product(draft))
    }

    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.sku_taken(&draft.sku, Some(id)) {
            return Err(duplicate_sku());
        }

        let product = state.products.get_mut(&id).ok_or_else(|| product_not_found(id))?;
        let created_at = product.created_at;
        *product = Product::from_draft(id, draft, Timestamp::now());
        product.created_at = created_at;

        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<(), DomainError> {
        self.state
            .write()
            .await
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| product_not_found(id))
    }

    async fn update_stock(&self, updates: &[StockUpdate]) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let now = Timestamp::now();
        for update in updates {
            if let Some(product) = state.products.get_mut(&update.id) {
                product.stock_quantity = update.stock_quantity;
                product.updated_at = now;
            }
        }
        Ok(())
    }
}
