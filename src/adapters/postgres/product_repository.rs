//! PostgreSQL implementation of ProductRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::catalog::{ProductDraft, StockUpdate};
use crate::domain::foundation::{DomainError, ErrorCode, ProductId};
use crate::ports::ProductRepository;

/// PostgreSQL implementation of ProductRepository.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Unique violations are duplicate SKUs; a foreign key violation means the
/// category vanished between the existence check and the write.
fn write_error(context: &str, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return DomainError::new(ErrorCode::DuplicateProduct, "SKU already exists")
                .with_detail("field", "sku");
        }
        if db.is_foreign_key_violation() {
            return DomainError::new(ErrorCode::ValidationFailed, "Category not found")
                .with_detail("field", "category_id");
        }
    }
    DomainError::database(context, err)
}

fn not_found(id: ProductId) -> DomainError {
    DomainError::new(
        ErrorCode::ProductNotFound,
        format!("Product not found: {}", id),
    )
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, draft: &ProductDraft) -> Result<ProductId, DomainError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO products (
                name, description, sku, price, cost_price, stock_quantity,
                low_stock_threshold, category_id, image_url, is_active, is_featured
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(&draft.sku)
        .bind(draft.price)
        .bind(draft.cost_price)
        .bind(draft.stock_quantity)
        .bind(draft.low_stock_threshold)
        .bind(draft.category_id.map(|c| c.as_i64()))
        .bind(&draft.image_url)
        .bind(draft.is_active)
        .bind(draft.is_featured)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("Failed to insert product", e))?;

        Ok(ProductId::new(id))
    }

    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = $2,
                description = $3,
                sku = $4,
                price = $5,
                cost_price = $6,
                stock_quantity = $7,
                low_stock_threshold = $8,
                category_id = $9,
                image_url = $10,
                is_active = $11,
                is_featured = $12,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(&draft.sku)
        .bind(draft.price)
        .bind(draft.cost_price)
        .bind(draft.stock_quantity)
        .bind(draft.low_stock_threshold)
        .bind(draft.category_id.map(|c| c.as_i64()))
        .bind(&draft.image_url)
        .bind(draft.is_active)
        .bind(draft.is_featured)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("Failed to update product", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete product", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn update_stock(&self, updates: &[StockUpdate]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin stock transaction", e))?;

        for update in updates {
            sqlx::query(
                "UPDATE products SET stock_quantity = $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(update.id.as_i64())
            .bind(update.stock_quantity)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to update stock", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit stock update", e))?;

        Ok(())
    }
}
