//! PostgreSQL implementation of CategoryRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::catalog::{CategoryDraft, SortPosition};
use crate::domain::foundation::{CategoryId, DomainError, ErrorCode};
use crate::ports::CategoryRepository;

/// PostgreSQL implementation of CategoryRepository.
#[derive(Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    /// Creates a new PostgresCategoryRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps unique violations to `DuplicateCategory`, everything else to `DatabaseError`.
fn write_error(context: &str, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return DomainError::new(
                ErrorCode::DuplicateCategory,
                "Category name or slug already exists",
            )
            .with_detail("constraint", db.constraint().unwrap_or("unknown"));
        }
    }
    DomainError::database(context, err)
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, draft: &CategoryDraft) -> Result<CategoryId, DomainError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO categories (
                name, slug, description, image_url, parent_id, is_active, sort_order
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.slug)
        .bind(&draft.description)
        .bind(&draft.image_url)
        .bind(draft.parent_id.map(|p| p.as_i64()))
        .bind(draft.is_active)
        .bind(draft.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("Failed to insert category", e))?;

        Ok(CategoryId::new(id))
    }

    async fn update(&self, id: CategoryId, draft: &CategoryDraft) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE categories SET
                name = $2,
                slug = $3,
                description = $4,
                image_url = $5,
                parent_id = $6,
                is_active = $7,
                sort_order = $8,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(&draft.name)
        .bind(&draft.slug)
        .bind(&draft.description)
        .bind(&draft.image_url)
        .bind(draft.parent_id.map(|p| p.as_i64()))
        .bind(draft.is_active)
        .bind(draft.sort_order)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("Failed to update category", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CategoryNotFound,
                format!("Category not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn delete(&self, id: CategoryId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete category", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CategoryNotFound,
                format!("Category not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn reorder(&self, positions: &[SortPosition]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin reorder transaction", e))?;

        for position in positions {
            sqlx::query(
                "UPDATE categories SET sort_order = $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(position.id.as_i64())
            .bind(position.sort_order)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to reorder categories", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit reorder", e))?;

        Ok(())
    }

    async fn exists(&self, id: CategoryId) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories WHERE id = $1")
            .bind(id.as_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to check category existence", e))?;

        Ok(result.0 > 0)
    }

    async fn parent_of(&self, id: CategoryId) -> Result<Option<Option<CategoryId>>, DomainError> {
        let row: Option<(Option<i64>,)> =
            sqlx::query_as("SELECT parent_id FROM categories WHERE id = $1")
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to fetch category parent", e))?;

        Ok(row.map(|(parent,)| parent.map(CategoryId::new)))
    }

    async fn count_products(&self, id: CategoryId) -> Result<u64, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products WHERE category_id = $1")
            .bind(id.as_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to count category products", e))?;

        Ok(result.0 as u64)
    }

    async fn count_subcategories(&self, id: CategoryId) -> Result<u64, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories WHERE parent_id = $1")
            .bind(id.as_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to count subcategories", e))?;

        Ok(result.0 as u64)
    }
}
