//! PostgreSQL implementation of CategoryReader.
//!
//! Every query decorates rows with the parent's name and the number of active
//! products assigned directly to the category.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::catalog::Category;
use crate::domain::foundation::{CategoryId, DomainError, Timestamp};
use crate::ports::CategoryReader;

use super::column;

const SELECT_CATEGORY: &str = r#"
    SELECT c.id, c.parent_id, c.name, c.slug, c.description, c.image_url,
           c.is_active, c.sort_order, c.created_at, c.updated_at,
           p.name AS parent_name,
           (SELECT COUNT(*) FROM products pr
             WHERE pr.category_id = c.id AND pr.is_active) AS product_count
    FROM categories c
    LEFT JOIN categories p ON p.id = c.parent_id
"#;

/// PostgreSQL implementation of CategoryReader.
#[derive(Clone)]
pub struct PostgresCategoryReader {
    pool: PgPool,
}

impl PostgresCategoryReader {
    /// Creates a new PostgresCategoryReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_many(
        &self,
        filter_and_order: &str,
        parent_id: Option<CategoryId>,
        context: &str,
    ) -> Result<Vec<Category>, DomainError> {
        let sql = format!("{} {}", SELECT_CATEGORY, filter_and_order);
        let mut query = sqlx::query(&sql);
        if let Some(parent_id) = parent_id {
            query = query.bind(parent_id.as_i64());
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(context, e))?;

        rows.into_iter().map(row_to_category).collect()
    }
}

#[async_trait]
impl CategoryReader for PostgresCategoryReader {
    async fn list_all(&self) -> Result<Vec<Category>, DomainError> {
        self.fetch_many(
            "ORDER BY (c.parent_id IS NULL) DESC, c.sort_order, c.name",
            None,
            "Failed to list categories",
        )
        .await
    }

    async fn list_top_level(&self) -> Result<Vec<Category>, DomainError> {
        self.fetch_many(
            "WHERE c.parent_id IS NULL ORDER BY c.sort_order, c.name",
            None,
            "Failed to list top-level categories",
        )
        .await
    }

    async fn list_subcategories(
        &self,
        parent_id: CategoryId,
    ) -> Result<Vec<Category>, DomainError> {
        self.fetch_many(
            "WHERE c.parent_id = $1 ORDER BY c.sort_order, c.name",
            Some(parent_id),
            "Failed to list subcategories",
        )
        .await
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, DomainError> {
        let sql = format!("{} WHERE c.id = $1", SELECT_CATEGORY);
        let row = sqlx::query(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch category", e))?;

        row.map(row_to_category).transpose()
    }
}

fn row_to_category(row: PgRow) -> Result<Category, DomainError> {
    let parent_id: Option<i64> = column(&row, "parent_id")?;
    let product_count: i64 = column(&row, "product_count")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(&row, "updated_at")?;

    Ok(Category {
        id: CategoryId::new(column(&row, "id")?),
        parent_id: parent_id.map(CategoryId::new),
        name: column(&row, "name")?,
        slug: column(&row, "slug")?,
        description: column(&row, "description")?,
        image_url: column(&row, "image_url")?,
        is_active: column(&row, "is_active")?,
        sort_order: column(&row, "sort_order")?,
        parent_name: column(&row, "parent_name")?,
        product_count: Some(product_count.max(0) as u64),
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}
