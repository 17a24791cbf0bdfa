//! PostgreSQL implementation of ProductReader.
//!
//! Filters are appended with `QueryBuilder` so every user-supplied value is a
//! bind parameter. The count and page queries share the same WHERE clause.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::catalog::{Product, ProductFilter, ProductPage, StockStatus};
use crate::domain::foundation::{CategoryId, DomainError, ProductId, Timestamp};
use crate::ports::ProductReader;

use super::column;

const SELECT_PRODUCT: &str = r#"
    SELECT p.id, p.category_id, p.name, p.description, p.sku, p.price, p.cost_price,
           p.stock_quantity, p.low_stock_threshold, p.image_url, p.is_active,
           p.is_featured, p.created_at, p.updated_at,
           c.name AS category_name,
           parent_c.name AS parent_category_name
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
    LEFT JOIN categories parent_c ON parent_c.id = c.parent_id
"#;

const COUNT_PRODUCTS: &str = r#"
    SELECT COUNT(*)
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// PostgreSQL implementation of ProductReader.
#[derive(Clone)]
pub struct PostgresProductReader {
    pool: PgPool,
}

impl PostgresProductReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escapes LIKE wildcards so the search term matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    builder.push(" WHERE TRUE");

    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        builder
            .push(" AND (p.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.sku ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(category) = &filter.category {
        builder.push(" AND c.name = ").push_bind(category.clone());
    }

    match filter.status {
        None => {}
        Some(StockStatus::Active) => {
            builder.push(" AND p.is_active AND p.stock_quantity > 0");
        }
        Some(StockStatus::OutOfStock) => {
            builder.push(" AND p.stock_quantity = 0");
        }
        Some(StockStatus::LowStock) => {
            builder.push(" AND p.stock_quantity > 0 AND p.stock_quantity <= p.low_stock_threshold");
        }
        Some(StockStatus::Inactive) => {
            builder.push(" AND NOT p.is_active");
        }
    }
}

#[async_trait]
impl ProductReader for PostgresProductReader {
    async fn list(&self, filter: &ProductFilter) -> Result<ProductPage, DomainError> {
        let mut count = QueryBuilder::<Postgres>::new(COUNT_PRODUCTS);
        push_filters(&mut count, filter);
        let (total,): (i64,) = count
            .build_query_as()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to count products", e))?;

        let mut page = QueryBuilder::<Postgres>::new(SELECT_PRODUCT);
        push_filters(&mut page, filter);
        page.push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ")
            .push_bind(i64::from(filter.limit))
            .push(" OFFSET ")
            .push_bind(i64::try_from(filter.offset()).unwrap_or(i64::MAX));

        let rows = page
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list products", e))?;

        Ok(ProductPage {
            products: rows
                .into_iter()
                .map(row_to_product)
                .collect::<Result<_, _>>()?,
            total: total.max(0) as u64,
        })
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, DomainError> {
        let sql = format!("{} WHERE p.id = $1", SELECT_PRODUCT);
        let row = sqlx::query(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch product", e))?;

        row.map(row_to_product).transpose()
    }
}

fn row_to_product(row: PgRow) -> Result<Product, DomainError> {
    let category_id: Option<i64> = column(&row, "category_id")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(&row, "updated_at")?;

    Ok(Product {
        id: ProductId::new(column(&row, "id")?),
        category_id: category_id.map(CategoryId::new),
        name: column(&row, "name")?,
        description: column(&row, "description")?,
        sku: column(&row, "sku")?,
        price: column(&row, "price")?,
        cost_price: column(&row, "cost_price")?,
        stock_quantity: column(&row, "stock_quantity")?,
        low_stock_threshold: column(&row, "low_stock_threshold")?,
        image_url: column(&row, "image_url")?,
        is_active: column(&row, "is_active")?,
        is_featured: column(&row, "is_featured")?,
        category_name: column(&row, "category_name")?,
        parent_category_name: column(&row, "parent_category_name")?,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("lamp"), "%lamp%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn filters_bind_user_values() {
        let filter = ProductFilter::default()
            .with_search("lamp")
            .with_category("Lighting")
            .with_status(StockStatus::LowStock);
        let mut builder = QueryBuilder::<Postgres>::new(COUNT_PRODUCTS);
        push_filters(&mut builder, &filter);
        let sql = builder.sql();

        assert!(sql.contains("p.name ILIKE $1 OR p.sku ILIKE $2 OR p.description ILIKE $3"));
        assert!(sql.contains("c.name = $4"));
        assert!(sql.contains("p.stock_quantity <= p.low_stock_threshold"));
        assert!(!sql.contains("lamp"));
    }
}
