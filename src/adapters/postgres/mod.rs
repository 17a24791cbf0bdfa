//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresCategoryReader` - Category queries with parent names and product counts
//! - `PostgresCategoryRepository` - Category writes and delete guards
//! - `PostgresProductReader` - Filtered, paged product listing
//! - `PostgresProductRepository` - Product writes and bulk stock updates
//! - `PostgresAdminUserRepository` - Back-office user persistence

mod admin_user_repository;
mod category_reader;
mod category_repository;
mod product_reader;
mod product_repository;

pub use admin_user_repository::PostgresAdminUserRepository;
pub use category_reader::PostgresCategoryReader;
pub use category_repository::PostgresCategoryRepository;
pub use product_reader::PostgresProductReader;
pub use product_repository::PostgresProductRepository;

use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::foundation::{DomainError, ErrorCode};

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}
