//! PostgreSQL implementation of AdminUserRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::admin::{AdminUser, NewAdminUser};
use crate::domain::foundation::{AdminRole, AdminUserId, DomainError, ErrorCode, Timestamp};
use crate::ports::AdminUserRepository;

const SELECT_USER: &str = r#"
    SELECT id, username, email, password_hash, role, created_at, updated_at
    FROM admin_users
"#;

/// PostgreSQL implementation of AdminUserRepository.
#[derive(Clone)]
pub struct PostgresAdminUserRepository {
    pool: PgPool,
}

impl PostgresAdminUserRepository {
    /// Creates a new PostgresAdminUserRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminUserRepository for PostgresAdminUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, DomainError> {
        let sql = format!("{} WHERE email = $1", SELECT_USER);
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch admin user by email", e))?;

        row.map(row_to_admin_user).transpose()
    }

    async fn find_by_id(&self, id: AdminUserId) -> Result<Option<AdminUser>, DomainError> {
        let sql = format!("{} WHERE id = $1", SELECT_USER);
        let row = sqlx::query(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch admin user", e))?;

        row.map(row_to_admin_user).transpose()
    }

    async fn create(&self, user: &NewAdminUser) -> Result<AdminUser, DomainError> {
        let sql = r#"
            INSERT INTO admin_users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, role, created_at, updated_at
        "#;
        let row = sqlx::query(sql)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(insert_error)?;

        row_to_admin_user(row)
    }

    async fn update_password(
        &self,
        id: AdminUserId,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE admin_users SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.as_i64())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update password", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AdminUserNotFound,
                format!("Admin user not found: {}", id),
            ));
        }

        Ok(())
    }
}

fn insert_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return DomainError::new(
                ErrorCode::DuplicateAdminUser,
                "Admin username or email already exists",
            );
        }
    }
    DomainError::database("Failed to insert admin user", err)
}

fn row_to_admin_user(row: PgRow) -> Result<AdminUser, DomainError> {
    let get_err = |field: &str, e: sqlx::Error| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", field, e),
        )
    };

    let id: i64 = row.try_get("id").map_err(|e| get_err("id", e))?;
    let role: String = row.try_get("role").map_err(|e| get_err("role", e))?;
    let role: AdminRole = role
        .parse()
        .map_err(|e: String| DomainError::new(ErrorCode::DatabaseError, e))?;
    let created_at: chrono::DateTime<chrono::Utc> =
        row.try_get("created_at").map_err(|e| get_err("created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> =
        row.try_get("updated_at").map_err(|e| get_err("updated_at", e))?;

    Ok(AdminUser {
        id: AdminUserId::new(id),
        username: row.try_get("username").map_err(|e| get_err("username", e))?,
        email: row.try_get("email").map_err(|e| get_err("email", e))?,
        password_hash: row
            .try_get("password_hash")
            .map_err(|e| get_err("password_hash", e))?,
        role,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}
