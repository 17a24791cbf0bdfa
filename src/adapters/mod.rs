//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Categories, products and admin users on PostgreSQL
//! - `memory` - In-memory store for tests and database-less runs
//! - `auth` - JWT token service and a mock validator
//! - `http` - axum REST API
//! - `api_client` - reqwest client for the REST API

pub mod api_client;
pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;

pub use api_client::{ApiClient, ApiClientConfig, AuthSession, ClientError};
pub use auth::{JwtConfig, JwtTokenService, MockSessionValidator};
pub use memory::{InMemoryAdminUserRepository, InMemoryCatalogStore};
pub use postgres::{
    PostgresAdminUserRepository, PostgresCategoryReader, PostgresCategoryRepository,
    PostgresProductReader, PostgresProductRepository,
};
