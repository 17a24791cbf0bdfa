//! In-memory adapters for tests and database-less runs.

mod admin_user_repository;
mod catalog_store;

pub use admin_user_repository::InMemoryAdminUserRepository;
pub use catalog_store::InMemoryCatalogStore;
