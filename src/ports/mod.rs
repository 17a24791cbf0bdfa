//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Store Ports
//!
//! - `CategoryReader` / `CategoryRepository` - Category hierarchy read and write sides
//! - `ProductReader` / `ProductRepository` - Product listing and writes
//! - `AdminUserRepository` - Back-office user persistence
//!
//! ## Auth Ports
//!
//! - `SessionValidator` - Bearer token validation
//! - `TokenIssuer` - Token signing at login
//!
//! ## Consumer Ports
//!
//! - `CategoryCatalog` - Remote category access used by the admin table

mod admin_user_repository;
mod category_catalog;
mod category_reader;
mod category_repository;
mod product_reader;
mod product_repository;
mod session_validator;
mod token_issuer;

pub use admin_user_repository::AdminUserRepository;
pub use category_catalog::{CategoryCatalog, CategoryListing};
pub use category_reader::CategoryReader;
pub use category_repository::CategoryRepository;
pub use product_reader::ProductReader;
pub use product_repository::ProductRepository;
pub use session_validator::SessionValidator;
pub use token_issuer::TokenIssuer;
