//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, authentication types and error types
//! that form the vocabulary of the catalog back-office.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AdminRole, AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AdminUserId, CategoryId, ProductId};
pub use timestamp::Timestamp;
