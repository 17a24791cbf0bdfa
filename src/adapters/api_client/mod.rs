//! REST client for the admin panel.
//!
//! Wraps the HTTP API with typed calls and a process-wide token session,
//! and implements the [`crate::ports::CategoryCatalog`] port for the table
//! controller.

mod client;
mod error;
mod session;

pub use client::{ApiClient, ApiClientConfig};
pub use error::{ClientError, NETWORK_ERROR};
pub use session::AuthSession;
