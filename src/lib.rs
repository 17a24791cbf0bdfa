//! Catalog Admin - e-commerce back-office for hierarchical product categories
//!
//! The core is the category aggregator: given a flat snapshot of categories
//! with their own product counts, it computes recursive totals and enriches
//! both the flat and the nested listings for the admin table. Around it sit
//! the category store (PostgreSQL or in-memory), a JWT-protected REST API
//! and a typed REST client that drives the table controller.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
