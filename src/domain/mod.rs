//! Domain layer - business logic with no infrastructure dependencies.

pub mod admin;
pub mod catalog;
pub mod foundation;
