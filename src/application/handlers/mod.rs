//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod auth;
pub mod category;
pub mod product;

pub use auth::{
    ChangePasswordCommand, ChangePasswordHandler, GetCurrentUserHandler, GetCurrentUserQuery,
    LoginCommand, LoginHandler, LoginResult, SeedAdminCommand, SeedAdminHandler, SeedOutcome,
};
pub use category::{
    CreateCategoryCommand, CreateCategoryHandler, DeleteCategoryCommand, DeleteCategoryHandler,
    GetCategoryHandler, GetCategoryQuery, ListCategoriesHandler, ListCategoriesQuery,
    ListCategoriesResult, ListSubcategoriesHandler, ListSubcategoriesQuery,
    ReorderCategoriesCommand, ReorderCategoriesHandler, UpdateCategoryCommand,
    UpdateCategoryHandler,
};
pub use product::{
    CreateProductCommand, CreateProductHandler, DeleteProductCommand, DeleteProductHandler,
    GetProductHandler, GetProductQuery, ListProductsHandler, ListProductsQuery,
    UpdateProductCommand, UpdateProductHandler, UpdateStockCommand, UpdateStockHandler,
};
