//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write through the category, product and admin repositories;
//! query handlers read through the category and product readers. The table
//! controller sits on the consumer side of the REST API.

pub mod category_table;
pub mod handlers;

pub use category_table::CategoryTableController;
pub use handlers::{
    // Category handlers
    CreateCategoryCommand, CreateCategoryHandler, DeleteCategoryCommand, DeleteCategoryHandler,
    GetCategoryHandler, GetCategoryQuery, ListCategoriesHandler, ListCategoriesQuery,
    ListCategoriesResult, ListSubcategoriesHandler, ListSubcategoriesQuery,
    ReorderCategoriesCommand, ReorderCategoriesHandler, UpdateCategoryCommand,
    UpdateCategoryHandler,
    // Product handlers
    CreateProductCommand, CreateProductHandler, DeleteProductCommand, DeleteProductHandler,
    GetProductHandler, GetProductQuery, ListProductsHandler, ListProductsQuery,
    UpdateProductCommand, UpdateProductHandler, UpdateStockCommand, UpdateStockHandler,
    // Auth handlers
    ChangePasswordCommand, ChangePasswordHandler, GetCurrentUserHandler, GetCurrentUserQuery,
    LoginCommand, LoginHandler, LoginResult, SeedAdminCommand, SeedAdminHandler, SeedOutcome,
};
