//! Category command and query handlers.

mod create_category;
mod delete_category;
mod get_category;
mod list_categories;
mod reorder_categories;
mod update_category;

pub use create_category::{CreateCategoryCommand, CreateCategoryHandler};
pub use delete_category::{DeleteCategoryCommand, DeleteCategoryHandler};
pub use get_category::{
    GetCategoryHandler, GetCategoryQuery, ListSubcategoriesHandler, ListSubcategoriesQuery,
};
pub use list_categories::{nest, ListCategoriesHandler, ListCategoriesQuery, ListCategoriesResult};
pub use reorder_categories::{ReorderCategoriesCommand, ReorderCategoriesHandler};
pub use update_category::{UpdateCategoryCommand, UpdateCategoryHandler};
