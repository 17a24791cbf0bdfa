//! Product command and query handlers.

mod create_product;
mod delete_product;
mod get_product;
mod list_products;
mod update_product;
mod update_stock;

pub use create_product::{CreateProductCommand, CreateProductHandler};
pub use delete_product::{DeleteProductCommand, DeleteProductHandler};
pub use get_product::{GetProductHandler, GetProductQuery};
pub use list_products::{ListProductsHandler, ListProductsQuery};
pub use update_product::{UpdateProductCommand, UpdateProductHandler};
pub use update_stock::{UpdateStockCommand, UpdateStockHandler};
