//! HTTP handlers for product endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::application::handlers::product::{
    CreateProductCommand, CreateProductHandler, DeleteProductCommand, DeleteProductHandler,
    GetProductHandler, GetProductQuery, ListProductsHandler, ListProductsQuery,
    UpdateProductCommand, UpdateProductHandler, UpdateStockCommand, UpdateStockHandler,
};
use crate::domain::catalog::ProductError;
use crate::domain::foundation::{ErrorCode, ProductId};
use crate::ports::{CategoryRepository, ProductReader, ProductRepository};

use super::dto::{
    ListProductsParams, ProductListResponse, ProductMessageResponse, ProductRequest,
    ProductResponse, StockUpdateRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the product endpoints.
#[derive(Clone)]
pub struct ProductAppState {
    pub reader: Arc<dyn ProductReader>,
    pub repository: Arc<dyn ProductRepository>,
    /// Used to check that a product's category exists.
    pub categories: Arc<dyn CategoryRepository>,
}

impl ProductAppState {
    pub fn list_handler(&self) -> ListProductsHandler {
        ListProductsHandler::new(self.reader.clone())
    }

    pub fn get_handler(&self) -> GetProductHandler {
        GetProductHandler::new(self.reader.clone())
    }

    pub fn create_handler(&self) -> CreateProductHandler {
        CreateProductHandler::new(
            self.repository.clone(),
            self.reader.clone(),
            self.categories.clone(),
        )
    }

    pub fn update_handler(&self) -> UpdateProductHandler {
        UpdateProductHandler::new(
            self.repository.clone(),
            self.reader.clone(),
            self.categories.clone(),
        )
    }

    pub fn delete_handler(&self) -> DeleteProductHandler {
        DeleteProductHandler::new(self.repository.clone())
    }

    pub fn stock_handler(&self) -> UpdateStockHandler {
        UpdateStockHandler::new(self.repository.clone())
    }
}

fn parse_id(raw: &str) -> Result<ProductId, ProductApiError> {
    raw.parse::<ProductId>()
        .map_err(|_| ProductError::validation("id", format!("Invalid product id: {}", raw)).into())
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/products - Paged, filtered listing
pub async fn list_products(
    State(state): State<ProductAppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ListProductsParams>,
) -> Result<impl IntoResponse, ProductApiError> {
    let filter = params.to_filter()?;
    let page = state
        .list_handler()
        .handle(ListProductsQuery {
            filter: filter.clone(),
        })
        .await?;

    Ok(Json(ProductListResponse::new(page, &filter)))
}

/// GET /api/products/:id - One product
pub async fn get_product(
    State(state): State<ProductAppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ProductApiError> {
    let id = parse_id(&id)?;
    let product = state.get_handler().handle(GetProductQuery { id }).await?;

    Ok(Json(ProductResponse {
        product: product.into(),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (admin only)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/products - Create a product
pub async fn create_product(
    State(state): State<ProductAppState>,
    RequireAdmin(_user): RequireAdmin,
    Json(request): Json<ProductRequest>,
) -> Result<impl IntoResponse, ProductApiError> {
    let product = state
        .create_handler()
        .handle(CreateProductCommand {
            draft: request.into(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductMessageResponse::with_product(
            "Product created successfully",
            product,
        )),
    ))
}

/// PUT /api/products/:id - Replace a product
pub async fn update_product(
    State(state): State<ProductAppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<String>,
    Json(request): Json<ProductRequest>,
) -> Result<impl IntoResponse, ProductApiError> {
    let id = parse_id(&id)?;
    let product = state
        .update_handler()
        .handle(UpdateProductCommand {
            id,
            draft: request.into(),
        })
        .await?;

    Ok(Json(ProductMessageResponse::with_product(
        "Product updated successfully",
        product,
    )))
}

/// DELETE /api/products/:id - Delete a product
pub async fn delete_product(
    State(state): State<ProductAppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ProductApiError> {
    let id = parse_id(&id)?;
    state
        .delete_handler()
        .handle(DeleteProductCommand { id })
        .await?;

    Ok(Json(ProductMessageResponse::new("Product deleted successfully")))
}

/// PUT /api/products/bulk/stock - Set several stock levels atomically
pub async fn update_stock(
    State(state): State<ProductAppState>,
    RequireAdmin(_user): RequireAdmin,
    Json(request): Json<StockUpdateRequest>,
) -> Result<impl IntoResponse, ProductApiError> {
    state
        .stock_handler()
        .handle(UpdateStockCommand {
            updates: request.updates.unwrap_or_default(),
        })
        .await?;

    Ok(Json(ProductMessageResponse::new("Stock updated successfully")))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for HTTP responses.
#[derive(Debug)]
pub struct ProductApiError(ProductError);

impl From<ProductError> for ProductApiError {
    fn from(err: ProductError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ProductApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            ProductError::NotFound => StatusCode::NOT_FOUND,
            ProductError::DuplicateSku => StatusCode::CONFLICT,
            ProductError::CategoryNotFound(_)
            | ProductError::EmptyStockUpdate
            | ProductError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            ProductError::Rejected { code, .. } => match code {
                ErrorCode::Forbidden => StatusCode::FORBIDDEN,
                _ => StatusCode::UNAUTHORIZED,
            },
            ProductError::Infrastructure(msg) => {
                tracing::error!(error = %msg, "Product request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match &self.0 {
            ProductError::ValidationFailed { field, message } => ErrorResponse::with_details(
                self.0.code().to_string(),
                message.clone(),
                serde_json::json!({ "field": field }),
            ),
            ProductError::Infrastructure(_) => {
                ErrorResponse::new(self.0.code().to_string(), "Internal server error")
            }
            other => ErrorResponse::new(other.code().to_string(), other.message()),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CategoryId;

    fn status_of(err: ProductError) -> StatusCode {
        ProductApiError::from(err).into_response().status()
    }

    #[test]
    fn errors_map_to_status_codes() {
        assert_eq!(status_of(ProductError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(ProductError::DuplicateSku), StatusCode::CONFLICT);
        assert_eq!(status_of(ProductError::EmptyStockUpdate), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(ProductError::CategoryNotFound(CategoryId::new(3))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ProductError::Infrastructure("db down".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn invalid_path_id_is_bad_request() {
        let err = parse_id("lamp").unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(parse_id("4").unwrap(), ProductId::new(4));
    }
}
