//! HTTP handlers for category endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::application::handlers::category::{
    CreateCategoryCommand, CreateCategoryHandler, DeleteCategoryCommand, DeleteCategoryHandler,
    GetCategoryHandler, GetCategoryQuery, ListCategoriesHandler, ListCategoriesQuery,
    ListCategoriesResult, ListSubcategoriesHandler, ListSubcategoriesQuery,
    ReorderCategoriesCommand, ReorderCategoriesHandler, UpdateCategoryCommand,
    UpdateCategoryHandler,
};
use crate::domain::catalog::CategoryError;
use crate::domain::foundation::{CategoryId, ErrorCode};
use crate::ports::{CategoryReader, CategoryRepository};

use super::dto::{
    CategoryRequest, CategoryResponse, ListCategoriesParams, ListCategoriesResponse,
    MessageResponse, ReorderRequest, SubcategoriesResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the category endpoints.
#[derive(Clone)]
pub struct CategoryAppState {
    pub reader: Arc<dyn CategoryReader>,
    pub repository: Arc<dyn CategoryRepository>,
}

impl CategoryAppState {
    pub fn list_handler(&self) -> ListCategoriesHandler {
        ListCategoriesHandler::new(self.reader.clone())
    }

    pub fn get_handler(&self) -> GetCategoryHandler {
        GetCategoryHandler::new(self.reader.clone())
    }

    pub fn subcategories_handler(&self) -> ListSubcategoriesHandler {
        ListSubcategoriesHandler::new(self.reader.clone())
    }

    pub fn create_handler(&self) -> CreateCategoryHandler {
        CreateCategoryHandler::new(self.repository.clone(), self.reader.clone())
    }

    pub fn update_handler(&self) -> UpdateCategoryHandler {
        UpdateCategoryHandler::new(self.repository.clone(), self.reader.clone())
    }

    pub fn delete_handler(&self) -> DeleteCategoryHandler {
        DeleteCategoryHandler::new(self.repository.clone())
    }

    pub fn reorder_handler(&self) -> ReorderCategoriesHandler {
        ReorderCategoriesHandler::new(self.repository.clone())
    }
}

fn parse_id(raw: &str) -> Result<CategoryId, CategoryApiError> {
    raw.parse::<CategoryId>()
        .map_err(|_| CategoryError::validation("id", format!("Invalid category id: {}", raw)).into())
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/categories - Top-level categories, optionally nested
pub async fn list_categories(
    State(state): State<CategoryAppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ListCategoriesParams>,
) -> Result<impl IntoResponse, CategoryApiError> {
    let query = ListCategoriesQuery {
        include_subcategories: params.include_subcategories(),
    };

    let response = match state.list_handler().handle(query).await? {
        ListCategoriesResult::Nested(listing) => ListCategoriesResponse::Nested(listing),
        ListCategoriesResult::TopLevel(categories) => {
            ListCategoriesResponse::TopLevel { categories }
        }
    };

    Ok(Json(response))
}

/// GET /api/categories/:id/subcategories - Direct children
pub async fn list_subcategories(
    State(state): State<CategoryAppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CategoryApiError> {
    let parent_id = parse_id(&id)?;
    let subcategories = state
        .subcategories_handler()
        .handle(ListSubcategoriesQuery { parent_id })
        .await?;

    Ok(Json(SubcategoriesResponse { subcategories }))
}

/// GET /api/categories/:id - One category with parent name and children
pub async fn get_category(
    State(state): State<CategoryAppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CategoryApiError> {
    let id = parse_id(&id)?;
    let category = state.get_handler().handle(GetCategoryQuery { id }).await?;

    Ok(Json(CategoryResponse { category }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (admin only)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/categories - Create a category
pub async fn create_category(
    State(state): State<CategoryAppState>,
    RequireAdmin(_user): RequireAdmin,
    Json(request): Json<CategoryRequest>,
) -> Result<impl IntoResponse, CategoryApiError> {
    let category = state
        .create_handler()
        .handle(CreateCategoryCommand {
            draft: request.into(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_category(
            "Category created successfully",
            category,
        )),
    ))
}

/// PUT /api/categories/:id - Update a category
pub async fn update_category(
    State(state): State<CategoryAppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<String>,
    Json(request): Json<CategoryRequest>,
) -> Result<impl IntoResponse, CategoryApiError> {
    let id = parse_id(&id)?;
    let category = state
        .update_handler()
        .handle(UpdateCategoryCommand {
            id,
            draft: request.into(),
        })
        .await?;

    Ok(Json(MessageResponse::with_category(
        "Category updated successfully",
        category,
    )))
}

/// DELETE /api/categories/:id - Delete an unused category
pub async fn delete_category(
    State(state): State<CategoryAppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CategoryApiError> {
    let id = parse_id(&id)?;
    state
        .delete_handler()
        .handle(DeleteCategoryCommand { id })
        .await?;

    Ok(Json(MessageResponse::new("Category deleted successfully")))
}

/// PUT /api/categories/reorder - Bulk sort order update
pub async fn reorder_categories(
    State(state): State<CategoryAppState>,
    RequireAdmin(_user): RequireAdmin,
    Json(request): Json<ReorderRequest>,
) -> Result<impl IntoResponse, CategoryApiError> {
    state
        .reorder_handler()
        .handle(ReorderCategoriesCommand {
            positions: request.categories.unwrap_or_default(),
        })
        .await?;

    Ok(Json(MessageResponse::new("Categories reordered successfully")))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for HTTP responses.
#[derive(Debug)]
pub struct CategoryApiError(CategoryError);

impl From<CategoryError> for CategoryApiError {
    fn from(err: CategoryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CategoryApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            CategoryError::NotFound => StatusCode::NOT_FOUND,
            CategoryError::Duplicate
            | CategoryError::HasProducts(_)
            | CategoryError::HasSubcategories(_)
            | CategoryError::InUse(_) => StatusCode::CONFLICT,
            CategoryError::Rejected { code, .. } => match code {
                ErrorCode::Forbidden => StatusCode::FORBIDDEN,
                _ => StatusCode::UNAUTHORIZED,
            },
            CategoryError::SelfParent
            | CategoryError::ParentNotFound(_)
            | CategoryError::CyclicParent(_)
            | CategoryError::EmptyReorder
            | CategoryError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            CategoryError::Infrastructure(msg) => {
                tracing::error!(error = %msg, "Category request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match &self.0 {
            CategoryError::ValidationFailed { field, message } => ErrorResponse::with_details(
                self.0.code().to_string(),
                message.clone(),
                serde_json::json!({ "field": field }),
            ),
            CategoryError::Infrastructure(_) => {
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

    fn status_of(err: CategoryError) -> StatusCode {
        CategoryApiError::from(err).into_response().status()
    }

    #[test]
    fn errors_map_to_status_codes() {
        assert_eq!(status_of(CategoryError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(CategoryError::Duplicate), StatusCode::CONFLICT);
        assert_eq!(status_of(CategoryError::HasProducts(2)), StatusCode::CONFLICT);
        assert_eq!(status_of(CategoryError::HasSubcategories(1)), StatusCode::CONFLICT);
        assert_eq!(status_of(CategoryError::SelfParent), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(CategoryError::EmptyReorder), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(CategoryError::CyclicParent(CategoryId::new(2))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CategoryError::infrastructure("db down")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn relayed_errors_keep_their_status() {
        assert_eq!(
            status_of(CategoryError::InUse("still referenced".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(CategoryError::Rejected {
                code: ErrorCode::Forbidden,
                message: "Admin access required".to_string(),
            }),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(CategoryError::Rejected {
                code: ErrorCode::Unauthorized,
                message: "Invalid token".to_string(),
            }),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn invalid_path_id_is_bad_request() {
        let err = parse_id("abc").unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(parse_id("12").unwrap(), CategoryId::new(12));
    }
}
