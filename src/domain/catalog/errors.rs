//! Category and product error types.

use crate::domain::foundation::{CategoryId, DomainError, ErrorCode};

fn field_of(err: &DomainError) -> String {
    err.details
        .get("field")
        .cloned()
        .unwrap_or_else(|| "unknown".to_string())
}

/// Errors raised by category store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    /// Category was not found.
    NotFound,
    /// Name or slug already used by another category.
    Duplicate,
    /// A category was given itself as parent.
    SelfParent,
    /// The requested parent does not exist.
    ParentNotFound(CategoryId),
    /// The requested parent is a descendant of the category.
    CyclicParent(CategoryId),
    /// Products still reference the category.
    HasProducts(u64),
    /// Subcategories still reference the category.
    HasSubcategories(u64),
    /// Reorder was called without positions.
    EmptyReorder,
    /// The server refused a delete because the category is still referenced.
    InUse(String),
    /// The caller is not signed in or lacks the required role.
    Rejected { code: ErrorCode, message: String },
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl CategoryError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CategoryError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        CategoryError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            CategoryError::NotFound => ErrorCode::CategoryNotFound,
            CategoryError::Duplicate => ErrorCode::DuplicateCategory,
            CategoryError::SelfParent
            | CategoryError::ParentNotFound(_)
            | CategoryError::CyclicParent(_)
            | CategoryError::EmptyReorder
            | CategoryError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CategoryError::HasProducts(_)
            | CategoryError::HasSubcategories(_)
            | CategoryError::InUse(_) => ErrorCode::CategoryInUse,
            CategoryError::Rejected { code, .. } => *code,
            CategoryError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            CategoryError::NotFound => "Category not found".to_string(),
            CategoryError::Duplicate => "Category name or slug already exists".to_string(),
            CategoryError::SelfParent => "Category cannot be its own parent".to_string(),
            CategoryError::ParentNotFound(id) => format!("Parent category not found: {}", id),
            CategoryError::CyclicParent(id) => {
                format!("Category {} is a descendant and cannot become the parent", id)
            }
            CategoryError::HasProducts(_) => {
                "Cannot delete category with existing products. Move products to another category first."
                    .to_string()
            }
            CategoryError::HasSubcategories(_) => {
                "Cannot delete category with subcategories. Delete subcategories first.".to_string()
            }
            CategoryError::EmptyReorder => "Categories array is required".to_string(),
            CategoryError::InUse(message)
            | CategoryError::Rejected { message, .. }
            | CategoryError::ValidationFailed { message, .. } => message.clone(),
            CategoryError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CategoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CategoryError {}

impl From<DomainError> for CategoryError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::CategoryNotFound => CategoryError::NotFound,
            ErrorCode::DuplicateCategory => CategoryError::Duplicate,
            ErrorCode::CategoryInUse => CategoryError::InUse(err.message),
            ErrorCode::Unauthorized | ErrorCode::Forbidden => CategoryError::Rejected {
                code: err.code,
                message: err.message,
            },
            ErrorCode::ValidationFailed => CategoryError::ValidationFailed {
                field: field_of(&err),
                message: err.message,
            },
            _ => CategoryError::Infrastructure(err.to_string()),
        }
    }
}

/// Errors raised by product store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    NotFound,
    /// Another product already uses the SKU.
    DuplicateSku,
    /// The product names a category that does not exist.
    CategoryNotFound(CategoryId),
    /// Bulk stock update was called without updates.
    EmptyStockUpdate,
    ValidationFailed { field: String, message: String },
    /// The caller is not signed in or lacks the required role.
    Rejected { code: ErrorCode, message: String },
    Infrastructure(String),
}

impl ProductError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ProductError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ProductError::NotFound => ErrorCode::ProductNotFound,
            ProductError::DuplicateSku => ErrorCode::DuplicateProduct,
            ProductError::CategoryNotFound(_)
            | ProductError::EmptyStockUpdate
            | ProductError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ProductError::Rejected { code, .. } => *code,
            ProductError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ProductError::NotFound => "Product not found".to_string(),
            ProductError::DuplicateSku => "SKU already exists".to_string(),
            ProductError::CategoryNotFound(id) => format!("Category not found: {}", id),
            ProductError::EmptyStockUpdate => "Updates array is required".to_string(),
            ProductError::ValidationFailed { message, .. }
            | ProductError::Rejected { message, .. } => message.clone(),
            ProductError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ProductError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ProductError {}

impl From<DomainError> for ProductError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ProductNotFound => ProductError::NotFound,
            ErrorCode::DuplicateProduct => ProductError::DuplicateSku,
            ErrorCode::ValidationFailed => ProductError::ValidationFailed {
                field: field_of(&err),
                message: err.message,
            },
            ErrorCode::Unauthorized | ErrorCode::Forbidden => ProductError::Rejected {
                code: err.code,
                message: err.message,
            },
            _ => ProductError::Infrastructure(err.to_string()),
        }
    }
}
