//! REST client for the catalog admin API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::ClientError;
use super::session::AuthSession;
use crate::adapters::http::auth::{
    AuthMessageResponse, ChangePasswordRequest, CurrentUserResponse, LoginRequest, LoginResponse,
};
use crate::adapters::http::categories::{
    CategoryRequest, CategoryResponse, MessageResponse, ReorderRequest, SubcategoriesResponse,
};
use crate::adapters::http::products::{
    ListProductsParams, ProductBody, ProductListResponse, ProductMessageResponse, ProductRequest,
    ProductResponse, StockUpdateRequest,
};
use crate::domain::admin::AdminProfile;
use crate::domain::catalog::{
    Category, CategoryDraft, CategoryWithSubcategories, ProductDraft, SortPosition, StockUpdate,
};
use crate::domain::foundation::{CategoryId, DomainError, ProductId};
use crate::ports::{CategoryCatalog, CategoryListing};

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// API root, e.g. `http://localhost:5000/api`.
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Deserialize)]
struct TopLevelBody {
    categories: Vec<Category>,
}

/// Typed client over the REST API.
///
/// Each request sends `Content-Type: application/json` and, when the
/// session holds a token, `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: AuthSession,
}

impl ApiClient {
    /// Creates a client bound to the process-wide session.
    pub fn new(config: ApiClientConfig) -> Result<Self, ClientError> {
        Self::with_session(config, AuthSession::global())
    }

    /// Creates a client bound to the given session.
    pub fn with_session(config: ApiClientConfig, session: AuthSession) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header(header::CONTENT_TYPE, "application/json");

        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ClientError::from_body(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), error = %err, "API request failed");
            return Err(err);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Categories
    // ════════════════════════════════════════════════════════════════════════════

    /// `GET /categories?include_subcategories=true`
    pub async fn list_categories(&self) -> Result<CategoryListing, ClientError> {
        self.send(
            self.request(Method::GET, "/categories")
                .query(&[("include_subcategories", "true")]),
        )
        .await
    }

    /// `GET /categories?include_subcategories=false`
    pub async fn list_top_level_categories(&self) -> Result<Vec<Category>, ClientError> {
        let body: TopLevelBody = self
            .send(
                self.request(Method::GET, "/categories")
                    .query(&[("include_subcategories", "false")]),
            )
            .await?;
        Ok(body.categories)
    }

    pub async fn get_category(&self, id: CategoryId) -> Result<CategoryWithSubcategories, ClientError> {
        let body: CategoryResponse = self
            .send(self.request(Method::GET, &format!("/categories/{}", id)))
            .await?;
        Ok(body.category)
    }

    pub async fn list_subcategories(&self, id: CategoryId) -> Result<Vec<Category>, ClientError> {
        let body: SubcategoriesResponse = self
            .send(self.request(Method::GET, &format!("/categories/{}/subcategories", id)))
            .await?;
        Ok(body.subcategories)
    }

    pub async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, ClientError> {
        let body: MessageResponse = self
            .send(
                self.request(Method::POST, "/categories")
                    .json(&CategoryRequest::from(draft)),
            )
            .await?;
        saved_category(body)
    }

    pub async fn update_category(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Category, ClientError> {
        let body: MessageResponse = self
            .send(
                self.request(Method::PUT, &format!("/categories/{}", id))
                    .json(&CategoryRequest::from(draft)),
            )
            .await?;
        saved_category(body)
    }

    pub async fn delete_category(&self, id: CategoryId) -> Result<String, ClientError> {
        let body: MessageResponse = self
            .send(self.request(Method::DELETE, &format!("/categories/{}", id)))
            .await?;
        Ok(body.message)
    }

    pub async fn reorder_categories(&self, positions: &[SortPosition]) -> Result<String, ClientError> {
        let body: MessageResponse = self
            .send(
                self.request(Method::PUT, "/categories/reorder")
                    .json(&ReorderRequest {
                        categories: Some(positions.to_vec()),
                    }),
            )
            .await?;
        Ok(body.message)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Products
    // ════════════════════════════════════════════════════════════════════════════

    /// `GET /products` with the given filters; unset fields are left out.
    pub async fn list_products(
        &self,
        params: &ListProductsParams,
    ) -> Result<ProductListResponse, ClientError> {
        self.send(self.request(Method::GET, "/products").query(params))
            .await
    }

    pub async fn get_product(&self, id: ProductId) -> Result<ProductBody, ClientError> {
        let body: ProductResponse = self
            .send(self.request(Method::GET, &format!("/products/{}", id)))
            .await?;
        Ok(body.product)
    }

    pub async fn create_product(&self, draft: &ProductDraft) -> Result<ProductBody, ClientError> {
        let body: ProductMessageResponse = self
            .send(
                self.request(Method::POST, "/products")
                    .json(&ProductRequest::from(draft)),
            )
            .await?;
        saved_product(body)
    }

    pub async fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<ProductBody, ClientError> {
        let body: ProductMessageResponse = self
            .send(
                self.request(Method::PUT, &format!("/products/{}", id))
                    .json(&ProductRequest::from(draft)),
            )
            .await?;
        saved_product(body)
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<String, ClientError> {
        let body: ProductMessageResponse = self
            .send(self.request(Method::DELETE, &format!("/products/{}", id)))
            .await?;
        Ok(body.message)
    }

    pub async fn update_stock(&self, updates: &[StockUpdate]) -> Result<String, ClientError> {
        let body: ProductMessageResponse = self
            .send(
                self.request(Method::PUT, "/products/bulk/stock")
                    .json(&StockUpdateRequest {
                        updates: Some(updates.to_vec()),
                    }),
            )
            .await?;
        Ok(body.message)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Auth
    // ════════════════════════════════════════════════════════════════════════════

    /// Logs in and stores the token in the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminProfile, ClientError> {
        let body: LoginResponse = self
            .send(self.request(Method::POST, "/auth/login").json(&LoginRequest {
                email: Some(email.to_string()),
                password: Some(password.to_string()),
            }))
            .await?;

        self.session.login(body.token);
        tracing::info!(user_id = %body.user.id, "Logged in");
        Ok(body.user)
    }

    pub async fn me(&self) -> Result<AdminProfile, ClientError> {
        let body: CurrentUserResponse = self.send(self.request(Method::GET, "/auth/me")).await?;
        Ok(body.user)
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<String, ClientError> {
        let body: AuthMessageResponse = self
            .send(
                self.request(Method::PUT, "/auth/change-password")
                    .json(&ChangePasswordRequest {
                        current_password: Some(current_password.to_string()),
                        new_password: Some(new_password.to_string()),
                    }),
            )
            .await?;
        Ok(body.message)
    }

    /// Drops the stored token. No request is made.
    pub fn logout(&self) {
        self.session.logout();
    }
}

fn saved_category(body: MessageResponse) -> Result<Category, ClientError> {
    body.category
        .ok_or_else(|| ClientError::Decode("response has no category".to_string()))
}

fn saved_product(body: ProductMessageResponse) -> Result<ProductBody, ClientError> {
    body.product
        .ok_or_else(|| ClientError::Decode("response has no product".to_string()))
}

#[async_trait]
impl CategoryCatalog for ApiClient {
    async fn list_tree(&self) -> Result<CategoryListing, DomainError> {
        Ok(self.list_categories().await?)
    }

    async fn list_top_level(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.list_top_level_categories().await?)
    }

    async fn create(&self, draft: &CategoryDraft) -> Result<Category, DomainError> {
        Ok(self.create_category(draft).await?)
    }

    async fn update(&self, id: CategoryId, draft: &CategoryDraft) -> Result<Category, DomainError> {
        Ok(self.update_category(id, draft).await?)
    }

    async fn delete(&self, id: CategoryId) -> Result<(), DomainError> {
        self.delete_category(id).await?;
        Ok(())
    }
}
