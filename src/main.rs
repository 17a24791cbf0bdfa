//! Catalog Admin API server.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use catalog_admin::adapters::http::{api_router, AuthAppState, CategoryAppState, ProductAppState};
use catalog_admin::adapters::{
    InMemoryAdminUserRepository, InMemoryCatalogStore, JwtConfig, JwtTokenService,
    PostgresAdminUserRepository, PostgresCategoryReader, PostgresCategoryRepository,
    PostgresProductReader, PostgresProductRepository,
};
use catalog_admin::application::{SeedAdminCommand, SeedAdminHandler, SeedOutcome};
use catalog_admin::config::{AppConfig, ServerConfig, StoreBackend};
use catalog_admin::ports::{
    AdminUserRepository, CategoryReader, CategoryRepository, ProductReader, ProductRepository,
};

struct Stores {
    reader: Arc<dyn CategoryReader>,
    repository: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductReader>,
    product_repository: Arc<dyn ProductRepository>,
    users: Arc<dyn AdminUserRepository>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        backend = ?config.database.backend,
        "Starting catalog admin"
    );

    let stores = connect_stores(&config).await?;

    if let Some((email, password)) = config.auth.seed_admin() {
        let outcome = SeedAdminHandler::new(stores.users.clone())
            .handle(SeedAdminCommand {
                username: config.auth.seed_admin_username.clone(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        if let SeedOutcome::Created(id) = outcome {
            tracing::info!(user_id = %id, "Created seed admin");
        }
    }

    let tokens = Arc::new(JwtTokenService::new(JwtConfig::new(
        config.auth.jwt_secret.expose_secret().clone(),
        config.auth.jwt_issuer.clone(),
        config.auth.token_ttl_hours,
    )));

    let router = api_router(
        CategoryAppState {
            reader: stores.reader,
            repository: stores.repository.clone(),
        },
        ProductAppState {
            reader: stores.products,
            repository: stores.product_repository,
            categories: stores.repository,
        },
        AuthAppState {
            users: stores.users,
            issuer: tokens.clone(),
        },
        tokens,
    );
    let app = with_layers(router, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, compact text elsewhere. `RUST_LOG` overrides
/// the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true)
                    .with_span_list(false),
            )
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

async fn connect_stores(config: &AppConfig) -> Result<Stores, Box<dyn std::error::Error>> {
    match config.database.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            let store = Arc::new(InMemoryCatalogStore::new());
            Ok(Stores {
                reader: store.clone(),
                repository: store.clone(),
                products: store.clone(),
                product_repository: store,
                users: Arc::new(InMemoryAdminUserRepository::new()),
            })
        }
        StoreBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .min_connections(config.database.min_connections)
                .max_connections(config.database.max_connections)
                .acquire_timeout(config.database.acquire_timeout())
                .connect(&config.database.url)
                .await?;

            if config.database.run_migrations {
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Migrations applied");
            }

            Ok(Stores {
                reader: Arc::new(PostgresCategoryReader::new(pool.clone())),
                repository: Arc::new(PostgresCategoryRepository::new(pool.clone())),
                products: Arc::new(PostgresProductReader::new(pool.clone())),
                product_repository: Arc::new(PostgresProductRepository::new(pool.clone())),
                users: Arc::new(PostgresAdminUserRepository::new(pool)),
            })
        }
    }
}

fn with_layers(router: Router, server: &ServerConfig) -> Router {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    let cors = if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TimeoutLayer::new(Duration::from_secs(
                server.request_timeout_secs,
            )))
            .layer(cors)
            .layer(CompressionLayer::new()),
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
