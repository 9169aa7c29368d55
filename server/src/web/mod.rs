use axum::Router;
use axum::routing::get;
use migration::MigratorTrait;
use sea_orm::Database;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config;
use crate::todo::TodoState;

pub mod api;

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: config::Config) -> anyhow::Result<()> {
    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let db = Database::connect(&config.db_url).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let todo_state = TodoState { db: Arc::new(db) };
    let app = create_app_router(todo_state);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Creates the full application router: greeting, todos API, GraphQL stub.
pub fn create_app_router(todo_state: TodoState) -> Router {
    Router::new()
        .route("/", get(greeting_handler))
        .merge(api::create_api_router(todo_state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new()),
        )
}

#[tracing::instrument]
pub async fn greeting_handler() -> &'static str {
    "Hello Hono!"
}
