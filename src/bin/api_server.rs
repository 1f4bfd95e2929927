// src/bin/api_server.rs

use polygon_canvas::infra::config::{self, StoreBackend};
use polygon_canvas::infra::logging;
use polygon_canvas::transport;
use polygon_canvas::{MemoryPolygonStore, PolygonService, PolygonStore, PostgresPolygonStore};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging()?;

    // --- Store Initialization ---
    let store: Arc<dyn PolygonStore> = match config::store_backend()? {
        StoreBackend::Postgres => {
            let database_url = config::database_url()?;
            let max_connections = config::db_max_connections()?;
            tracing::info!(max_connections, "connecting to Postgres polygon store");
            Arc::new(PostgresPolygonStore::connect(&database_url, max_connections).await?)
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory polygon store; data is lost on exit");
            Arc::new(MemoryPolygonStore::new())
        }
    };

    // --- Service Initialization ---
    let delay = config::response_delay()?;
    if !delay.is_zero() {
        tracing::info!(delay_ms = delay.as_millis() as u64, "artificial response delay enabled");
    }
    let service = PolygonService::new(store).with_response_delay(delay);
    let app_state = transport::http::AppState::new(service);

    // --- API Server Initialization ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let addr = config::bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on http://{}", listener.local_addr()?);
    tracing::info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown signal received");
            }
        })
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}
