use crate::domain::polygon::{Point, Polygon, PolygonSummary};
use crate::transport::http::handlers::{health, polygons};
use crate::transport::http::types::{AppState, CreatePolygonRequest, ErrorResponse, HealthResponse};
use axum::routing::{delete, get};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        polygons::create_polygon_handler,
        polygons::list_polygons_handler,
        polygons::delete_polygon_handler
    ),
    components(schemas(
        Point,
        Polygon,
        PolygonSummary,
        CreatePolygonRequest,
        ErrorResponse,
        HealthResponse
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/polygons",
            get(polygons::list_polygons_handler).post(polygons::create_polygon_handler),
        )
        .route("/api/polygons/:id", delete(polygons::delete_polygon_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_documents_polygon_routes_and_error_body() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];
        assert!(schemas.get("ErrorResponse").is_some());
        assert!(schemas.get("CreatePolygonRequest").is_some());

        let polygons = &doc["paths"]["/api/polygons"];
        assert!(polygons.get("get").is_some());
        assert!(polygons["post"].get("requestBody").is_some());
        assert!(doc["paths"]["/api/polygons/{id}"].get("delete").is_some());
    }
}
