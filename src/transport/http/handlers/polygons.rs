use crate::domain::polygon::{Polygon, PolygonSummary, ValidationError};
use crate::transport::http::handlers::common::{ApiError, Operation};
use crate::transport::http::types::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value as JsonValue;

#[utoipa::path(
    post,
    path = "/api/polygons",
    request_body = crate::transport::http::types::CreatePolygonRequest,
    responses(
        (status = 201, description = "Polygon created", body = Polygon),
        (status = 400, description = "Invalid name, points or body", body = crate::transport::http::types::ErrorResponse),
        (status = 409, description = "Name already taken", body = crate::transport::http::types::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ErrorResponse)
    )
)]
pub async fn create_polygon_handler(
    State(state): State<AppState>,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> Result<(StatusCode, Json<Polygon>), ApiError> {
    let Json(body) = request.map_err(|e| {
        tracing::debug!(error = %e, "unreadable create body");
        ApiError::new(Operation::Create, ValidationError::MalformedBody)
    })?;

    let polygon = state
        .service
        .create(&body)
        .await
        .map_err(|e| ApiError::new(Operation::Create, e))?;
    Ok((StatusCode::CREATED, Json(polygon)))
}

#[utoipa::path(
    get,
    path = "/api/polygons",
    responses(
        (status = 200, description = "All polygons, newest first", body = Vec<PolygonSummary>),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ErrorResponse)
    )
)]
pub async fn list_polygons_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<PolygonSummary>>, ApiError> {
    let polygons = state
        .service
        .list()
        .await
        .map_err(|e| ApiError::new(Operation::List, e))?;
    Ok(Json(polygons))
}

#[utoipa::path(
    delete,
    path = "/api/polygons/{id}",
    params(
        ("id" = String, Path, description = "24-character hex polygon id")
    ),
    responses(
        (status = 204, description = "Polygon deleted"),
        (status = 400, description = "Malformed id", body = crate::transport::http::types::ErrorResponse),
        (status = 404, description = "No polygon with this id", body = crate::transport::http::types::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ErrorResponse)
    )
)]
pub async fn delete_polygon_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .delete(&id)
        .await
        .map_err(|e| ApiError::new(Operation::Delete, e))?;
    Ok(StatusCode::NO_CONTENT)
}
