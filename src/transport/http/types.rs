use crate::app::polygon_service::PolygonService;
use crate::domain::polygon::Point;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PolygonService>,
}

impl AppState {
    pub fn new(service: PolygonService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Body of `POST /api/polygons`.
///
/// Documentation only: the handler validates the raw JSON so that shape
/// errors get the same `{message, error}` treatment as rule violations.
#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct CreatePolygonRequest {
    /// 1-100 characters from `[A-Za-z0-9 _-]`, unique after trimming.
    #[schema(example = "Test Polygon")]
    pub name: String,
    /// 3-100 points inside the 800x600 canvas, in drawing order.
    pub points: Vec<Point>,
}

/// Body of every non-2xx response.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Validation error")]
    pub message: String,
    #[schema(example = "Polygon must have at least 3 points")]
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: error.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}
