//! Domain types for polygons drawn on the canvas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

pub mod id;
pub mod validate;

pub use id::PolygonId;
pub use validate::{
    validate_name, validate_name_value, validate_points, validate_points_value, ValidationError,
};

/// Logical canvas width. All x coordinates live in `[0, CANVAS_WIDTH]`.
pub const CANVAS_WIDTH: f64 = 800.0;
/// Logical canvas height. All y coordinates live in `[0, CANVAS_HEIGHT]`.
pub const CANVAS_HEIGHT: f64 = 600.0;
pub const MIN_POINTS: usize = 3;
pub const MAX_POINTS: usize = 100;
pub const MAX_NAME_LEN: usize = 100;

/// A single vertex of a polygon, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Point {
    #[serde(serialize_with = "serialize_coordinate")]
    pub x: f64,
    #[serde(serialize_with = "serialize_coordinate")]
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// Whole-number coordinates go out as JSON integers so `{"x":100}` comes back as `{"x":100}`.
fn serialize_coordinate<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53
    if value.is_finite() && value.fract() == 0.0 && value.abs() < EXACT_INT_LIMIT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// A stored polygon. Immutable once persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Polygon {
    #[schema(value_type = String, example = "65f1c0de8a1b2c3d4e5f6a7b")]
    pub id: PolygonId,
    pub name: String,
    pub points: Vec<Point>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing, default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// List item shape returned by `GET /api/polygons`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PolygonSummary {
    #[schema(value_type = String)]
    pub id: PolygonId,
    pub name: String,
    pub points: Vec<Point>,
}

impl From<Polygon> for PolygonSummary {
    fn from(p: Polygon) -> Self {
        Self {
            id: p.id,
            name: p.name,
            points: p.points,
        }
    }
}
