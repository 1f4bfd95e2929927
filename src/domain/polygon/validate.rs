//! Name and geometry rules applied before any persistence attempt.
//!
//! The typed checks (`validate_name`, `validate_points`) are shared with the
//! canvas client. The `*_value` variants work on raw request JSON and also
//! report shape problems (missing fields, wrong types). Every check stops at
//! the first failing rule.

use super::{Point, CANVAS_HEIGHT, CANVAS_WIDTH, MAX_NAME_LEN, MAX_POINTS, MIN_POINTS};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// A rejected input. The display text is what API callers see in `error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Polygon name is required and must be a string")]
    NameMissing,

    #[error("Polygon name cannot be empty")]
    NameEmpty,

    #[error("Polygon name cannot exceed {} characters", MAX_NAME_LEN)]
    NameTooLong,

    #[error("Polygon name can only contain letters, numbers, spaces, hyphens, and underscores")]
    NameCharset,

    #[error("Points must be an array")]
    PointsNotArray,

    #[error("Polygon must have at least {} points", MIN_POINTS)]
    TooFewPoints,

    #[error("Polygon cannot have more than {} points", MAX_POINTS)]
    TooManyPoints,

    /// `index` is 1-based.
    #[error("Point {index} must be an object")]
    PointNotObject { index: usize },

    #[error("Point {index} must have numeric x and y coordinates")]
    PointNotNumeric { index: usize },

    #[error("Point {index} coordinates must be finite numbers")]
    PointNotFinite { index: usize },

    #[error("Point {index} coordinates must be within canvas bounds (0-800, 0-600)")]
    PointOutOfBounds { index: usize },

    #[error("Polygon ID is required")]
    MissingId,

    #[error("Invalid polygon ID format")]
    InvalidId,

    #[error("Request body must be a JSON object")]
    MalformedBody,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || c == '-' || c == '_'
}

/// Checks a candidate name. Rules apply to the trimmed value.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::NameEmpty);
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong);
    }
    if !trimmed.chars().all(is_name_char) {
        return Err(ValidationError::NameCharset);
    }
    Ok(())
}

/// Checks an ordered point sequence against count and canvas bounds.
pub fn validate_points(points: &[Point]) -> Result<(), ValidationError> {
    check_count(points.len())?;
    points
        .iter()
        .enumerate()
        .try_for_each(|(i, p)| check_point(i + 1, p))
}

/// Validates the raw `name` field of a request and returns its trimmed form.
pub fn validate_name_value(name: Option<&JsonValue>) -> Result<String, ValidationError> {
    let name = match name.and_then(JsonValue::as_str) {
        Some(s) if !s.is_empty() => s,
        _ => return Err(ValidationError::NameMissing),
    };
    validate_name(name)?;
    Ok(name.trim().to_string())
}

/// Validates the raw `points` field of a request and decodes it.
///
/// Points are checked one at a time, each fully (shape, then numbers, then
/// bounds), so the reported index is always the first bad point.
pub fn validate_points_value(points: Option<&JsonValue>) -> Result<Vec<Point>, ValidationError> {
    let items = points
        .and_then(JsonValue::as_array)
        .ok_or(ValidationError::PointsNotArray)?;
    check_count(items.len())?;

    let mut decoded = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let index = i + 1;
        let obj = item
            .as_object()
            .ok_or(ValidationError::PointNotObject { index })?;
        let (x, y) = match (
            obj.get("x").and_then(JsonValue::as_f64),
            obj.get("y").and_then(JsonValue::as_f64),
        ) {
            (Some(x), Some(y)) => (x, y),
            _ => return Err(ValidationError::PointNotNumeric { index }),
        };
        let point = Point::new(x, y);
        check_point(index, &point)?;
        decoded.push(point);
    }
    Ok(decoded)
}

fn check_count(len: usize) -> Result<(), ValidationError> {
    if len < MIN_POINTS {
        return Err(ValidationError::TooFewPoints);
    }
    if len > MAX_POINTS {
        return Err(ValidationError::TooManyPoints);
    }
    Ok(())
}

fn check_point(index: usize, p: &Point) -> Result<(), ValidationError> {
    if !p.x.is_finite() || !p.y.is_finite() {
        return Err(ValidationError::PointNotFinite { index });
    }
    if p.x < 0.0 || p.y < 0.0 || p.x > CANVAS_WIDTH || p.y > CANVAS_HEIGHT {
        return Err(ValidationError::PointOutOfBounds { index });
    }
    Ok(())
}
