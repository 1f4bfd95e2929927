use crate::app::polygon_service::ServiceError;
use crate::transport::http::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub const VALIDATION_MESSAGE: &str = "Validation error";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// The operation a request was performing; picks the 500 message.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    Create,
    List,
    Delete,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "Error creating polygon",
            Operation::List => "Error fetching polygons",
            Operation::Delete => "Error deleting polygon",
        }
    }
}

/// A service failure bound to the operation that produced it.
pub struct ApiError {
    pub op: Operation,
    pub source: ServiceError,
}

impl ApiError {
    pub fn new(op: Operation, source: impl Into<ServiceError>) -> Self {
        Self {
            op,
            source: source.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.source {
            ServiceError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(VALIDATION_MESSAGE, e.to_string()),
            ),
            ServiceError::Conflict => (
                StatusCode::CONFLICT,
                ErrorResponse::new(VALIDATION_MESSAGE, self.source.to_string()),
            ),
            ServiceError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(VALIDATION_MESSAGE, self.source.to_string()),
            ),
            ServiceError::Internal(cause) => {
                tracing::error!(op = ?self.op, error = %cause, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(self.op.failure_message(), INTERNAL_ERROR),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::polygon::ValidationError;
    use crate::storage::StoreError;

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        let cases = [
            (
                ServiceError::Validation(ValidationError::TooFewPoints),
                StatusCode::BAD_REQUEST,
            ),
            (ServiceError::Conflict, StatusCode::CONFLICT),
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (
                ServiceError::Internal(StoreError::Database(sqlx::Error::PoolTimedOut)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let resp = ApiError::new(Operation::Create, err).into_response();
            assert_eq!(resp.status(), expected);
        }
    }
}
