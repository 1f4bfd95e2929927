//! The polygon service.
//!
//! Sits between the HTTP handlers and the store. It is responsible for:
//! 1.  Running the validator on raw request input before anything touches storage.
//! 2.  The uniqueness and existence checks that give callers friendly 409/404 errors.
//! 3.  Translating store failures into the service error taxonomy.

use crate::domain::polygon::{
    validate_name_value, validate_points_value, Polygon, PolygonId, PolygonSummary,
    ValidationError,
};
use crate::storage::{PolygonStore, StoreError};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A polygon with this name already exists")]
    Conflict,

    #[error("Polygon not found")]
    NotFound,

    /// Detail is for server logs only.
    #[error("internal error: {0}")]
    Internal(#[source] StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict { .. } => ServiceError::Conflict,
            StoreError::NotFound { .. } => ServiceError::NotFound,
            other => ServiceError::Internal(other),
        }
    }
}

pub struct PolygonService {
    store: Arc<dyn PolygonStore>,
    /// Artificial latency before each persistence call (0 in production).
    response_delay: Duration,
}

impl PolygonService {
    pub fn new(store: Arc<dyn PolygonStore>) -> Self {
        Self {
            store,
            response_delay: Duration::ZERO,
        }
    }

    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = delay;
        self
    }

    async fn simulate_latency(&self) {
        if !self.response_delay.is_zero() {
            tokio::time::sleep(self.response_delay).await;
        }
    }

    /// Validates a raw `{name, points}` body and persists it.
    ///
    /// The name check is a fast path; the store still enforces uniqueness on insert.
    pub async fn create(&self, body: &JsonValue) -> Result<Polygon, ServiceError> {
        let body = body.as_object().ok_or(ValidationError::MalformedBody)?;
        let name = validate_name_value(body.get("name"))?;
        let points = validate_points_value(body.get("points"))?;

        if self.store.find_by_name(&name).await?.is_some() {
            tracing::debug!(%name, "rejecting duplicate polygon name");
            return Err(ServiceError::Conflict);
        }

        self.simulate_latency().await;
        let polygon = self.store.create(&name, &points).await?;
        tracing::info!(id = %polygon.id, name = %polygon.name, points = polygon.points.len(), "polygon created");
        Ok(polygon)
    }

    /// All polygons, newest first.
    pub async fn list(&self) -> Result<Vec<PolygonSummary>, ServiceError> {
        self.simulate_latency().await;
        let polygons = self.store.list().await?;
        Ok(polygons.into_iter().map(PolygonSummary::from).collect())
    }

    pub async fn delete(&self, raw_id: &str) -> Result<(), ServiceError> {
        let id = PolygonId::parse(raw_id)?;

        if self.store.find_by_id(&id).await?.is_none() {
            return Err(ServiceError::NotFound);
        }

        self.simulate_latency().await;
        self.store.delete_by_id(&id).await?;
        tracing::info!(%id, "polygon deleted");
        Ok(())
    }

    pub async fn health(&self) -> Result<(), ServiceError> {
        self.store.ping().await.map_err(ServiceError::Internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPolygonStore;
    use serde_json::json;

    fn service() -> PolygonService {
        PolygonService::new(Arc::new(MemoryPolygonStore::new()))
    }

    fn body(name: &str) -> JsonValue {
        json!({
            "name": name,
            "points": [{"x": 0, "y": 0}, {"x": 100, "y": 0}, {"x": 100, "y": 100}, {"x": 0, "y": 100}]
        })
    }

    #[tokio::test]
    async fn create_trims_name() {
        let svc = service();
        let p = svc.create(&body("  Test Polygon ")).await.unwrap();
        assert_eq!(p.name, "Test Polygon");
        assert_eq!(p.points.len(), 4);
    }

    #[tokio::test]
    async fn duplicate_trimmed_name_conflicts() {
        let svc = service();
        svc.create(&body("Dup")).await.unwrap();
        let err = svc.create(&body(" Dup ")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict));
    }

    #[tokio::test]
    async fn name_is_validated_before_points() {
        let svc = service();
        let err = svc
            .create(&json!({"name": "bad!", "points": []}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::NameCharset)
        ));
    }

    #[tokio::test]
    async fn non_object_body_is_rejected() {
        let svc = service();
        let err = svc.create(&json!([1, 2, 3])).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::MalformedBody)
        ));
    }

    #[tokio::test]
    async fn delete_checks_id_format_then_existence() {
        let svc = service();
        assert!(matches!(
            svc.delete("nope").await,
            Err(ServiceError::Validation(ValidationError::InvalidId))
        ));
        assert!(matches!(
            svc.delete("65f1c0de8a1b2c3d4e5f6a7b").await,
            Err(ServiceError::NotFound)
        ));

        let p = svc.create(&body("Keep")).await.unwrap();
        svc.delete(p.id.as_str()).await.unwrap();
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn response_delay_is_applied() {
        let svc = service().with_response_delay(Duration::from_millis(50));
        let started = std::time::Instant::now();
        svc.list().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
