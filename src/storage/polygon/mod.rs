//! Persistence abstraction for polygons.

use crate::domain::polygon::{Point, Polygon, PolygonId};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryPolygonStore;
pub use postgres::PostgresPolygonStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("polygon named '{name}' already exists")]
    Conflict { name: String },

    #[error("polygon {id} not found")]
    NotFound { id: PolygonId },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored points could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Storage contract used by the polygon service.
///
/// Implementations own every stored `Polygon`. Names are unique; the name
/// passed to `create` is expected to be trimmed and validated already.
#[async_trait]
pub trait PolygonStore: Send + Sync {
    /// Assigns an id and creation time and persists the polygon.
    /// Fails with `Conflict` if the name is taken.
    async fn create(&self, name: &str, points: &[Point]) -> Result<Polygon, StoreError>;

    /// All polygons, newest first.
    async fn list(&self) -> Result<Vec<Polygon>, StoreError>;

    async fn find_by_id(&self, id: &PolygonId) -> Result<Option<Polygon>, StoreError>;

    /// Exact, case-sensitive match.
    async fn find_by_name(&self, name: &str) -> Result<Option<Polygon>, StoreError>;

    /// Fails with `NotFound` if nothing was deleted.
    async fn delete_by_id(&self, id: &PolygonId) -> Result<(), StoreError>;

    /// Cheap reachability probe for health checks.
    async fn ping(&self) -> Result<(), StoreError>;
}
