pub mod app;
pub mod client;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::polygon_service::{PolygonService, ServiceError};
pub use domain::polygon::{Point, Polygon, PolygonId, PolygonSummary, ValidationError};
pub use storage::{MemoryPolygonStore, PolygonStore, PostgresPolygonStore, StoreError};
