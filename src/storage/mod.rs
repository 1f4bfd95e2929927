pub mod polygon;

pub use polygon::{MemoryPolygonStore, PolygonStore, PostgresPolygonStore, StoreError};
