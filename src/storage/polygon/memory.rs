//! In-process polygon store.
//!
//! The uniqueness check and the insert happen under one write lock, so two
//! concurrent creates with the same name cannot both succeed.

use super::{PolygonStore, StoreError};
use crate::domain::polygon::{Point, Polygon, PolygonId};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

/// Polygons kept in insertion order (oldest first).
#[derive(Default)]
pub struct MemoryPolygonStore {
    polygons: RwLock<Vec<Polygon>>,
}

impl MemoryPolygonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.polygons.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.polygons.read().await.is_empty()
    }
}

#[async_trait]
impl PolygonStore for MemoryPolygonStore {
    async fn create(&self, name: &str, points: &[Point]) -> Result<Polygon, StoreError> {
        let mut polygons = self.polygons.write().await;
        if polygons.iter().any(|p| p.name == name) {
            return Err(StoreError::Conflict {
                name: name.to_string(),
            });
        }
        let now = Utc::now();
        let polygon = Polygon {
            id: PolygonId::generate(),
            name: name.to_string(),
            points: points.to_vec(),
            created_at: now,
            updated_at: now,
        };
        polygons.push(polygon.clone());
        Ok(polygon)
    }

    async fn list(&self) -> Result<Vec<Polygon>, StoreError> {
        let polygons = self.polygons.read().await;
        // Insertion order already follows creation time; reverse is a stable newest-first.
        Ok(polygons.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: &PolygonId) -> Result<Option<Polygon>, StoreError> {
        let polygons = self.polygons.read().await;
        Ok(polygons.iter().find(|p| &p.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Polygon>, StoreError> {
        let polygons = self.polygons.read().await;
        Ok(polygons.iter().find(|p| p.name == name).cloned())
    }

    async fn delete_by_id(&self, id: &PolygonId) -> Result<(), StoreError> {
        let mut polygons = self.polygons.write().await;
        match polygons.iter().position(|p| &p.id == id) {
            Some(idx) => {
                polygons.remove(idx);
                Ok(())
            }
            None => Err(StoreError::NotFound { id: id.clone() }),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
