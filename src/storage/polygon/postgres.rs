//! Polygon store backed by PostgreSQL.
//!
//! One row per polygon; the ordered vertex list is kept as a JSONB array of
//! `{x, y}` objects. Name uniqueness is enforced by a UNIQUE constraint, so
//! racing creates resolve to exactly one row and one `Conflict`.

use super::{PolygonStore, StoreError};
use crate::domain::polygon::{Point, Polygon, PolygonId};
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use serde_json::Value as JsonValue;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

const SELECT_COLUMNS: &str = "SELECT id, name, points, created_at, updated_at FROM polygons";

#[derive(Clone)]
pub struct PostgresPolygonStore {
    pool: PgPool,
}

impl PostgresPolygonStore {
    /// Connects to `database_url` and makes sure the `polygons` table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::new_with_pool(pool).await
    }

    pub async fn new_with_pool(pool: PgPool) -> Result<Self, StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS polygons (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                points JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS polygons_created_at_idx ON polygons (created_at DESC)",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Removes every stored polygon. Used by tests and by preflight's `--reset`.
    pub async fn clear(&self) -> Result<u64, StoreError> {
        let done = sqlx::query("DELETE FROM polygons")
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected())
    }
}

fn row_to_polygon(row: &PgRow) -> Result<Polygon, StoreError> {
    let id: String = row.try_get("id")?;
    let points: JsonValue = row.try_get("points")?;
    let points: Vec<Point> = serde_json::from_value(points)?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;

    let id = PolygonId::parse(&id).map_err(|e| {
        StoreError::Database(sqlx::Error::Decode(
            format!("stored id '{}' is malformed: {}", id, e).into(),
        ))
    })?;

    Ok(Polygon {
        id,
        name: row.try_get("name")?,
        points,
        created_at,
        updated_at,
    })
}

#[async_trait]
impl PolygonStore for PostgresPolygonStore {
    async fn create(&self, name: &str, points: &[Point]) -> Result<Polygon, StoreError> {
        // No pre-check here: callers already looked the name up, and the
        // UNIQUE constraint turns any race into a Conflict below.

        // TIMESTAMPTZ keeps microseconds; truncate so the returned value matches what is stored.
        let now = Utc::now().trunc_subsecs(6);
        let polygon = Polygon {
            id: PolygonId::generate(),
            name: name.to_string(),
            points: points.to_vec(),
            created_at: now,
            updated_at: now,
        };

        let result = sqlx::query(
            "INSERT INTO polygons (id, name, points, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(polygon.id.as_str())
        .bind(&polygon.name)
        .bind(serde_json::to_value(&polygon.points)?)
        .bind(polygon.created_at)
        .bind(polygon.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(polygon),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::Conflict {
                    name: name.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<Polygon>, StoreError> {
        let sql = format!("{} ORDER BY created_at DESC, id DESC", SELECT_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_polygon).collect()
    }

    async fn find_by_id(&self, id: &PolygonId) -> Result<Option<Polygon>, StoreError> {
        let sql = format!("{} WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_polygon).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Polygon>, StoreError> {
        let sql = format!("{} WHERE name = $1", SELECT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_polygon).transpose()
    }

    async fn delete_by_id(&self, id: &PolygonId) -> Result<(), StoreError> {
        let done = sqlx::query("DELETE FROM polygons WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(StoreError::NotFound { id: id.clone() });
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
