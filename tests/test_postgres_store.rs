//! Postgres-backed store tests. Skipped unless DATABASE_URL is set.
//!
//! Run:
//!   DATABASE_URL=postgres://... cargo test --test test_postgres_store

use polygon_canvas::{Point, PolygonStore, PostgresPolygonStore, StoreError};
use std::sync::Arc;

async fn connect() -> Result<Option<PostgresPolygonStore>, Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        println!("DATABASE_URL not set; skipping Postgres store test");
        return Ok(None);
    };
    let store = PostgresPolygonStore::connect(&database_url, 5).await?;
    store.clear().await?;
    Ok(Some(store))
}

fn square() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(0.0, 100.0),
    ]
}

// Both scenarios share one table, so they run sequentially inside a single test.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_postgres_store() -> Result<(), Box<dyn std::error::Error>> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    round_trip(&store).await?;
    unique_name_under_race(Arc::new(store)).await?;
    Ok(())
}

async fn round_trip(store: &PostgresPolygonStore) -> Result<(), Box<dyn std::error::Error>> {
    let created = store.create("pg square", &square()).await?;
    let found = store.find_by_id(&created.id).await?.ok_or("not found")?;
    assert_eq!(found, created);
    assert_eq!(found.points, square());

    // The store itself has no pre-check; the UNIQUE constraint reports the duplicate.
    assert!(matches!(
        store.create("pg square", &square()).await,
        Err(StoreError::Conflict { ref name }) if name == "pg square"
    ));

    let second = store.create("pg second", &square()).await?;
    let listed = store.list().await?;
    let ids: Vec<_> = listed.iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids, vec![second.id.clone(), created.id.clone()]);

    store.delete_by_id(&created.id).await?;
    assert!(store.find_by_id(&created.id).await?.is_none());
    assert!(matches!(
        store.delete_by_id(&created.id).await,
        Err(StoreError::NotFound { .. })
    ));

    store.clear().await?;
    Ok(())
}

async fn unique_name_under_race(
    store: Arc<PostgresPolygonStore>,
) -> Result<(), Box<dyn std::error::Error>> {

    // Both may pass the pre-check; the UNIQUE constraint decides.
    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.create("contested", &square()).await })
        })
        .collect();

    let mut ok = 0;
    let mut conflicts = 0;
    for t in tasks {
        match t.await? {
            Ok(_) => ok += 1,
            Err(StoreError::Conflict { .. }) => conflicts += 1,
            Err(e) => return Err(e.into()),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(conflicts, 7);

    store.clear().await?;
    Ok(())
}
