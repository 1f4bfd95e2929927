use polygon_canvas::infra::config::{self, StoreBackend};
use polygon_canvas::{PolygonStore, PostgresPolygonStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--reset]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           STORE_BACKEND, BIND_ADDR, DB_MAX_CONNECTIONS, RESPONSE_DELAY_MS\n\
         \n\
         --reset deletes every stored polygon.\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let reset = args.iter().any(|a| a == "--reset");

    // Force-read config (nice error messages if something is off)
    let backend = config::store_backend()?;
    let addr = config::bind_addr()?;
    let delay = config::response_delay()?;
    let max_connections = config::db_max_connections()?;

    println!("> Preflight:");
    println!("  STORE_BACKEND={:?}", backend);
    println!("  BIND_ADDR={}", addr);
    println!("  RESPONSE_DELAY_MS={}", delay.as_millis());

    if backend == StoreBackend::Memory {
        println!("  In-memory store selected; nothing to check.");
        println!("> Preflight OK.");
        return Ok(());
    }

    let database_url = config::database_url()?;
    println!("  DB_MAX_CONNECTIONS={}", max_connections);

    // Connecting also creates the polygons table if missing.
    let store = PostgresPolygonStore::connect(&database_url, max_connections)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to Postgres: {}", e))?;
    store.ping().await?;
    println!("  Postgres reachable, polygons table present.");

    let count = store.list().await?.len();
    println!("  Stored polygons: {}", count);

    if reset {
        let removed = store.clear().await?;
        println!("  Reset: removed {} polygons.", removed);
    }

    println!("> Preflight OK.");
    Ok(())
}
