//! Centralized configuration (environment variables + defaults).
//!
//! Binaries call `dotenv::dotenv()` first, so a local `.env` file is honored.

use anyhow::Context;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Which `PolygonStore` implementation the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// Database URL must be provided (no default) when running on Postgres.
pub fn database_url() -> anyhow::Result<String> {
    std::env::var("DATABASE_URL").context("DATABASE_URL must be set")
}

/// `STORE_BACKEND`: `postgres` (default) or `memory`.
pub fn store_backend() -> anyhow::Result<StoreBackend> {
    match std::env::var("STORE_BACKEND") {
        Err(_) => Ok(StoreBackend::Postgres),
        Ok(v) => match v.trim().to_lowercase().as_str() {
            "" | "postgres" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => anyhow::bail!("STORE_BACKEND must be 'postgres' or 'memory', got '{}'", other),
        },
    }
}

/// Listen address for the API server.
pub fn bind_addr() -> anyhow::Result<SocketAddr> {
    let raw = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    raw.parse::<SocketAddr>()
        .with_context(|| format!("BIND_ADDR must be a socket address, got '{}'", raw))
}

/// Pool size for the Postgres store.
pub fn db_max_connections() -> anyhow::Result<u32> {
    parse_or("DB_MAX_CONNECTIONS", 5).map(|n: u32| n.max(1))
}

/// Artificial latency added before each persistence call. Defaults to none.
pub fn response_delay() -> anyhow::Result<Duration> {
    parse_or("RESPONSE_DELAY_MS", 0).map(Duration::from_millis)
}

/// Where the canvas client finds the API.
pub fn api_base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("{} must be a valid number, got '{}'", key, v)),
    }
}
