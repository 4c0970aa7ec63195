//! backoffice - admin record-store HTTP service.
//!
//! Configuration via environment variables with sensible defaults:
//!
//! ```text
//! ADMIN_ADDR      Listen address    (default: "0.0.0.0:3000")
//! ADMIN_DATA_DIR  Data directory    (default: ".")
//! ```
//!
//! Durable stores (`products.csv`, `coupons.csv`, `users.csv`) are created
//! header-only in the data directory on first run.

use std::sync::Arc;

use anyhow::Result;
use backoffice::{http, AppState, FileStore};

/// Reads a configuration value from the environment, falling back to `default`.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let addr = env_or("ADMIN_ADDR", "0.0.0.0:3000");
    let data_dir = env_or("ADMIN_DATA_DIR", ".");

    let store = FileStore::new(&data_dir);
    let state = Arc::new(AppState::load(&store)?);

    tracing::info!(addr = %addr, data_dir = %data_dir, "record store loaded, serving");
    http::serve(state, &addr).await?;
    Ok(())
}
