//! Visitor Registry Server Binary
//!
//! Serves the visitor form and JSON API.
//!
//! ## Usage
//!
//! ```bash
//! # Start server with settings from config.toml / VISITORS_* env vars
//! cargo run --bin visitor-server
//!
//! # Override the bind address
//! cargo run --bin visitor-server -- --host 0.0.0.0 --port 8080
//! ```

use visitor_registry::logging::init_tracing;
use visitor_registry::rest::{self, AppState};
use visitor_registry::{store, Config, VisitorService};

use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args: Vec<String> = env::args().collect();

    // Load configuration
    let mut config = match get_arg(&args, "--config") {
        Some(path) => Config::from_file(&path)?,
        None => Config::load().unwrap_or_else(|e| {
            eprintln!("Using default configuration ({e})");
            Config::default()
        }),
    };

    init_tracing(&config.logging);

    // Override HTTP config from command line
    if let Some(host) = get_arg(&args, "--host") {
        config.http.host = host;
    }
    if let Some(port) = get_arg(&args, "--port").and_then(|p| p.parse().ok()) {
        config.http.port = port;
    }

    let executor = store::connect(&config.database).await.map_err(|e| {
        tracing::error!(error = %e, "store_connect_failed");
        e
    })?;
    let service = VisitorService::new(executor);

    if config.database.create_table_on_start {
        if let Err(e) = service.create_table().await {
            tracing::error!(error = %e, "Error during table creation");
            return Err(e.into());
        }
    }
    tracing::info!(backend = ?config.database.backend, "store_ready");

    rest::start_http_server(Arc::new(AppState::new(service)), &config.http).await?;

    Ok(())
}

fn get_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1).cloned())
}
