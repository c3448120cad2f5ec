use anyhow::Result;
use std::sync::Arc;

use kasir_summary::{logging, routes, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = Config::new()?;
    let addr = config.addr();
    tracing::info!("Starting with config: {:?}", config);

    let state = Arc::new(AppState::new(config));
    let app = routes::routes(state);

    tracing::info!("listening on {}", addr);
    tracing::info!("  GET  /                  - upload form");
    tracing::info!("  POST /summary           - summary table");
    tracing::info!("  POST /summary/csv       - summary_grouped.csv");
    tracing::info!("  POST /api/summary       - summary as JSON");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
