//! Product registry service.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │               PRODUCT SERVICE                │
//!                      │                                              │
//!    Client Request    │  ┌─────────┐    ┌──────────┐    ┌──────────┐ │
//!    ──────────────────┼─▶│  http   │───▶│ handlers │───▶│ registry │ │
//!                      │  │ server  │    │          │    │ (mutex)  │ │
//!                      │  └─────────┘    └────┬─────┘    └────┬─────┘ │
//!    Client Response   │  ┌─────────┐         │               │       │
//!    ◀─────────────────┼──│response │◀────────┴───────────────┘       │
//!                      │  │ mapping │                                 │
//!                      │  └─────────┘                                 │
//!                      │  ┌────────────────────────────────────────┐  │
//!                      │  │  config · observability · lifecycle    │  │
//!                      │  └────────────────────────────────────────┘  │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use product_service::config::load_or_default;
use product_service::lifecycle::startup;
use product_service::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "product-service")]
#[command(about = "In-memory product registry over HTTP", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_or_default(args.config.as_deref())?;

    init_logging(&config.observability);

    tracing::info!("product-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        seed = config.registry.seed,
        id_strategy = ?config.registry.id_strategy,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
