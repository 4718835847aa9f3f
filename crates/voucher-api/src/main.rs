//! Voucher API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p voucher-api
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use tracing::{error, info};
use voucher_common::{try_init_tracing_with_config, AppConfig, TracingConfig};

#[tokio::main]
async fn main() {
    // Tracing format depends on APP_ENV, so configuration loads first
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.api.port,
        backend = ?config.storage.backend,
        "Starting Voucher API Server"
    );

    if let Err(e) = voucher_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
