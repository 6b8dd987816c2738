//! Q&A vote API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p qa-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use qa_common::{try_init_tracing_with_config, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Configuration is read first so the log format can follow APP_ENV
    let config = AppConfig::from_env();

    let tracing_config = match config.as_ref().map(|c| c.app.env) {
        Ok(Environment::Production) => TracingConfig::production(),
        Ok(Environment::Development) => TracingConfig::development(),
        _ => TracingConfig::default(),
    };
    if let Err(e) = try_init_tracing_with_config(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        storage = ?config.storage.backend,
        "Starting Q&A vote API server"
    );

    if let Err(e) = qa_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
