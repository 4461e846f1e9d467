//! binwatch HTTP server.

use anyhow::Result;
use binwatch_server::{ServerConfig, logging, serve};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    logging::init_logging();
    info!("starting binwatch server v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::from_env();
    info!(
        host = %config.host,
        port = config.port,
        public_dir = %config.public_dir.display(),
        gemini_model = %config.gemini_model,
        "configuration loaded"
    );

    serve(config).await
}
