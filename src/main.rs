use anyhow::Result;
use log::info;

use examly::config::Config;
use examly::webhook::{build_router, AppContext};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    info!("Starting Examly Telegram Bot");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Read configuration once; missing credentials surface as failed calls
    let config = Config::from_env();

    info!(
        "Configured endpoints: telegram={}, gpt={}, vision={}, storage={}",
        config.telegram_api_base, config.completion_url, config.ocr_url, config.storage_base
    );
    if config.storage_access_key.is_empty() || config.storage_secret_key.is_empty() {
        info!("Object-storage static key pair not set; storage uses the IAM key");
    }

    let bind_addr = config.bind_addr.clone();
    let ctx = AppContext::new(config);
    let router = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Webhook server listening on {bind_addr}");

    axum::serve(listener, router).await?;

    Ok(())
}
