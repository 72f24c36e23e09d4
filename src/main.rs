use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use thumbnail_bot::bot::{self, AppState};
use thumbnail_bot::config::{json_logs_requested, BotConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging before configuration so config errors are logged
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,thumbnail_bot=debug"));
    if json_logs_requested(&|name: &str| std::env::var(name).ok()) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid bot configuration");
            return Err(e).context("Invalid bot configuration");
        }
    };

    info!("Starting Thumbnail Telegram Bot");
    info!(
        model = %config.inference.model,
        timeout_secs = config.inference.timeout.as_secs(),
        staging_dir = %config.staging_dir.display(),
        "Configuration loaded"
    );
    if config.telegram.admin_id.is_some() {
        info!("ADMIN_ID is set; it does not restrict any command");
    }

    let state = Arc::new(AppState::from_config(&config)?);
    let bot = bot::build_bot(&config.telegram);

    bot::run(bot, state).await
}
