use anyhow::{Context, Result};
use content_locale::config::Config;
use content_locale::i18n::Locale;
use content_locale::routing::RouteTable;
use content_locale::server;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("content_locale=info".parse()?),
        )
        .init();

    info!("Starting content-locale server");

    // Load configuration from environment
    let config = Config::from_env()?;
    if config.is_production() {
        info!("Environment: production");
    } else {
        info!("Environment: {} (non-production)", config.environment);
    }

    let locales: Vec<String> = Locale::enabled()
        .iter()
        .map(|locale| format!("{} ({}, {})", locale.native_name(), locale.name(), locale))
        .collect();
    info!(
        "Serving locales: {} (default {})",
        locales.join(", "),
        Locale::default_locale()
    );

    let table = match &config.routes_file {
        Some(path) => RouteTable::from_file(path)
            .with_context(|| format!("Failed to load route table from {}", path))?,
        None => RouteTable::builtin(),
    };
    info!("Loaded route table with {} routes", table.len());

    server::serve(&config, table).await
}
