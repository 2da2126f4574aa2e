use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Deployment
    pub environment: String,

    // Content store
    pub content_store_url: String,
    pub content_store_token: Option<String>,

    // Media
    pub media_base_url: String,

    // Routing
    pub routes_file: Option<String>,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let content_store_url = std::env::var("CONTENT_STORE_URL")
            .context("CONTENT_STORE_URL not set")?
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            // Content store - token only needed for non-public collections
            content_store_token: optional_var("CONTENT_STORE_TOKEN"),

            // Media - relative uploads are served by the content store by default
            media_base_url: optional_var("MEDIA_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| content_store_url.clone()),

            content_store_url,

            // Routing - built-in table when unset
            routes_file: optional_var("ROUTES_FILE"),

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Read a variable, treating empty values as unset.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
