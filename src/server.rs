//! HTTP surface.
//!
//! - `GET /health`: liveness
//! - `GET /metrics`: language-switch counters
//! - `POST /api/render?format=json|html`: render a document body
//! - `GET /api/locale-switch?path=&to=[&from=][&redirect=true]`: resolve a
//!   language switch, optionally as a `303 See Other` redirect; `from`
//!   defaults to the site's default locale

use crate::config::Config;
use crate::content_store::ContentStoreClient;
use crate::document::{to_html, Document, MediaResolver, RenderedBlock, Renderer};
use crate::error::LocaleError;
use crate::i18n::{Locale, SwitchMetrics};
use crate::routing::{NavigationKind, Resolution, RouteTable};
use crate::switcher::LocaleSwitcher;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    InvalidLocale(#[from] LocaleError),

    #[error("Not found")]
    NotFound,
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) | ServerError::InvalidLocale(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::InvalidLocale(_) => "INVALID_LOCALE",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        }));

        (self.status_code(), body).into_response()
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::BadRequest(format!("JSON parse error: {err}"))
    }
}

/// Shared application state
pub struct AppState {
    pub environment: String,
    pub renderer: Renderer,
    pub switcher: LocaleSwitcher<ContentStoreClient>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: &Config, table: RouteTable) -> Self {
        let metrics = Arc::new(SwitchMetrics::new());
        Self {
            environment: config.environment.clone(),
            renderer: Renderer::new(MediaResolver::new(config.media_base_url.clone())),
            switcher: LocaleSwitcher::new(
                Arc::new(table),
                ContentStoreClient::from_config(config),
                metrics,
            ),
            started_at: Utc::now(),
        }
    }
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let now = Utc::now();
    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.environment,
        "timestamp": now.to_rfc3339(),
        "uptime_seconds": (now - state.started_at).num_seconds().max(0),
    }))
}

async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.switcher.metrics().report())
}

#[derive(Debug, Deserialize)]
pub struct RenderParams {
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
struct RenderResponse {
    blocks: Vec<RenderedBlock>,
}

async fn render(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RenderParams>,
    body: Bytes,
) -> ServerResult<Response> {
    let format = params.format.as_deref().unwrap_or("json");
    if format != "json" && format != "html" {
        return Err(ServerError::BadRequest(format!(
            "Unsupported format '{format}', expected 'json' or 'html'"
        )));
    }

    let value: serde_json::Value = serde_json::from_slice(&body)?;
    let blocks = state.renderer.render(&Document::from_value(value));

    if format == "html" {
        Ok(Html(to_html(&blocks)).into_response())
    } else {
        Ok(Json(RenderResponse { blocks }).into_response())
    }
}

#[derive(Debug, Deserialize)]
pub struct SwitchParams {
    pub path: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(default)]
    pub redirect: bool,
}

#[derive(Debug, Serialize)]
struct SwitchResponse {
    changed: bool,
    path: String,
    kind: Option<NavigationKind>,
    resolution: Option<Resolution>,
}

fn required(value: Option<String>, name: &str) -> ServerResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest(format!("Missing query parameter '{name}'")))
}

/// A path on this site: one leading `/`, no backslashes, no control
/// characters. Anything else could redirect off-site.
fn site_path(value: Option<String>) -> ServerResult<String> {
    let path = required(value, "path")?;

    let is_site_path = path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control);

    if !is_site_path {
        return Err(ServerError::BadRequest(
            "Query parameter 'path' must be a site path starting with a single '/'".to_string(),
        ));
    }
    Ok(path)
}

fn see_other(path: &str) -> ServerResult<Response> {
    let location = HeaderValue::from_bytes(path.as_bytes())
        .map_err(|_| ServerError::BadRequest(format!("Cannot redirect to '{path}'")))?;
    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response())
}

async fn locale_switch(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SwitchParams>,
) -> ServerResult<Response> {
    let path = site_path(params.path)?;
    let from = match params.from {
        Some(code) if !code.trim().is_empty() => Locale::from_code(&code)?,
        _ => Locale::default_locale(),
    };
    let to = Locale::from_code(&required(params.to, "to")?)?;

    let response = match state.switcher.switch(&path, from, to).await {
        Some(switch) => SwitchResponse {
            changed: true,
            path: switch.navigation.path,
            kind: Some(switch.navigation.kind),
            resolution: Some(switch.resolution),
        },
        None => SwitchResponse {
            changed: false,
            path,
            kind: None,
            resolution: None,
        },
    };

    if params.redirect {
        see_other(&response.path)
    } else {
        Ok(Json(response).into_response())
    }
}

async fn not_found() -> ServerError {
    ServerError::NotFound
}

/// Build the router with all routes and the trace layer
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api/render", post(render))
        .route("/api/locale-switch", get(locale_switch))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and run until SIGTERM or Ctrl+C.
pub async fn serve(config: &Config, table: RouteTable) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config, table));
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {} ({})", addr, config.environment);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
