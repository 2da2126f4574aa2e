//! Rich content rendering and localized routing for a multi-locale site.
//!
//! The library is split into:
//! - `document`: turns content store document bodies into typed units and HTML
//! - `routing`: route translation table, static and entity path resolution
//! - `switcher`: language switching with a single in-flight lookup per control
//! - `content_store`: HTTP client for entity localization records
//! - `i18n`: locale registry and switch metrics
//! - `server`: axum HTTP surface used by the binary

pub mod config;
pub mod content_store;
pub mod document;
pub mod error;
pub mod i18n;
pub mod routing;
pub mod server;
pub mod switcher;
