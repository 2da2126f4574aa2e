//! Locale support for the site.
//!
//! - `registry`: single source of truth for supported locales
//! - `locale`: validated `Locale` type built from the registry
//! - `metrics`: counters for language-switch outcomes

mod locale;
mod metrics;
mod registry;

pub use locale::Locale;
pub use metrics::{MetricsReport, SwitchMetrics};
pub use registry::{LocaleConfig, LocaleRegistry};
