//! Language-switch metrics.
//!
//! Counts which path each language switch ended up taking, so a spike in
//! fallback tiers (untranslated slugs, content store outages) is visible
//! from the `/metrics` endpoint.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for static and entity language switches.
///
/// One instance is shared (behind an `Arc`) by everything that performs
/// switches for a given surface.
#[derive(Debug, Default)]
pub struct SwitchMetrics {
    static_translated: AtomicUsize,
    static_fallbacks: AtomicUsize,
    root_redirects: AtomicUsize,
    entity_translated: AtomicUsize,
    entity_document_id: AtomicUsize,
    entity_same_slug: AtomicUsize,
    lookup_failures: AtomicUsize,
    busy_ignored: AtomicUsize,
}

impl SwitchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Static path translated through the route table.
    pub fn record_static_translated(&self) {
        self.static_translated.fetch_add(1, Ordering::Relaxed);
    }

    /// Static slug unknown to the route table; locale prefix swapped only.
    pub fn record_static_fallback(&self) {
        self.static_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Root path switched to the bare locale root.
    pub fn record_root_redirect(&self) {
        self.root_redirects.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_entity_translated(&self) {
        self.entity_translated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_entity_document_id(&self) {
        self.entity_document_id.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_entity_same_slug(&self) {
        self.entity_same_slug.fetch_add(1, Ordering::Relaxed);
    }

    /// Content store lookup failed (transport, status or decode error).
    pub fn record_lookup_failure(&self) {
        self.lookup_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Switch ignored because another lookup was still in flight.
    pub fn record_busy_ignored(&self) {
        self.busy_ignored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn static_translated(&self) -> usize {
        self.static_translated.load(Ordering::Relaxed)
    }

    pub fn static_fallbacks(&self) -> usize {
        self.static_fallbacks.load(Ordering::Relaxed)
    }

    pub fn root_redirects(&self) -> usize {
        self.root_redirects.load(Ordering::Relaxed)
    }

    pub fn entity_translated(&self) -> usize {
        self.entity_translated.load(Ordering::Relaxed)
    }

    pub fn entity_document_id(&self) -> usize {
        self.entity_document_id.load(Ordering::Relaxed)
    }

    pub fn entity_same_slug(&self) -> usize {
        self.entity_same_slug.load(Ordering::Relaxed)
    }

    pub fn lookup_failures(&self) -> usize {
        self.lookup_failures.load(Ordering::Relaxed)
    }

    pub fn busy_ignored(&self) -> usize {
        self.busy_ignored.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let entity_translated = self.entity_translated();
        let entity_document_id = self.entity_document_id();
        let entity_same_slug = self.entity_same_slug();
        let entity_total = entity_translated + entity_document_id + entity_same_slug;
        let entity_translated_rate = if entity_total > 0 {
            (entity_translated as f64 / entity_total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            static_translated: self.static_translated(),
            static_fallbacks: self.static_fallbacks(),
            root_redirects: self.root_redirects(),
            entity_translated,
            entity_document_id,
            entity_same_slug,
            entity_translated_rate,
            lookup_failures: self.lookup_failures(),
            busy_ignored: self.busy_ignored(),
        }
    }
}

/// Snapshot of the switch counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub static_translated: usize,
    pub static_fallbacks: usize,
    pub root_redirects: usize,
    pub entity_translated: usize,
    pub entity_document_id: usize,
    pub entity_same_slug: usize,

    /// Share of entity switches that found a translated slug, as a percentage (0-100)
    pub entity_translated_rate: f64,

    pub lookup_failures: usize,
    pub busy_ignored: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_static_counters() {
        let metrics = SwitchMetrics::new();

        metrics.record_static_translated();
        metrics.record_static_translated();
        metrics.record_static_fallback();
        metrics.record_root_redirect();

        assert_eq!(metrics.static_translated(), 2);
        assert_eq!(metrics.static_fallbacks(), 1);
        assert_eq!(metrics.root_redirects(), 1);
    }

    #[test]
    fn test_entity_counters() {
        let metrics = SwitchMetrics::new();

        metrics.record_entity_translated();
        metrics.record_entity_document_id();
        metrics.record_entity_same_slug();
        metrics.record_lookup_failure();
        metrics.record_busy_ignored();

        assert_eq!(metrics.entity_translated(), 1);
        assert_eq!(metrics.entity_document_id(), 1);
        assert_eq!(metrics.entity_same_slug(), 1);
        assert_eq!(metrics.lookup_failures(), 1);
        assert_eq!(metrics.busy_ignored(), 1);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = SwitchMetrics::new().report();

        assert_eq!(report.static_translated, 0);
        assert_eq!(report.entity_translated, 0);
        assert_eq!(report.entity_translated_rate, 0.0);
    }

    #[test]
    fn test_report_translated_rate() {
        let metrics = SwitchMetrics::new();

        // 3 translated, 1 same-slug = 75%
        metrics.record_entity_translated();
        metrics.record_entity_translated();
        metrics.record_entity_translated();
        metrics.record_entity_same_slug();

        let report = metrics.report();
        assert_eq!(report.entity_translated_rate, 75.0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = SwitchMetrics::new();
        metrics.record_static_fallback();

        let json = serde_json::to_value(metrics.report()).expect("Should serialize");
        assert_eq!(json["static_fallbacks"], 1);
        assert_eq!(json["busy_ignored"], 0);
    }
}
