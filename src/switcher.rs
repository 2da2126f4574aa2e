//! Language switching.
//!
//! `LocaleSwitcher` decides between the static resolver and the entity
//! switcher for a path. `SwitchControl` is what a language picker holds: it
//! allows one switch in flight at a time and ignores the rest.

use crate::error::ContentStoreError;
use crate::i18n::{Locale, SwitchMetrics};
use crate::routing::{
    detect_entity_path, resolve_entity_target, resolve_static_path, EntityKind,
    EntityLocalization, EntityPath, LocaleSwitch, Resolution, RouteTable,
};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Where entity localization records come from.
pub trait LocalizationSource: Send + Sync {
    /// Fetch the entity with `slug` in `locale`, with its localizations.
    fn fetch_localizations(
        &self,
        kind: EntityKind,
        slug: &str,
        locale: Locale,
    ) -> impl Future<Output = Result<Option<EntityLocalization>, ContentStoreError>> + Send;
}

fn record_resolution(metrics: &SwitchMetrics, resolution: Resolution) {
    match resolution {
        Resolution::Translated => metrics.record_static_translated(),
        Resolution::Fallback => metrics.record_static_fallback(),
        Resolution::Root => metrics.record_root_redirect(),
        Resolution::EntityTranslated => metrics.record_entity_translated(),
        Resolution::EntityDocumentId => metrics.record_entity_document_id(),
        Resolution::EntitySameSlug => metrics.record_entity_same_slug(),
    }
}

/// Switches entity detail pages using localization records.
pub struct EntityLocaleSwitcher<S> {
    table: Arc<RouteTable>,
    source: S,
    metrics: Arc<SwitchMetrics>,
}

impl<S: LocalizationSource> EntityLocaleSwitcher<S> {
    pub fn new(table: Arc<RouteTable>, source: S, metrics: Arc<SwitchMetrics>) -> Self {
        Self {
            table,
            source,
            metrics,
        }
    }

    /// Fetch the entity's localizations under `current` and resolve the
    /// target path. Lookup errors are logged and fall through to the
    /// same-slug path.
    pub async fn switch(&self, entity: &EntityPath, current: Locale, target: Locale) -> LocaleSwitch {
        let record = match self
            .source
            .fetch_localizations(entity.kind, &entity.slug, current)
            .await
        {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    "Localization lookup failed for {} '{}': {}",
                    entity.kind, entity.slug, e
                );
                self.metrics.record_lookup_failure();
                None
            }
        };

        let switch = resolve_entity_target(&self.table, entity, target, record.as_ref());
        record_resolution(&self.metrics, switch.resolution);
        switch
    }
}

/// Resolves language switches for any site path.
pub struct LocaleSwitcher<S> {
    table: Arc<RouteTable>,
    entities: EntityLocaleSwitcher<S>,
    metrics: Arc<SwitchMetrics>,
}

impl<S: LocalizationSource> LocaleSwitcher<S> {
    pub fn new(table: Arc<RouteTable>, source: S, metrics: Arc<SwitchMetrics>) -> Self {
        Self {
            entities: EntityLocaleSwitcher::new(table.clone(), source, metrics.clone()),
            table,
            metrics,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn metrics(&self) -> &Arc<SwitchMetrics> {
        &self.metrics
    }

    /// Path to show `path` in `target`, or `None` when `target` is already
    /// the current locale.
    pub async fn switch(&self, path: &str, current: Locale, target: Locale) -> Option<LocaleSwitch> {
        if current == target {
            return None;
        }

        if let Some(entity) = detect_entity_path(&self.table, path) {
            return Some(self.entities.switch(&entity, current, target).await);
        }

        let switch = resolve_static_path(&self.table, path, current, target);
        record_resolution(&self.metrics, switch.resolution);
        Some(switch)
    }
}

/// Result of asking a `SwitchControl` to switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlOutcome {
    Navigate(LocaleSwitch),

    /// Target locale is the current one
    Unchanged,

    /// Another switch from this control is still in flight
    Ignored,
}

/// Single-flight wrapper around a `LocaleSwitcher`.
pub struct SwitchControl<S> {
    switcher: Arc<LocaleSwitcher<S>>,
    slot: Arc<Semaphore>,
}

impl<S> Clone for SwitchControl<S> {
    fn clone(&self) -> Self {
        Self {
            switcher: self.switcher.clone(),
            slot: self.slot.clone(),
        }
    }
}

impl<S: LocalizationSource + 'static> SwitchControl<S> {
    pub fn new(switcher: Arc<LocaleSwitcher<S>>) -> Self {
        Self {
            switcher,
            slot: Arc::new(Semaphore::new(1)),
        }
    }

    /// Whether a switch is in flight.
    pub fn is_busy(&self) -> bool {
        self.slot.available_permits() == 0
    }

    /// Run a switch, or ignore it if one is already in flight.
    pub async fn switch(&self, path: &str, current: Locale, target: Locale) -> ControlOutcome {
        let Ok(_permit) = self.slot.clone().try_acquire_owned() else {
            debug!("Ignoring language switch for '{}': another is in flight", path);
            self.switcher.metrics().record_busy_ignored();
            return ControlOutcome::Ignored;
        };

        match self.switcher.switch(path, current, target).await {
            Some(switch) => ControlOutcome::Navigate(switch),
            None => ControlOutcome::Unchanged,
        }
    }

    /// Run a switch as a background task.
    ///
    /// Returns `None` if a switch is already in flight. Aborting the returned
    /// handle cancels the lookup and frees the slot.
    pub fn spawn_switch(
        &self,
        path: impl Into<String>,
        current: Locale,
        target: Locale,
    ) -> Option<JoinHandle<Option<LocaleSwitch>>> {
        let path = path.into();
        let Ok(permit) = self.slot.clone().try_acquire_owned() else {
            debug!("Ignoring language switch for '{}': another is in flight", path);
            self.switcher.metrics().record_busy_ignored();
            return None;
        };

        let switcher = self.switcher.clone();
        Some(tokio::spawn(async move {
            let _permit = permit;
            switcher.switch(&path, current, target).await
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// In-memory localization source
    #[derive(Default)]
    struct FakeSource {
        record: Option<EntityLocalization>,
        fail: bool,
        calls: Arc<AtomicUsize>,
        gate: Option<Arc<Notify>>,
    }

    impl LocalizationSource for FakeSource {
        async fn fetch_localizations(
            &self,
            _kind: EntityKind,
            _slug: &str,
            _locale: Locale,
        ) -> Result<Option<EntityLocalization>, ContentStoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fail {
                return Err(ContentStoreError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                });
            }
            Ok(self.record.clone())
        }
    }

    fn translated_record() -> EntityLocalization {
        serde_json::from_value(serde_json::json!({
            "documentId": "doc-1",
            "slug": "hola-mundo",
            "locale": "es",
            "localizations": [{"locale": "en", "slug": "hello-world"}]
        }))
        .expect("Record should decode")
    }

    fn table() -> Arc<RouteTable> {
        Arc::new(
            RouteTable::from_pairs([("company", [("es", "compania"), ("en", "company")])])
                .expect("Table should build"),
        )
    }

    fn switcher(source: FakeSource) -> LocaleSwitcher<FakeSource> {
        LocaleSwitcher::new(table(), source, Arc::new(SwitchMetrics::new()))
    }

    // ==================== Dispatch Tests ====================

    #[tokio::test]
    async fn test_same_locale_is_noop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let switcher = switcher(FakeSource {
            calls: calls.clone(),
            ..Default::default()
        });

        assert_eq!(
            switcher.switch("/es/blog/hola", Locale::SPANISH, Locale::SPANISH).await,
            None
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_static_path_uses_table() {
        let calls = Arc::new(AtomicUsize::new(0));
        let switcher = switcher(FakeSource {
            calls: calls.clone(),
            ..Default::default()
        });

        let switch = switcher
            .switch("/es/compania", Locale::SPANISH, Locale::ENGLISH)
            .await
            .expect("Should switch");

        assert_eq!(switch.path(), "/en/company");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(switcher.metrics().static_translated(), 1);
    }

    #[tokio::test]
    async fn test_entity_path_uses_source() {
        let calls = Arc::new(AtomicUsize::new(0));
        let switcher = switcher(FakeSource {
            record: Some(translated_record()),
            calls: calls.clone(),
            ..Default::default()
        });

        let switch = switcher
            .switch("/es/blog/hola-mundo", Locale::SPANISH, Locale::ENGLISH)
            .await
            .expect("Should switch");

        assert_eq!(switch.path(), "/en/blog/hello-world");
        assert!(switch.navigation.is_full_reload());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(switcher.metrics().entity_translated(), 1);
    }

    #[tokio::test]
    async fn test_root_and_fallback_metrics() {
        let switcher = switcher(FakeSource::default());

        switcher.switch("/es", Locale::SPANISH, Locale::ENGLISH).await;
        switcher.switch("/es/otra", Locale::SPANISH, Locale::ENGLISH).await;

        assert_eq!(switcher.metrics().root_redirects(), 1);
        assert_eq!(switcher.metrics().static_fallbacks(), 1);
    }

    // ==================== Entity Fallback Tests ====================

    #[tokio::test]
    async fn test_lookup_failure_falls_back_to_same_slug() {
        let switcher = switcher(FakeSource {
            fail: true,
            ..Default::default()
        });

        let switch = switcher
            .switch("/es/jobs/ingeniero-rust", Locale::SPANISH, Locale::ENGLISH)
            .await
            .expect("Should switch");

        assert_eq!(switch.path(), "/en/jobs/ingeniero-rust");
        assert_eq!(switch.resolution, Resolution::EntitySameSlug);
        assert_eq!(switcher.metrics().lookup_failures(), 1);
        assert_eq!(switcher.metrics().entity_same_slug(), 1);
    }

    #[tokio::test]
    async fn test_missing_entity_falls_back_to_same_slug() {
        let switcher = switcher(FakeSource::default());

        let switch = switcher
            .switch("/en/success-stories/bank", Locale::ENGLISH, Locale::SPANISH)
            .await
            .expect("Should switch");

        assert_eq!(switch.path(), "/es/success-stories/bank");
        assert_eq!(switch.resolution, Resolution::EntitySameSlug);
        assert_eq!(switcher.metrics().lookup_failures(), 0);
    }

    #[tokio::test]
    async fn test_entity_sections_follow_route_table() {
        let calls = Arc::new(AtomicUsize::new(0));
        let switcher = LocaleSwitcher::new(
            Arc::new(RouteTable::builtin()),
            FakeSource {
                calls: calls.clone(),
                ..Default::default()
            },
            Arc::new(SwitchMetrics::new()),
        );

        let switch = switcher
            .switch(
                "/es/trabaja-con-nosotros/ingeniero-rust",
                Locale::SPANISH,
                Locale::ENGLISH,
            )
            .await
            .expect("Should switch");
        assert_eq!(switch.path(), "/en/careers/ingeniero-rust");
        assert_eq!(switch.resolution, Resolution::EntitySameSlug);
        assert!(switch.navigation.is_full_reload());

        let switch = switcher
            .switch("/en/success-stories/bank", Locale::ENGLISH, Locale::SPANISH)
            .await
            .expect("Should switch");
        assert_eq!(switch.path(), "/es/casos-de-exito/bank");

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(switcher.metrics().entity_same_slug(), 2);
    }

    #[tokio::test]
    async fn test_listing_page_with_section_slug_is_static() {
        let calls = Arc::new(AtomicUsize::new(0));
        let switcher = LocaleSwitcher::new(
            Arc::new(RouteTable::builtin()),
            FakeSource {
                calls: calls.clone(),
                ..Default::default()
            },
            Arc::new(SwitchMetrics::new()),
        );

        let switch = switcher
            .switch("/es/trabaja-con-nosotros", Locale::SPANISH, Locale::ENGLISH)
            .await
            .expect("Should switch");
        assert_eq!(switch.path(), "/en/careers");
        assert_eq!(switch.resolution, Resolution::Translated);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    // ==================== SwitchControl Tests ====================

    #[tokio::test]
    async fn test_control_navigates_and_reports_unchanged() {
        let control = SwitchControl::new(Arc::new(switcher(FakeSource::default())));

        assert_eq!(
            control.switch("/es/compania", Locale::SPANISH, Locale::SPANISH).await,
            ControlOutcome::Unchanged
        );

        let ControlOutcome::Navigate(switch) =
            control.switch("/es/compania", Locale::SPANISH, Locale::ENGLISH).await
        else {
            panic!("Expected navigation");
        };
        assert_eq!(switch.path(), "/en/company");
        assert!(!control.is_busy());
    }

    #[tokio::test]
    async fn test_control_ignores_reentrant_switch() {
        let gate = Arc::new(Notify::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let inner = Arc::new(switcher(FakeSource {
            record: Some(translated_record()),
            calls: calls.clone(),
            gate: Some(gate.clone()),
            ..Default::default()
        }));
        let control = SwitchControl::new(inner.clone());

        let handle = control
            .spawn_switch("/es/blog/hola-mundo", Locale::SPANISH, Locale::ENGLISH)
            .expect("First switch should start");
        assert!(control.is_busy());

        assert_eq!(
            control.switch("/es/blog/hola-mundo", Locale::SPANISH, Locale::ENGLISH).await,
            ControlOutcome::Ignored
        );
        assert!(control
            .spawn_switch("/es/compania", Locale::SPANISH, Locale::ENGLISH)
            .is_none());
        assert_eq!(inner.metrics().busy_ignored(), 2);

        gate.notify_one();
        let switch = handle
            .await
            .expect("Task should complete")
            .expect("Should switch");

        assert_eq!(switch.path(), "/en/blog/hello-world");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!control.is_busy());
    }

    #[tokio::test]
    async fn test_aborting_switch_frees_slot() {
        let gate = Arc::new(Notify::new());
        let control = SwitchControl::new(Arc::new(switcher(FakeSource {
            gate: Some(gate),
            ..Default::default()
        })));

        let handle = control
            .spawn_switch("/es/blog/hola", Locale::SPANISH, Locale::ENGLISH)
            .expect("Switch should start");
        assert!(control.is_busy());

        handle.abort();
        let result = handle.await;
        assert!(result.unwrap_err().is_cancelled());
        assert!(!control.is_busy());

        assert!(matches!(
            control.switch("/es/compania", Locale::SPANISH, Locale::ENGLISH).await,
            ControlOutcome::Navigate(_)
        ));
    }
}
