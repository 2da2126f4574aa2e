//! Static page path translation between locales.

use super::navigation::{LocaleSwitch, Navigation, Resolution};
use super::table::RouteTable;
use crate::i18n::Locale;
use tracing::warn;

/// Split a path into its path part and its `?query#fragment` suffix.
fn split_suffix(path: &str) -> (&str, &str) {
    match path.find(|c: char| c == '?' || c == '#') {
        Some(idx) => path.split_at(idx),
        None => (path, ""),
    }
}

/// Path segments after the locale prefix. Paths without the prefix keep all
/// their segments.
fn segments_after_prefix<'a>(path: &'a str, locale: Locale) -> Vec<&'a str> {
    let trimmed = path.trim_start_matches('/');
    let rest = match trimmed.strip_prefix(locale.code()) {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest,
        _ => trimmed,
    };
    rest.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Translate a static page path from `current` to `target`.
///
/// The first segment after the locale prefix is looked up in the table and
/// replaced by the target locale's slug; remaining segments and any query or
/// fragment are kept. A bare locale root always becomes a full reload to the
/// target root. Slugs the table does not know keep their value and only the
/// prefix changes.
pub fn resolve_static_path(
    table: &RouteTable,
    current_path: &str,
    current: Locale,
    target: Locale,
) -> LocaleSwitch {
    let (path, suffix) = split_suffix(current_path);
    let segments = segments_after_prefix(path, current);

    let Some((slug, rest)) = segments.split_first() else {
        return LocaleSwitch::new(Navigation::full_reload(target.root_path()), Resolution::Root);
    };

    let translated = table
        .route_for_slug(current, slug)
        .and_then(|route| table.slug(route, target));

    let (first, resolution) = match translated {
        Some(translated) => (translated, Resolution::Translated),
        None => {
            warn!(
                "No route translation for slug '{}' ({} -> {}), keeping slug",
                slug, current, target
            );
            (*slug, Resolution::Fallback)
        }
    };

    let mut new_path = format!("{}/{}", target.root_path(), first);
    for segment in rest {
        new_path.push('/');
        new_path.push_str(segment);
    }
    new_path.push_str(suffix);

    LocaleSwitch::new(Navigation::client(new_path), resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::NavigationKind;
    use proptest::prelude::*;

    fn table() -> RouteTable {
        RouteTable::from_pairs([
            ("company", [("es", "compania"), ("en", "company")]),
            ("jobs", [("es", "trabaja-con-nosotros"), ("en", "careers")]),
        ])
        .expect("Table should build")
    }

    // ==================== Translation Tests ====================

    #[test]
    fn test_translates_registered_slug() {
        let switch = resolve_static_path(&table(), "/es/compania", Locale::SPANISH, Locale::ENGLISH);
        assert_eq!(switch.path(), "/en/company");
        assert_eq!(switch.resolution, Resolution::Translated);
        assert_eq!(switch.navigation.kind, NavigationKind::Client);
    }

    #[test]
    fn test_translates_back() {
        let switch = resolve_static_path(&table(), "/en/careers", Locale::ENGLISH, Locale::SPANISH);
        assert_eq!(switch.path(), "/es/trabaja-con-nosotros");
    }

    #[test]
    fn test_keeps_remaining_segments() {
        let switch = resolve_static_path(
            &table(),
            "/es/compania/equipo/madrid",
            Locale::SPANISH,
            Locale::ENGLISH,
        );
        assert_eq!(switch.path(), "/en/company/equipo/madrid");
    }

    #[test]
    fn test_keeps_query_and_fragment() {
        let switch = resolve_static_path(
            &table(),
            "/es/compania?ref=nav#team",
            Locale::SPANISH,
            Locale::ENGLISH,
        );
        assert_eq!(switch.path(), "/en/company?ref=nav#team");
    }

    #[test]
    fn test_trailing_slash_ignored() {
        let switch = resolve_static_path(&table(), "/es/compania/", Locale::SPANISH, Locale::ENGLISH);
        assert_eq!(switch.path(), "/en/company");
    }

    // ==================== Fallback Tests ====================

    #[test]
    fn test_unknown_slug_keeps_slug() {
        let switch = resolve_static_path(&table(), "/es/desconocido/x", Locale::SPANISH, Locale::ENGLISH);
        assert_eq!(switch.path(), "/en/desconocido/x");
        assert_eq!(switch.resolution, Resolution::Fallback);
        assert!(!switch.navigation.is_full_reload());
    }

    #[test]
    fn test_slug_from_other_locale_not_translated() {
        let switch = resolve_static_path(&table(), "/es/company", Locale::SPANISH, Locale::ENGLISH);
        assert_eq!(switch.resolution, Resolution::Fallback);
        assert_eq!(switch.path(), "/en/company");
    }

    #[test]
    fn test_path_without_prefix() {
        let switch = resolve_static_path(&table(), "/compania", Locale::SPANISH, Locale::ENGLISH);
        assert_eq!(switch.path(), "/en/company");
    }

    #[test]
    fn test_prefix_must_be_whole_segment() {
        // "/estudio" starts with "es" but has no locale prefix
        let switch = resolve_static_path(&table(), "/estudio", Locale::SPANISH, Locale::ENGLISH);
        assert_eq!(switch.path(), "/en/estudio");
    }

    // ==================== Root Tests ====================

    #[test]
    fn test_root_forces_full_reload() {
        for path in ["/es", "/es/", "/", "", "/es?utm=1"] {
            let switch = resolve_static_path(&table(), path, Locale::SPANISH, Locale::ENGLISH);
            assert_eq!(switch.path(), "/en", "path {:?}", path);
            assert_eq!(switch.resolution, Resolution::Root);
            assert!(switch.navigation.is_full_reload());
        }
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_round_trip_restores_slug(
            route_idx in 0usize..9,
            rest in proptest::collection::vec("[a-z0-9-]{1,8}", 0..3),
        ) {
            let table = RouteTable::builtin();
            let routes: Vec<&str> = table.routes().collect();
            let route = routes[route_idx % routes.len()];

            for (from, to) in [(Locale::SPANISH, Locale::ENGLISH), (Locale::ENGLISH, Locale::SPANISH)] {
                let mut original = table.localized_path(route, from).expect("Route has slug");
                for segment in &rest {
                    original.push('/');
                    original.push_str(segment);
                }

                let there = resolve_static_path(&table, &original, from, to);
                prop_assert_eq!(there.resolution, Resolution::Translated);
                let back = resolve_static_path(&table, there.path(), to, from);
                prop_assert_eq!(back.path(), original.as_str());
            }
        }
    }
}
