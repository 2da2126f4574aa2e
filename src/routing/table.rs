//! Route translation table.
//!
//! Maps canonical route identifiers (e.g. `company`) to their slug in every
//! enabled locale, plus the reverse mapping from slug back to identifier.
//! A table is validated once when built and is read-only afterwards; share
//! it behind an `Arc`.

use crate::error::{LocaleError, RouteTableError};
use crate::i18n::Locale;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::debug;

/// Table shipped with the site, used when no routes file is configured.
const BUILTIN_ROUTES: &str = r#"{
    "company": { "es": "compania", "en": "company" },
    "services": { "es": "servicios", "en": "services" },
    "jobs": { "es": "trabaja-con-nosotros", "en": "careers" },
    "blog": { "es": "blog", "en": "blog" },
    "success-stories": { "es": "casos-de-exito", "en": "success-stories" },
    "contact": { "es": "contacto", "en": "contact" },
    "privacy": { "es": "politica-de-privacidad", "en": "privacy-policy" },
    "legal": { "es": "aviso-legal", "en": "legal-notice" },
    "cookies": { "es": "politica-de-cookies", "en": "cookie-policy" }
}"#;

/// Validated route translation table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    /// Route identifier -> locale -> slug
    routes: BTreeMap<String, BTreeMap<Locale, String>>,

    /// Locale -> slug -> route identifier
    reverse: HashMap<Locale, HashMap<String, String>>,
}

impl RouteTable {
    /// Build a table from its wire shape (route -> locale code -> slug).
    ///
    /// Every route needs a non-empty, single-segment slug for every enabled
    /// locale, and no two routes may share a slug within a locale. Entries
    /// for disabled (draft) locales are ignored.
    pub fn new(
        entries: BTreeMap<String, BTreeMap<String, String>>,
    ) -> Result<Self, RouteTableError> {
        let enabled = Locale::enabled();
        let mut routes = BTreeMap::new();
        let mut reverse: HashMap<Locale, HashMap<String, String>> = HashMap::new();

        for (route, slugs) in entries {
            let mut localized = BTreeMap::new();

            for (code, slug) in slugs {
                let locale = match Locale::from_code(&code) {
                    Ok(locale) => locale,
                    Err(LocaleError::Disabled(_)) => {
                        debug!("Ignoring slug for disabled locale '{}' on route '{}'", code, route);
                        continue;
                    }
                    Err(source) => {
                        return Err(RouteTableError::Locale {
                            route: route.clone(),
                            source,
                        })
                    }
                };

                let slug = slug.trim().to_string();
                if slug.is_empty() {
                    return Err(RouteTableError::EmptySlug {
                        route: route.clone(),
                        locale: code,
                    });
                }
                if slug.contains('/') {
                    return Err(RouteTableError::InvalidSlug {
                        route: route.clone(),
                        slug,
                    });
                }

                let by_slug = reverse.entry(locale).or_default();
                if let Some(first) = by_slug.get(&slug) {
                    return Err(RouteTableError::DuplicateSlug {
                        locale: code,
                        slug,
                        first: first.clone(),
                        second: route.clone(),
                    });
                }
                by_slug.insert(slug.clone(), route.clone());
                localized.insert(locale, slug);
            }

            if let Some(missing) = enabled.iter().find(|locale| !localized.contains_key(*locale)) {
                return Err(RouteTableError::MissingSlug {
                    route,
                    locale: missing.code().to_string(),
                });
            }

            routes.insert(route, localized);
        }

        Ok(Self { routes, reverse })
    }

    /// Build a table from `(route, [(locale, slug)])` pairs.
    pub fn from_pairs<'a, R, L>(routes: R) -> Result<Self, RouteTableError>
    where
        R: IntoIterator<Item = (&'a str, L)>,
        L: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let entries = routes
            .into_iter()
            .map(|(route, slugs)| {
                let slugs = slugs
                    .into_iter()
                    .map(|(locale, slug)| (locale.to_string(), slug.to_string()))
                    .collect();
                (route.to_string(), slugs)
            })
            .collect();
        Self::new(entries)
    }

    /// Parse a table from JSON.
    pub fn from_json(json: &str) -> Result<Self, RouteTableError> {
        let entries: BTreeMap<String, BTreeMap<String, String>> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Load a table from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RouteTableError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The site's built-in table.
    ///
    /// # Panics
    /// Panics if the built-in table is invalid, which the tests rule out.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_ROUTES).expect("Built-in route table should be valid")
    }

    /// Slug of `route` in `locale`.
    pub fn slug(&self, route: &str, locale: Locale) -> Option<&str> {
        self.routes
            .get(route)
            .and_then(|slugs| slugs.get(&locale))
            .map(String::as_str)
    }

    /// Route identifier whose slug in `locale` is `slug`.
    pub fn route_for_slug(&self, locale: Locale, slug: &str) -> Option<&str> {
        self.reverse
            .get(&locale)
            .and_then(|by_slug| by_slug.get(slug))
            .map(String::as_str)
    }

    /// Localized path of a route, e.g. `/es/compania`.
    pub fn localized_path(&self, route: &str, locale: Locale) -> Option<String> {
        self.slug(route, locale)
            .map(|slug| format!("/{}/{}", locale.code(), slug))
    }

    /// Registered route identifiers, sorted.
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
