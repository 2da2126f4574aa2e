//! Entity detail pages: detection and target path resolution.
//!
//! Blog posts, job postings and case studies live at
//! `/{locale}/{section}/{slug}`, where `section` is the route table's slug
//! for the kind's listing route in that locale. Entity slugs are authored
//! per locale in the content store, so the route table cannot translate
//! them; the switcher fetches the entity's localization records and picks a
//! target path from them with three fallback tiers.

use super::navigation::{LocaleSwitch, Navigation, Resolution};
use super::table::RouteTable;
use crate::i18n::Locale;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Kinds of content entity that have their own detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    BlogPost,
    JobPosting,
    CaseStudy,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::BlogPost,
        EntityKind::JobPosting,
        EntityKind::CaseStudy,
    ];

    /// Route identifier of the listing page this kind's pages live under.
    pub fn route(&self) -> &'static str {
        match self {
            EntityKind::BlogPost => "blog",
            EntityKind::JobPosting => "jobs",
            EntityKind::CaseStudy => "success-stories",
        }
    }

    /// Content store collection holding this kind.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::BlogPost => "articles",
            EntityKind::JobPosting => "job-offers",
            EntityKind::CaseStudy => "success-stories",
        }
    }

    pub fn from_route(route: &str) -> Option<EntityKind> {
        Self::ALL.into_iter().find(|kind| kind.route() == route)
    }

    /// Section segment for this kind in `locale`. Tables without the kind's
    /// route use the route identifier itself.
    pub fn section<'a>(&self, table: &'a RouteTable, locale: Locale) -> &'a str {
        table.slug(self.route(), locale).unwrap_or(self.route())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

/// A path recognised as an entity detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityPath {
    pub locale: Locale,
    pub kind: EntityKind,
    pub slug: String,
}

fn entity_path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^/(?P<locale>[a-z]{2})/(?P<section>[^/]+)/(?P<slug>[^/]+)/?$")
            .expect("Entity path regex should compile")
    })
}

/// Kind whose section segment in `locale` is `section`.
fn kind_for_section(table: &RouteTable, locale: Locale, section: &str) -> Option<EntityKind> {
    match table.route_for_slug(locale, section) {
        Some(route) => EntityKind::from_route(route),
        None => EntityKind::from_route(section)
            .filter(|kind| table.slug(kind.route(), locale).is_none()),
    }
}

/// Recognise an entity detail path: an enabled locale, the section segment
/// of an entity kind in that locale and exactly one slug segment. Query and
/// fragment are ignored.
pub fn detect_entity_path(table: &RouteTable, path: &str) -> Option<EntityPath> {
    let path = path
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or_default();
    let caps = entity_path_regex().captures(path)?;

    let locale = Locale::from_code(&caps["locale"]).ok()?;
    let kind = kind_for_section(table, locale, &caps["section"])?;

    Some(EntityPath {
        locale,
        kind,
        slug: caps["slug"].to_string(),
    })
}

/// One locale's slug for an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedSlug {
    pub locale: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// An entity record with its localization records, as returned by the
/// content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityLocalization {
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub localizations: Vec<LocalizedSlug>,
}

impl EntityLocalization {
    /// Non-empty slug recorded for `locale`.
    pub fn slug_for(&self, locale: Locale) -> Option<&str> {
        self.localizations
            .iter()
            .find(|localization| localization.locale == locale.code())
            .and_then(|localization| localization.slug.as_deref())
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
    }

    /// Stable document identifier, when present and non-empty.
    pub fn document_id(&self) -> Option<&str> {
        self.document_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Pick the target path for an entity page, stopping at the first tier that
/// yields a path:
///
/// 1. the entity's slug in `target`
/// 2. the entity's document id
/// 3. the current slug, unchanged
///
/// `record` is `None` when the lookup failed or found nothing. Entity
/// switches are always full reloads.
pub fn resolve_entity_target(
    table: &RouteTable,
    entity: &EntityPath,
    target: Locale,
    record: Option<&EntityLocalization>,
) -> LocaleSwitch {
    let (segment, resolution) = match record {
        Some(record) => match (record.slug_for(target), record.document_id()) {
            (Some(slug), _) => (slug, Resolution::EntityTranslated),
            (None, Some(id)) => (id, Resolution::EntityDocumentId),
            (None, None) => (entity.slug.as_str(), Resolution::EntitySameSlug),
        },
        None => (entity.slug.as_str(), Resolution::EntitySameSlug),
    };

    let path = format!(
        "/{}/{}/{}",
        target.code(),
        entity.kind.section(table, target),
        segment
    );
    LocaleSwitch::new(Navigation::full_reload(path), resolution)
}
