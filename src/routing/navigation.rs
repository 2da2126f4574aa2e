//! Language switch outcomes.

use serde::Serialize;

/// How the browser should move to the new path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKind {
    /// Soft client-side transition
    Client,

    /// Full page load, so server-rendered data matches the new locale
    FullReload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub path: String,
    pub kind: NavigationKind,
}

impl Navigation {
    pub fn client(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: NavigationKind::Client,
        }
    }

    pub fn full_reload(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: NavigationKind::FullReload,
        }
    }

    pub fn is_full_reload(&self) -> bool {
        self.kind == NavigationKind::FullReload
    }
}

/// Which rule produced the new path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Static slug translated through the route table
    Translated,

    /// Static slug unknown to the table; only the locale prefix changed
    Fallback,

    /// Home page; bare locale root
    Root,

    /// Entity found with a slug in the target locale
    EntityTranslated,

    /// Entity found without a target slug; addressed by document id
    EntityDocumentId,

    /// Entity lookup failed or found nothing; current slug reused
    EntitySameSlug,
}

/// A resolved language switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleSwitch {
    #[serde(flatten)]
    pub navigation: Navigation,
    pub resolution: Resolution,
}

impl LocaleSwitch {
    pub fn new(navigation: Navigation, resolution: Resolution) -> Self {
        Self {
            navigation,
            resolution,
        }
    }

    pub fn path(&self) -> &str {
        &self.navigation.path
    }
}
