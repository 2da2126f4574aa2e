//! Error types for locale handling, route tables and the content store.

use thiserror::Error;

/// A locale code that cannot be used as a path prefix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Unknown locale code: '{0}'")]
    Unknown(String),

    #[error("Locale '{0}' is not enabled")]
    Disabled(String),
}

/// Errors raised while building or loading a route translation table.
#[derive(Error, Debug)]
pub enum RouteTableError {
    #[error("Route '{route}' has no slug for locale '{locale}'")]
    MissingSlug { route: String, locale: String },

    #[error("Route '{route}' has an empty slug for locale '{locale}'")]
    EmptySlug { route: String, locale: String },

    #[error("Slug '{slug}' is shared by routes '{first}' and '{second}' in locale '{locale}'")]
    DuplicateSlug {
        locale: String,
        slug: String,
        first: String,
        second: String,
    },

    #[error("Route '{route}' has slug '{slug}' containing a path separator")]
    InvalidSlug { route: String, slug: String },

    #[error("Route '{route}': {source}")]
    Locale {
        route: String,
        #[source]
        source: LocaleError,
    },

    #[error("Failed to parse route table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read route table: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the content store client.
#[derive(Error, Debug)]
pub enum ContentStoreError {
    #[error("Failed to send request to content store: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Content store error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse content store response: {0}")]
    Decode(String),
}
