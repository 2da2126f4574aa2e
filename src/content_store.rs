//! Headless content store client.
//!
//! Only the localization lookup is needed here: given an entity slug and the
//! locale it is published under, fetch the entity's document id and its
//! per-locale slugs.

use crate::config::Config;
use crate::error::ContentStoreError;
use crate::i18n::Locale;
use crate::routing::{EntityKind, EntityLocalization};
use crate::switcher::LocalizationSource;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CollectionResponse {
    #[serde(default)]
    data: Vec<EntityLocalization>,
}

#[derive(Debug, Clone)]
pub struct ContentStoreClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ContentStoreClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.content_store_url.clone(),
            config.content_store_token.clone(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up an entity by slug within `locale`, with its localizations.
    ///
    /// Returns `Ok(None)` when the store has no entity with that slug.
    pub async fn find_entity(
        &self,
        kind: EntityKind,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<EntityLocalization>, ContentStoreError> {
        let url = format!("{}/api/{}", self.base_url, kind.collection());

        let mut request = self.client.get(&url).query(&[
            ("filters[slug][$eq]", slug),
            ("locale", locale.code()),
            ("populate[localizations][fields][0]", "slug"),
            ("populate[localizations][fields][1]", "locale"),
        ]);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ContentStoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let collection: CollectionResponse =
            serde_json::from_str(&body).map_err(|e| ContentStoreError::Decode(e.to_string()))?;

        debug!(
            "Content store returned {} {} record(s) for slug '{}' ({})",
            collection.data.len(),
            kind,
            slug,
            locale
        );

        Ok(collection.data.into_iter().next())
    }
}

impl LocalizationSource for ContentStoreClient {
    async fn fetch_localizations(
        &self,
        kind: EntityKind,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<EntityLocalization>, ContentStoreError> {
        self.find_entity(kind, slug, locale).await
    }
}
