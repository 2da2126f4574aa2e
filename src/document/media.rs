//! Media reference resolution.

/// Turns media library references into displayable URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaResolver {
    base_url: Option<String>,
}

impl MediaResolver {
    /// Resolver that prefixes relative references with `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url: (!base_url.is_empty()).then_some(base_url),
        }
    }

    /// Resolve a reference.
    ///
    /// Absolute URLs are kept, protocol-relative ones get `https:`, relative
    /// paths are joined onto the base URL (or kept as-is without one).
    /// Blank references are unresolvable.
    pub fn resolve(&self, reference: &str) -> Option<String> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }

        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Some(reference.to_string());
        }

        if let Some(rest) = reference.strip_prefix("//") {
            return Some(format!("https://{}", rest));
        }

        match &self.base_url {
            Some(base) => Some(format!("{}/{}", base, reference.trim_start_matches('/'))),
            None => Some(reference.to_string()),
        }
    }
}
