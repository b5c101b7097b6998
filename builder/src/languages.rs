//! Language name catalog fetched from the highlight.js download page.
//!
//! The download page lists every grammar as a checkbox whose `name`
//! attribute carries the module file and whose label carries the language's
//! human name. The catalog maps those names to module codes for the host
//! application. Fetching goes through [`DocumentFetcher`] so tests can serve
//! canned pages without network access.

use crate::error::{PackError, Result};
use highlight_pack_common::DictionaryLiteral;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

/// Name of the generated language dictionary.
pub const LANGUAGES_DECLARATION: &str = "hlLanguages";

static LANGUAGE_LABEL: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r#"name="([A-Za-z0-9_-]+)\.js"(?: checked)?>([^<>]+)</label>"#).ok()
});

/// Trait for fetching a document by URL.
///
/// Abstractions allow tests to mock HTTP behaviour without network access.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentFetcher {
    /// Fetch the complete body of the document at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be read.
    fn fetch(&self, url: &str) -> std::result::Result<String, FetchError>;
}

/// Errors arising from document fetches.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("download failed for {url}: {reason}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested document was not found (HTTP 404).
    #[error("document not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },
}

/// HTTP-based fetcher using `ureq`.
///
/// A single attempt is made per call, without retries or a timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpFetcher;

impl DocumentFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = ureq::get(url).call().map_err(|e| map_ureq_error(url, &e))?;
        response
            .into_body()
            .read_to_string()
            .map_err(|e| FetchError::Http {
                url: url.to_owned(),
                reason: e.to_string(),
            })
    }
}

/// Map a ureq error to a [`FetchError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> FetchError {
    match err {
        ureq::Error::StatusCode(404) => FetchError::NotFound {
            url: url.to_owned(),
        },
        other => FetchError::Http {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}

/// A language display name and its module code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCatalogEntry {
    /// Name shown to people, e.g. `Rust`.
    pub display_name: String,
    /// Module code, e.g. `rust`.
    pub short_code: String,
}

/// Language entries in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageCatalog {
    entries: Vec<NameCatalogEntry>,
}

impl LanguageCatalog {
    /// Extracts the catalog from a download page.
    ///
    /// Labels are trimmed. When a display name appears more than once only
    /// the first entry is kept, since the generated dictionary needs unique
    /// keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use highlight_pack_builder::languages::LanguageCatalog;
    ///
    /// let catalog = LanguageCatalog::extract(r#"<input name="rust.js" checked>Rust</label>"#);
    /// let entry = &catalog.entries()[0];
    /// assert_eq!((entry.display_name.as_str(), entry.short_code.as_str()), ("Rust", "rust"));
    /// ```
    #[must_use]
    pub fn extract(document: &str) -> Self {
        let Some(label) = LANGUAGE_LABEL.as_ref() else {
            return Self::default();
        };
        let mut seen = HashSet::new();
        let entries = label
            .captures_iter(document)
            .filter_map(|captures| {
                let short_code = captures.get(1)?.as_str().to_owned();
                let display_name = captures.get(2)?.as_str().trim().to_owned();
                Some(NameCatalogEntry {
                    display_name,
                    short_code,
                })
            })
            .filter(|entry| seen.insert(entry.display_name.clone()))
            .collect();
        Self { entries }
    }

    /// The extracted entries.
    #[must_use]
    pub fn entries(&self) -> &[NameCatalogEntry] {
        &self.entries
    }

    /// Number of languages found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the page yielded no languages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the `hlLanguages` dictionary declaration.
    #[must_use]
    pub fn render(&self) -> String {
        let mut literal = DictionaryLiteral::new(LANGUAGES_DECLARATION);
        for entry in &self.entries {
            literal.entry(entry.display_name.as_str(), entry.short_code.as_str());
        }
        literal.render()
    }
}

/// Fetches and extracts the catalog with an injected fetcher.
///
/// An empty catalog is logged as a warning rather than treated as an error.
///
/// # Errors
///
/// Returns the fetcher's error unchanged.
pub fn fetch_catalog_with(
    fetcher: &dyn DocumentFetcher,
    url: &str,
) -> std::result::Result<LanguageCatalog, FetchError> {
    let document = fetcher.fetch(url)?;
    debug!(target: "pack::languages", "fetched {} bytes from {url}", document.len());

    let catalog = LanguageCatalog::extract(&document);
    if catalog.is_empty() {
        warn!(target: "pack::languages", "no language labels found at {url}");
    }
    Ok(catalog)
}

/// Fetches the catalog on the blocking pool.
///
/// The fetch blocks a worker thread, leaving the event loop free to drive
/// the other pipelines.
///
/// # Errors
///
/// Returns [`PackError::Fetch`] on transport failure and
/// [`PackError::Task`] if the worker panics.
pub async fn fetch_catalog(
    fetcher: Arc<dyn DocumentFetcher + Send + Sync>,
    url: String,
) -> Result<LanguageCatalog> {
    let catalog = tokio::task::spawn_blocking(move || fetch_catalog_with(fetcher.as_ref(), &url))
        .await
        .map_err(|e| PackError::Task(e.to_string()))??;
    Ok(catalog)
}
