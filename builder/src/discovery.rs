//! Grammar module discovery and registration order.
//!
//! Modules are found by listing `*.js` files in the languages directory.
//! Their load order comes from the engine's own index, whose quoted module
//! names appear in the order the engine registers them. Modules the index
//! does not mention rank ahead of every listed module, matching the order
//! highlight.js builds have always shipped with.

use crate::error::{PackError, Result};
use crate::module::{ModuleId, PluginModule};
use camino::{Utf8Path, Utf8PathBuf};
use futures::future::try_join_all;
use log::debug;

/// Lists grammar module files in `dir`, sorted by file name.
///
/// Only `*.js` files whose stem is made of ASCII letters, digits, `_` and
/// `-` qualify. The listing is a snapshot taken at call time.
///
/// # Errors
///
/// Returns [`PackError::Discovery`] if the directory cannot be walked.
pub fn discover_modules(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let paths = list_files(dir, "js")?;
    Ok(paths
        .into_iter()
        .filter(|path| path.file_stem().is_some_and(is_module_stem))
        .collect())
}

/// Lists files with the given extension in `dir`, in glob order.
pub(crate) fn list_files(dir: &Utf8Path, extension: &str) -> Result<Vec<Utf8PathBuf>> {
    let pattern = format!("{}/*.{extension}", glob::Pattern::escape(dir.as_str()));
    let entries = glob::glob(&pattern).map_err(|e| PackError::Discovery {
        pattern: pattern.clone(),
        reason: e.to_string(),
    })?;

    entries
        .map(|entry| {
            let path = entry.map_err(|e| PackError::Discovery {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
            Utf8PathBuf::try_from(path).map_err(|e| PackError::Discovery {
                pattern: pattern.clone(),
                reason: format!("non UTF-8 path: {e}"),
            })
        })
        .collect()
}

fn is_module_stem(stem: &str) -> bool {
    !stem.is_empty() && stem.bytes().all(is_identifier_byte)
}

const fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-'
}

/// Reads one grammar module.
///
/// # Errors
///
/// Returns [`PackError::Read`] if the file cannot be read.
pub async fn load_module(path: Utf8PathBuf) -> Result<PluginModule> {
    let source = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| PackError::Read {
            path: path.clone(),
            source,
        })?;
    let id = ModuleId::from(path.file_stem().unwrap_or_default());
    debug!(target: "pack::modules", "read module {id} from {path}");
    Ok(PluginModule::new(id, path, source))
}

/// Reads every module concurrently, returning them in the order given.
///
/// # Errors
///
/// Fails with the first read error; the other modules are discarded.
pub async fn load_modules(paths: Vec<Utf8PathBuf>) -> Result<Vec<PluginModule>> {
    try_join_all(paths.into_iter().map(load_module)).await
}

/// Module identifiers in the order the engine registers them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderIndex {
    ids: Vec<String>,
}

impl OrderIndex {
    /// Extracts single-quoted identifiers from manifest text.
    ///
    /// A token is a `'`, one or more ASCII letters, digits, `_` or `-`, and
    /// a closing `'`. The closing quote may also open the next token.
    /// Duplicates are kept in document order.
    ///
    /// # Examples
    ///
    /// ```
    /// use highlight_pack_builder::discovery::OrderIndex;
    ///
    /// let index = OrderIndex::parse("hljs.registerLanguage('xml', require('./languages/xml'));");
    /// assert_eq!(index.ids().collect::<Vec<_>>(), vec!["xml"]);
    /// ```
    #[must_use]
    pub fn parse(manifest: &str) -> Self {
        let bytes = manifest.as_bytes();
        let mut ids = Vec::new();

        for (quote, _) in manifest.match_indices('\'') {
            let start = quote + 1;
            let length = bytes
                .get(start..)
                .unwrap_or_default()
                .iter()
                .take_while(|byte| is_identifier_byte(**byte))
                .count();
            let end = start + length;
            if length > 0 && bytes.get(end) == Some(&b'\'') {
                // The token is pure ASCII, so both bounds sit on char boundaries.
                if let Some(token) = manifest.get(start..end) {
                    ids.push(token.to_owned());
                }
            }
        }

        Self { ids }
    }

    /// Reads and parses the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Read`] if the manifest cannot be read and
    /// [`PackError::OrderIndexEmpty`] if it names no modules.
    pub async fn load(path: &Utf8Path) -> Result<Self> {
        let manifest = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| PackError::Read {
                path: path.to_owned(),
                source,
            })?;
        let index = Self::parse(&manifest);
        if index.is_empty() {
            return Err(PackError::OrderIndexEmpty {
                path: path.to_owned(),
            });
        }
        debug!(target: "pack::modules", "order manifest lists {} identifiers", index.len());
        Ok(index)
    }

    /// Position of the first occurrence of `id`, or `None` if absent.
    ///
    /// `None` orders before every `Some`, so sorting by rank places
    /// unlisted modules first.
    #[must_use]
    pub fn rank(&self, id: &ModuleId) -> Option<usize> {
        self.ids.iter().position(|candidate| candidate == id.as_str())
    }

    /// Stable-sorts items by the rank of their identifier.
    pub fn sort_by_rank<T>(&self, items: &mut [T], id_of: impl Fn(&T) -> &ModuleId) {
        items.sort_by_cached_key(|item| self.rank(id_of(item)));
    }

    /// Identifiers in document order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Number of identifiers, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the manifest named no modules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
