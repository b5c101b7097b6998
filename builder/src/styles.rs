//! Style sheet minification and the style catalog.
//!
//! Every `*.css` file in the styles directory is compressed into a
//! `<stem>.min.css` sibling and then removed. Minified sheets left by an
//! earlier run are catalogued as they are. The catalog maps each style's
//! display name to its stem so the host application can list themes and load
//! the matching minified file.

use crate::compress::Compressor;
use crate::discovery::list_files;
use crate::error::{PackError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use futures::future::try_join_all;
use highlight_pack_common::{DictionaryLiteral, NameResolver};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Name of the generated style dictionary.
pub const STYLES_DECLARATION: &str = "hlStyles";

/// A minified style sheet and its catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleAsset {
    /// File stem, e.g. `atom-one-dark`.
    pub file_name: String,
    /// Compressed style sheet body.
    pub compressed_body: String,
    /// Name shown to people, e.g. `Atom One Dark`.
    pub display_name: String,
}

/// Style assets in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleCatalog {
    assets: Vec<StyleAsset>,
}

impl StyleCatalog {
    /// Create a catalog from assets already in discovery order.
    #[must_use]
    pub const fn new(assets: Vec<StyleAsset>) -> Self {
        Self { assets }
    }

    /// The catalogued assets.
    #[must_use]
    pub fn assets(&self) -> &[StyleAsset] {
        &self.assets
    }

    /// Number of catalogued styles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether no styles were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Render the `hlStyles` dictionary declaration.
    #[must_use]
    pub fn render(&self) -> String {
        let mut literal = DictionaryLiteral::new(STYLES_DECLARATION);
        for asset in &self.assets {
            literal.entry(asset.display_name.as_str(), asset.file_name.as_str());
        }
        literal.render()
    }
}

/// A style sheet found in the styles directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSource {
    /// An uncompressed `<stem>.css` awaiting minification.
    Original(Utf8PathBuf),
    /// A `<stem>.min.css` written by an earlier run whose original is gone.
    Minified(Utf8PathBuf),
}

impl StyleSource {
    fn classify(path: Utf8PathBuf) -> Self {
        if path.as_str().ends_with(MINIFIED_SUFFIX) {
            Self::Minified(path)
        } else {
            Self::Original(path)
        }
    }

    /// Path of the style sheet on disk.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::Original(path) | Self::Minified(path) => path,
        }
    }

    /// File stem shared by the original and its minified sibling, e.g.
    /// `a11y.light` for both `a11y.light.css` and `a11y.light.min.css`.
    #[must_use]
    pub fn stem(&self) -> &str {
        let name = self.path().file_name().unwrap_or_default();
        let suffix = match self {
            Self::Original(_) => ".css",
            Self::Minified(_) => MINIFIED_SUFFIX,
        };
        name.strip_suffix(suffix).unwrap_or(name)
    }
}

const MINIFIED_SUFFIX: &str = ".min.css";

/// Lists the style sheets in `dir`, one per stem, ordered by stem.
///
/// An original `<stem>.css` wins over a `<stem>.min.css` sibling, which it
/// will overwrite. A `<stem>.min.css` without an original is reported as
/// [`StyleSource::Minified`] so re-runs keep cataloguing it.
///
/// # Errors
///
/// Returns [`PackError::Discovery`] if the directory cannot be walked.
pub fn discover_styles(dir: &Utf8Path) -> Result<Vec<StyleSource>> {
    let mut by_stem: BTreeMap<String, StyleSource> = BTreeMap::new();
    for path in list_files(dir, "css")? {
        let source = StyleSource::classify(path);
        match by_stem.entry(source.stem().to_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(source);
            }
            Entry::Occupied(mut slot) => {
                if matches!(source, StyleSource::Original(_)) {
                    slot.insert(source);
                }
            }
        }
    }
    Ok(by_stem.into_values().collect())
}

/// Path of the minified sibling of a style sheet.
#[must_use]
pub fn minified_path(path: &Utf8Path) -> Utf8PathBuf {
    path.with_extension("min.css")
}

/// Produces the catalog entry for one style sheet.
///
/// Originals are minified into their `<stem>.min.css` sibling, which is
/// written before the original is removed; a failed removal is logged and
/// otherwise ignored. Minified sheets from earlier runs are read back as they
/// are.
///
/// # Errors
///
/// Returns [`PackError::Read`], [`PackError::Compress`] or
/// [`PackError::Write`] when the sheet cannot be processed.
pub async fn compile_style(
    source: StyleSource,
    resolver: NameResolver<'_>,
    compressor: &dyn Compressor,
) -> Result<StyleAsset> {
    let file_name = source.stem().to_owned();
    let display_name = resolver.resolve(&file_name);
    let compressed_body = match source {
        StyleSource::Original(path) => minify_original(&path, compressor).await?,
        StyleSource::Minified(path) => {
            debug!(target: "pack::styles", "reusing minified style {path}");
            read_style(&path).await?
        }
    };

    Ok(StyleAsset {
        file_name,
        compressed_body,
        display_name,
    })
}

async fn read_style(path: &Utf8Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|error| PackError::Read {
            path: path.to_owned(),
            source: error,
        })
}

async fn minify_original(path: &Utf8Path, compressor: &dyn Compressor) -> Result<String> {
    let body = read_style(path).await?;
    let compressed_body = compressor
        .compress(&body)
        .map_err(|error| PackError::Compress {
            path: path.to_owned(),
            source: error,
        })?;

    let target = minified_path(path);
    tokio::fs::write(&target, &compressed_body)
        .await
        .map_err(|error| PackError::Write {
            path: target.clone(),
            source: error,
        })?;
    retire_original(path).await;
    debug!(target: "pack::styles", "minified {path} into {target}");
    Ok(compressed_body)
}

/// Removes a style sheet that has been replaced by its minified sibling.
///
/// Removal failures do not affect the catalog, so they are only logged.
async fn retire_original(path: &Utf8Path) {
    if let Err(error) = tokio::fs::remove_file(path).await {
        warn!(target: "pack::styles", "could not remove original style {path}: {error}");
    }
}

/// Minifies every style sheet in `dir` and returns the catalog.
///
/// Files are processed concurrently; the catalog keeps discovery order. An
/// empty catalog is logged as a warning because the host application would
/// list no themes.
///
/// # Errors
///
/// Fails with the first read, compression or write error.
pub async fn compile_styles(
    dir: &Utf8Path,
    overrides: &BTreeMap<String, String>,
    compressor: &dyn Compressor,
) -> Result<StyleCatalog> {
    let sources = discover_styles(dir)?;
    let resolver = NameResolver::new(overrides);
    let assets = try_join_all(
        sources
            .into_iter()
            .map(|source| compile_style(source, resolver, compressor)),
    )
    .await?;
    if assets.is_empty() {
        warn!(target: "pack::styles", "no style sheets found in {dir}");
    }
    info!(target: "pack::styles", "Successfully minified css files.");
    Ok(StyleCatalog::new(assets))
}
