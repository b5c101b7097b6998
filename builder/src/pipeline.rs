//! Build orchestration.
//!
//! A build runs three independent pipelines on one event loop: the module
//! pack, the style catalog and the language catalog. A failed pipeline is
//! logged and yields no output without disturbing the others. The constants
//! file is merged from the three outputs only when all of them succeeded.

use crate::assemble::{Pack, build_pack};
use crate::compress::Compressor;
use crate::error::{PackError, Result};
use crate::languages::{DocumentFetcher, LanguageCatalog, fetch_catalog};
use crate::merge::{merge_outcomes, write_constants};
use crate::registry::Registry;
use crate::styles::{StyleCatalog, compile_styles};
use camino::Utf8PathBuf;
use highlight_pack::PackConfig;
use log::error;
use std::fmt;
use std::sync::Arc;

/// The independent units of work in a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pipeline {
    /// Grammar modules assembled into the pack script.
    ModulePack,
    /// Minified style sheets and their catalog.
    StyleCatalog,
    /// Language names fetched from the download page.
    LanguageCatalog,
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ModulePack => "module pack",
            Self::StyleCatalog => "style catalog",
            Self::LanguageCatalog => "language catalog",
        };
        f.write_str(name)
    }
}

/// Collaborators for a build run.
pub struct BuildContext<'a> {
    /// Configuration already resolved against the project root.
    pub config: &'a PackConfig,
    /// Source of the language download page.
    pub fetcher: Arc<dyn DocumentFetcher + Send + Sync>,
    /// Style sheet compressor.
    pub compressor: &'a dyn Compressor,
}

/// Outcome of a build run.
#[derive(Debug)]
pub struct BuildReport {
    /// The pack, if the module pipeline succeeded.
    pub pack: Option<Pack>,
    /// The style catalog, if the style pipeline succeeded.
    pub styles: Option<StyleCatalog>,
    /// The language catalog, if the fetch pipeline succeeded.
    pub languages: Option<LanguageCatalog>,
    /// Path of the written constants file, or why it was not written.
    pub constants: Result<Utf8PathBuf>,
}

impl BuildReport {
    /// Whether the constants file was written.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.constants.is_ok()
    }
}

/// Runs the three pipelines concurrently and merges their outputs.
///
/// Pipeline failures are logged at error level and reflected in the report
/// rather than returned.
pub async fn run_build(context: &BuildContext<'_>) -> BuildReport {
    let config = context.config;
    let registry = Registry::new(config.instance_name.as_str());

    let (pack_result, styles_result, languages_result) = tokio::join!(
        build_pack(config, &registry),
        compile_styles(&config.styles_dir, &config.style_names, context.compressor),
        fetch_catalog(Arc::clone(&context.fetcher), config.catalog_url.clone()),
    );
    let pack = settle(Pipeline::ModulePack, pack_result);
    let styles = settle(Pipeline::StyleCatalog, styles_result);
    let languages = settle(Pipeline::LanguageCatalog, languages_result);

    let constants = merge_and_write(
        config,
        pack.as_ref(),
        styles.as_ref(),
        languages.as_ref(),
    )
    .await;
    if let Err(err) = &constants {
        error!(target: "pack::merge", "{err}");
    }

    BuildReport {
        pack,
        styles,
        languages,
        constants,
    }
}

async fn merge_and_write(
    config: &PackConfig,
    pack: Option<&Pack>,
    styles: Option<&StyleCatalog>,
    languages: Option<&LanguageCatalog>,
) -> Result<Utf8PathBuf> {
    let fragments = merge_outcomes(pack, styles, languages)?;
    write_constants(&config.constants_path, &config.module_name, &fragments).await?;
    Ok(config.constants_path.clone())
}

/// Converts a pipeline result into an optional output, logging failures.
fn settle<T>(pipeline: Pipeline, result: Result<T>) -> Option<T> {
    match result {
        Ok(output) => Some(output),
        Err(err) => {
            error!(target: "pack::merge", "{pipeline} failed: {}", describe_chain(&err));
            None
        }
    }
}

/// Joins an error and its sources into one line.
fn describe_chain(err: &PackError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
