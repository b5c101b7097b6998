//! Pack assembly: the core engine followed by every rewritten grammar.

use crate::discovery::{OrderIndex, discover_modules, load_modules};
use crate::error::{PackError, Result};
use crate::module::{PluginModule, RewrittenModule};
use crate::registry::Registry;
use crate::rewrite::{rewrite_core, rewrite_module};
use camino::Utf8Path;
use highlight_pack::PackConfig;
use highlight_pack_common::uint16_declaration;
use log::{debug, info, warn};

/// Name of the generated module counter.
pub const COUNT_DECLARATION: &str = "hlLangCount";

/// The assembled pack script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pack {
    /// Complete script contents.
    pub script: String,
    /// Number of grammar modules in the script.
    pub module_count: u16,
}

impl Pack {
    /// Render the `hlLangCount` declaration.
    ///
    /// # Examples
    ///
    /// ```
    /// use highlight_pack_builder::assemble::Pack;
    ///
    /// let pack = Pack { script: String::new(), module_count: 191 };
    /// assert_eq!(pack.count_declaration(), "public let hlLangCount: UInt16 = 191");
    /// ```
    #[must_use]
    pub fn count_declaration(&self) -> String {
        uint16_declaration(COUNT_DECLARATION, self.module_count)
    }
}

/// Joins the rewritten core and the modules in manifest order.
///
/// # Errors
///
/// Returns [`PackError::CoreExportNotFound`] when the core has no
/// terminated export, and [`PackError::TooManyModules`] when the count does
/// not fit the generated `UInt16`.
pub fn assemble_pack(
    core: &str,
    core_path: &Utf8Path,
    mut modules: Vec<RewrittenModule>,
    order: &OrderIndex,
    registry: &Registry,
) -> Result<Pack> {
    let module_count = u16::try_from(modules.len()).map_err(|_| PackError::TooManyModules {
        count: modules.len(),
    })?;
    let mut script = rewrite_core(core, registry).ok_or_else(|| PackError::CoreExportNotFound {
        path: core_path.to_owned(),
    })?;

    order.sort_by_rank(&mut modules, RewrittenModule::id);
    for module in &modules {
        script.push_str(module.compiled());
    }

    Ok(Pack {
        script,
        module_count,
    })
}

/// Writes the pack script, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`PackError::Write`] on I/O failure.
pub async fn write_pack(path: &Utf8Path, pack: &Pack) -> Result<()> {
    let write_error = |source: std::io::Error| PackError::Write {
        path: path.to_owned(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }
    tokio::fs::write(path, &pack.script)
        .await
        .map_err(write_error)
}

/// Rewrites every module, applying the export policy.
///
/// Without `strict`, a module lacking an export is kept unregistered and a
/// warning is logged.
fn rewrite_all(
    modules: &[PluginModule],
    registry: &Registry,
    strict: bool,
) -> Result<Vec<RewrittenModule>> {
    modules
        .iter()
        .map(|module| match rewrite_module(module, registry) {
            Ok(rewritten) => Ok(rewritten),
            Err(error) if strict => Err(error.into()),
            Err(error) => {
                warn!(target: "pack::modules", "{error}; including it unregistered");
                Ok(error.into_unregistered())
            }
        })
        .collect()
}

/// Runs the module pipeline: discover, read, rewrite, order, write.
///
/// `config` must already be resolved against the project root.
///
/// # Errors
///
/// Fails on any discovery, read, rewrite or write error.
pub async fn build_pack(config: &PackConfig, registry: &Registry) -> Result<Pack> {
    let paths = discover_modules(&config.languages_dir)?;
    debug!(target: "pack::modules", "found {} grammar modules", paths.len());

    let modules = load_modules(paths).await?;
    let rewritten = rewrite_all(&modules, registry, config.strict_exports)?;

    let core = tokio::fs::read_to_string(&config.core_path)
        .await
        .map_err(|source| PackError::Read {
            path: config.core_path.clone(),
            source,
        })?;
    let order = OrderIndex::load(&config.index_path).await?;

    info!(target: "pack::modules", "Compiling the Highlight package file...");
    let pack = assemble_pack(&core, &config.core_path, rewritten, &order, registry)?;
    write_pack(&config.pack_path, &pack).await?;
    info!(target: "pack::modules", "Successfully generated {}", file_name(&config.pack_path));

    Ok(pack)
}

fn file_name(path: &Utf8Path) -> &str {
    path.file_name().unwrap_or(path.as_str())
}
