//! Rewriting of grammar modules and the core engine for concatenation.
//!
//! Grammar modules are CommonJS files ending in `module.exports = <name>`.
//! Concatenated naively their top-level declarations would collide, so each
//! one is wrapped in an immediately invoked function and its export becomes a
//! registration call against the shared engine instance. The core engine's
//! export becomes the declaration of that instance.

use crate::module::{ModuleId, PluginModule, RewrittenModule};
use crate::registry::Registry;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static MODULE_EXPORT: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"module\.exports\s*=\s*([A-Za-z0-9_]+)").ok());

static CORE_EXPORT: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"module\.exports\s*=\s*([A-Za-z0-9_]+);").ok());

/// Returns `pattern` when it compiled and matches `haystack`.
fn matching<'p>(pattern: &'p Lazy<Option<Regex>>, haystack: &str) -> Option<&'p Regex> {
    pattern
        .as_ref()
        .filter(|compiled| compiled.is_match(haystack))
}

/// Errors raised while rewriting a grammar module.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// The module has no `module.exports = <name>` statement.
    ///
    /// The wrapped but unregistered source is kept so callers may still
    /// emit it.
    #[error("module {id} has no `module.exports = <name>` statement")]
    ExportNotFound {
        /// The module lacking an export.
        id: ModuleId,
        /// The module source inside its isolating wrapper.
        wrapped: String,
    },
}

impl RewriteError {
    /// Consume the error, returning the wrapped source as a module.
    #[must_use]
    pub fn into_unregistered(self) -> RewrittenModule {
        match self {
            Self::ExportNotFound { id, wrapped } => RewrittenModule::new(id, wrapped),
        }
    }
}

/// Wraps `source` in an immediately invoked function.
#[must_use]
pub fn isolate(source: &str) -> String {
    format!("(function() {{{source}}})();")
}

/// Rewrites one grammar module into a self-registering unit.
///
/// The first `module.exports = <name>` becomes
/// `<instance>.registerLanguage('<id>', <name>)`; the rest of the source is
/// untouched.
///
/// # Errors
///
/// Returns [`RewriteError::ExportNotFound`] when no export statement exists.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use highlight_pack_builder::module::{ModuleId, PluginModule};
/// use highlight_pack_builder::registry::Registry;
/// use highlight_pack_builder::rewrite::rewrite_module;
///
/// let module = PluginModule::new(
///     ModuleId::from("x"),
///     Utf8PathBuf::from("x.js"),
///     "function Foo(){}\nmodule.exports = Foo;".to_owned(),
/// );
/// let rewritten = rewrite_module(&module, &Registry::new("hl")).expect("export present");
/// assert_eq!(
///     rewritten.compiled(),
///     "(function() {function Foo(){}\nhl.registerLanguage('x', Foo);})();"
/// );
/// ```
pub fn rewrite_module(
    module: &PluginModule,
    registry: &Registry,
) -> Result<RewrittenModule, RewriteError> {
    let wrapped = isolate(module.source());
    let Some(export) = matching(&MODULE_EXPORT, &wrapped) else {
        return Err(RewriteError::ExportNotFound {
            id: module.id().clone(),
            wrapped,
        });
    };

    let compiled = export
        .replacen(&wrapped, 1, |captures: &Captures<'_>| {
            registry.registration(module.id(), exported_name(captures))
        })
        .into_owned();
    Ok(RewrittenModule::new(module.id().clone(), compiled))
}

/// Rewrites the core engine's `module.exports = <name>;` into the shared
/// instance declaration.
///
/// Returns `None` when the core has no such statement.
#[must_use]
pub fn rewrite_core(source: &str, registry: &Registry) -> Option<String> {
    let export = matching(&CORE_EXPORT, source)?;
    let rewritten = export.replacen(source, 1, |captures: &Captures<'_>| {
        registry.declaration(exported_name(captures))
    });
    Some(rewritten.into_owned())
}

fn exported_name<'h>(captures: &Captures<'h>) -> &'h str {
    captures.get(1).map_or("", |name| name.as_str())
}
