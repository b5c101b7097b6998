//! Grammar module values flowing through the module pipeline.
//!
//! A [`PluginModule`] is what discovery reads from disk; a
//! [`RewrittenModule`] is what the rewriter hands to the assembler. Both are
//! immutable once built.

use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;

/// Identifier of a grammar module, taken from its file stem.
///
/// This newtype keeps module identifiers distinct from the other strings
/// passed around the pipeline. It does not validate its contents; discovery
/// only admits stems made of ASCII letters, digits, `_` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(String);

impl ModuleId {
    /// Create a new module identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ModuleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A grammar module as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginModule {
    id: ModuleId,
    path: Utf8PathBuf,
    source: String,
}

impl PluginModule {
    /// Create a module from its identifier, location and raw source.
    #[must_use]
    pub const fn new(id: ModuleId, path: Utf8PathBuf, source: String) -> Self {
        Self { id, path, source }
    }

    /// The module identifier.
    #[must_use]
    pub const fn id(&self) -> &ModuleId {
        &self.id
    }

    /// Where the module was read from.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// The unmodified module source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A grammar module wrapped and rewritten to register itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenModule {
    id: ModuleId,
    compiled: String,
}

impl RewrittenModule {
    /// Create a rewritten module.
    #[must_use]
    pub const fn new(id: ModuleId, compiled: String) -> Self {
        Self { id, compiled }
    }

    /// The module identifier.
    #[must_use]
    pub const fn id(&self) -> &ModuleId {
        &self.id
    }

    /// The self-registering source.
    #[must_use]
    pub fn compiled(&self) -> &str {
        &self.compiled
    }
}
