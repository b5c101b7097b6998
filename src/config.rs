//! Project configuration loader for the pack generator.
//!
//! Settings live in `highlight-pack.toml` at the project root. Every key is
//! optional: omitted values fall back to the layout used by the Highlight
//! Swift package, so an empty or absent file reproduces the stock build.
//! Relative paths are interpreted against the project root by
//! [`PackConfig::resolve`].

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io;
use thiserror::Error;

/// Name of the configuration file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "highlight-pack.toml";

/// Errors raised while loading [`PackConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read configuration at {path}")]
    Read {
        /// Path of the unreadable file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML or contains unknown keys.
    #[error("invalid configuration at {path}")]
    Parse {
        /// Path of the malformed file.
        path: Utf8PathBuf,
        /// Parser diagnostic.
        #[source]
        source: toml::de::Error,
    },
}

/// Settings shared by every pipeline of a pack run.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PackConfig {
    /// Directory holding the style sheets to minify and catalogue.
    pub styles_dir: Utf8PathBuf,
    /// Directory holding the language grammar modules.
    pub languages_dir: Utf8PathBuf,
    /// Source of the core engine.
    pub core_path: Utf8PathBuf,
    /// Manifest whose quoted identifiers define the registration order.
    pub index_path: Utf8PathBuf,
    /// Destination of the concatenated script.
    pub pack_path: Utf8PathBuf,
    /// Destination of the generated Swift constants.
    pub constants_path: Utf8PathBuf,
    /// Module name written into the generated file header.
    pub module_name: String,
    /// Page listing the language names offered by highlight.js.
    pub catalog_url: String,
    /// Variable that holds the shared engine instance inside the pack.
    pub instance_name: String,
    /// Fail the module pipeline when a grammar lacks its export statement.
    pub strict_exports: bool,
    /// Display-name overrides keyed by style file stem.
    pub style_names: BTreeMap<String, String>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            styles_dir: Utf8PathBuf::from("Highlight/scripts/styles"),
            languages_dir: Utf8PathBuf::from("node_modules/highlight.js/lib/languages"),
            core_path: Utf8PathBuf::from("node_modules/highlight.js/lib/core.js"),
            index_path: Utf8PathBuf::from("node_modules/highlight.js/lib/index.js"),
            pack_path: Utf8PathBuf::from("Highlight/scripts/highlight.pack.js"),
            constants_path: Utf8PathBuf::from("Highlight/Constant.swift"),
            module_name: "Highlight".to_owned(),
            catalog_url: "https://highlightjs.org/download/".to_owned(),
            instance_name: "highlightGlobalInstance".to_owned(),
            strict_exports: false,
            style_names: BTreeMap::new(),
        }
    }
}

impl PackConfig {
    /// Loads `highlight-pack.toml` from `root`, or the defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file exists but cannot be read or
    /// parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use highlight_pack::PackConfig;
    ///
    /// let config = PackConfig::load(Utf8Path::new("/nonexistent/project"))
    ///     .expect("absent files yield defaults");
    /// assert_eq!(config.instance_name, "highlightGlobalInstance");
    /// ```
    pub fn load(root: &Utf8Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&path, &contents),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(ConfigError::Read {
                path,
                source: error,
            }),
        }
    }

    /// Loads configuration from an explicit file, which must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load_from(path: &Utf8Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.to_owned(),
            source: error,
        })?;
        Self::parse(path, &contents)
    }

    /// Parses configuration text, attributing failures to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn parse(path: &Utf8Path, source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|error| ConfigError::Parse {
            path: path.to_owned(),
            source: error,
        })
    }

    /// Returns a copy whose relative paths are anchored at `root`.
    ///
    /// Absolute paths are kept as written.
    #[must_use]
    pub fn resolve(&self, root: &Utf8Path) -> Self {
        let anchor = |path: &Utf8Path| root.join(path);
        Self {
            styles_dir: anchor(&self.styles_dir),
            languages_dir: anchor(&self.languages_dir),
            core_path: anchor(&self.core_path),
            index_path: anchor(&self.index_path),
            pack_path: anchor(&self.pack_path),
            constants_path: anchor(&self.constants_path),
            ..self.clone()
        }
    }
}
