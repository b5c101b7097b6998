//! Shared test utilities for the builder crate.

use crate::languages::{DocumentFetcher, FetchError};
use camino::{Utf8Path, Utf8PathBuf};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Core engine source with a terminated export.
pub const CORE_SOURCE: &str = "var hljs = function() { return {}; };\nmodule.exports = hljs;\n";

/// A download page listing two languages.
pub const DOWNLOAD_PAGE: &str = concat!(
    "<ul>\n",
    "<li><label><input type=\"checkbox\" name=\"rust.js\" checked>Rust</label></li>\n",
    "<li><label><input type=\"checkbox\" name=\"bash.js\">Bash</label></li>\n",
    "</ul>\n",
);

/// Builds grammar module source exporting a function called `name`.
#[must_use]
pub fn module_source(name: &str) -> String {
    format!("function {name}(hljs) {{ return {{}}; }}\nmodule.exports = {name};\n")
}

/// Builds an order manifest registering `ids` in the given order.
#[must_use]
pub fn order_manifest(ids: &[&str]) -> String {
    ids.iter()
        .map(|id| format!("hljs.registerLanguage('{id}', require('./languages/{id}'));\n"))
        .collect()
}

/// A [`DocumentFetcher`] that serves a canned document or a canned failure.
///
/// Counts requests so tests can assert the page was fetched exactly once.
#[derive(Debug)]
pub struct StubFetcher {
    response: Result<String, String>,
    calls: AtomicUsize,
}

impl StubFetcher {
    /// A fetcher returning `document` for every URL.
    #[must_use]
    pub fn serving(document: impl Into<String>) -> Self {
        Self {
            response: Ok(document.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A fetcher failing every request with `reason`.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            response: Err(reason.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of requests made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DocumentFetcher for StubFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone().map_err(|reason| FetchError::Http {
            url: url.to_owned(),
            reason,
        })
    }
}

/// A scratch project laid out with the default paths.
///
/// The directory is removed when the tree is dropped.
#[derive(Debug)]
pub struct FixtureTree {
    _temp_dir: tempfile::TempDir,
    root: Utf8PathBuf,
}

impl FixtureTree {
    /// Creates an empty project.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created or its
    /// path is not UTF-8.
    pub fn new() -> io::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    /// The project root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Writes `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> io::Result<Utf8PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Writes the core engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn with_core(&self, source: &str) -> io::Result<&Self> {
        self.write("node_modules/highlight.js/lib/core.js", source)?;
        Ok(self)
    }

    /// Writes an order manifest registering `ids`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn with_order(&self, ids: &[&str]) -> io::Result<&Self> {
        self.write("node_modules/highlight.js/lib/index.js", &order_manifest(ids))?;
        Ok(self)
    }

    /// Writes one grammar module per id, each exporting a function named
    /// after it.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be written.
    pub fn with_modules(&self, ids: &[&str]) -> io::Result<&Self> {
        for id in ids {
            self.write(
                &format!("node_modules/highlight.js/lib/languages/{id}.js"),
                &module_source(&format!("lang_{}", id.replace('-', "_"))),
            )?;
        }
        Ok(self)
    }

    /// Writes style sheets by file name.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be written.
    pub fn with_styles(&self, styles: &[(&str, &str)]) -> io::Result<&Self> {
        for (name, body) in styles {
            self.write(&format!("Highlight/scripts/styles/{name}"), body)?;
        }
        Ok(self)
    }

    /// Reads a file relative to the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(&self, relative: &str) -> io::Result<String> {
        std::fs::read_to_string(self.root.join(relative))
    }

    /// Whether `relative` exists under the root.
    #[must_use]
    pub fn exists(&self, relative: &str) -> bool {
        self.root.join(relative).exists()
    }
}
