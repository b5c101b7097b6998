//! Error types for the pack generator.
//!
//! Each pipeline reports failures through [`PackError`]. The pipeline
//! runner logs a failed pipeline and drops its output, so these errors
//! describe what went wrong without deciding whether the run continues.

use crate::compress::CompressError;
use crate::languages::FetchError;
use crate::pipeline::Pipeline;
use crate::rewrite::RewriteError;
use camino::Utf8PathBuf;
use highlight_pack::ConfigError;
use thiserror::Error;

/// Errors that can occur while generating the pack and its constants.
#[derive(Debug, Error)]
pub enum PackError {
    /// An input file could not be read.
    #[error("failed to read {path}")]
    Read {
        /// Path of the unreadable file.
        path: Utf8PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be written.
    #[error("failed to write {path}")]
    Write {
        /// Path of the file being written.
        path: Utf8PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A style sheet could not be compressed.
    #[error("failed to compress {path}")]
    Compress {
        /// Path of the style sheet.
        path: Utf8PathBuf,
        /// The minifier's complaint.
        #[source]
        source: CompressError,
    },

    /// A discovery glob could not be built or walked.
    #[error("failed to list {pattern}: {reason}")]
    Discovery {
        /// The glob pattern being expanded.
        pattern: String,
        /// Description of the failure.
        reason: String,
    },

    /// The order manifest contained no quoted module identifiers.
    #[error("no module identifiers found in order manifest {path}")]
    OrderIndexEmpty {
        /// Path of the manifest.
        path: Utf8PathBuf,
    },

    /// The core engine does not end with `module.exports = <name>;`.
    #[error("core engine {path} has no `module.exports = <name>;` statement")]
    CoreExportNotFound {
        /// Path of the core engine source.
        path: Utf8PathBuf,
    },

    /// A grammar module could not be rewritten under strict exports.
    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    /// More modules were found than the generated `UInt16` counter holds.
    #[error("{count} modules exceed the UInt16 module counter")]
    TooManyModules {
        /// Number of modules discovered.
        count: usize,
    },

    /// The language catalog page could not be fetched.
    #[error("language catalog fetch failed")]
    Fetch(#[from] FetchError),

    /// A background task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),

    /// One or more pipelines failed, so the constants file was not written.
    #[error("constants file not written; failed pipelines: {}", describe(.failed))]
    MergeSkipped {
        /// Pipelines that produced no output.
        failed: Vec<Pipeline>,
    },

    /// The project configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn describe(pipelines: &[Pipeline]) -> String {
    pipelines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias using [`PackError`].
pub type Result<T> = std::result::Result<T, PackError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::ModuleId;

    #[test]
    fn merge_skipped_names_every_failed_pipeline() {
        let err = PackError::MergeSkipped {
            failed: vec![Pipeline::StyleCatalog, Pipeline::LanguageCatalog],
        };
        let msg = err.to_string();
        assert!(msg.contains("style catalog"));
        assert!(msg.contains("language catalog"));
    }

    #[test]
    fn read_error_preserves_source() {
        let err = PackError::Read {
            path: Utf8PathBuf::from("node_modules/highlight.js/lib/index.js"),
            source: std::io::Error::other("permission denied"),
        };
        assert!(err.to_string().contains("index.js"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn rewrite_error_is_transparent() {
        let err = PackError::from(RewriteError::ExportNotFound {
            id: ModuleId::from("rust"),
            wrapped: String::new(),
        });
        assert!(err.to_string().contains("rust"));
    }

    #[test]
    fn too_many_modules_reports_count() {
        let err = PackError::TooManyModules { count: 70_000 };
        assert!(err.to_string().contains("70000"));
    }
}
