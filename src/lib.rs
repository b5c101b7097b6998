//! Shared configuration for the highlight.js pack generator.
//!
//! The generator itself lives in the `highlight-pack-builder` crate; this
//! crate only describes where its inputs and outputs live so that tooling and
//! tests can agree on a single source of truth.

pub mod config;

pub use config::{CONFIG_FILE_NAME, ConfigError, PackConfig};
