//! highlight.js pack generator.
//!
//! This crate turns an installed highlight.js distribution into a single pack
//! script plus a generated Swift constants file listing the bundled
//! languages and styles. It is used by the `highlight-pack` binary and can be
//! driven programmatically for testing.
//!
//! # Modules
//!
//! - [`assemble`] - Pack assembly from the core engine and grammar modules
//! - [`cli`] - Command-line argument definitions
//! - [`compress`] - Style sheet compression
//! - [`discovery`] - Grammar module discovery and registration order
//! - [`error`] - Error types shared by the pipelines
//! - [`languages`] - Language name catalog fetched from the download page
//! - [`logging`] - Stderr log subscriber for the binary
//! - [`merge`] - Constants file rendering and merging
//! - [`module`] - Grammar module types
//! - [`pipeline`] - Concurrent build orchestration
//! - [`registry`] - The shared engine instance modules register against
//! - [`rewrite`] - Module and core rewriting
//! - [`styles`] - Style minification and the style catalog

pub mod assemble;
pub mod cli;
pub mod compress;
pub mod discovery;
pub mod error;
pub mod languages;
pub mod logging;
pub mod merge;
pub mod module;
pub mod pipeline;
pub mod registry;
pub mod rewrite;
pub mod styles;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
