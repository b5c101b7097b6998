//! Shared helpers for the highlight.js pack generator: display-name
//! derivation for catalogue keys and rendering of generated Swift literals.

pub mod literal;
pub mod naming;

pub use literal::{DictionaryLiteral, escape_string, uint16_declaration};
pub use naming::{NameResolver, derive_display_name};
