//! Rendering of generated Swift declarations.
//!
//! The constants file consumed by the host application is plain Swift. Each
//! pipeline contributes one declaration; this module keeps their textual
//! shape in one place.

use std::borrow::Cow;

/// Escapes a value for use inside a Swift string literal.
///
/// # Examples
///
/// ```
/// use highlight_pack_common::escape_string;
///
/// assert_eq!(escape_string("Rust"), "Rust");
/// assert_eq!(escape_string(r#"say "hi""#), r#"say \"hi\""#);
/// ```
#[must_use]
pub fn escape_string(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '"', '\n', '\r', '\t']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 2);
    for character in value.chars() {
        match character {
            '\\' => escaped.push_str(r"\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str(r"\n"),
            '\r' => escaped.push_str(r"\r"),
            '\t' => escaped.push_str(r"\t"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Renders `public let <name>: UInt16 = <value>`.
#[must_use]
pub fn uint16_declaration(name: &str, value: u16) -> String {
    format!("public let {name}: UInt16 = {value}")
}

/// A `[String: String]` dictionary declaration with ordered entries.
///
/// # Examples
///
/// ```
/// use highlight_pack_common::DictionaryLiteral;
///
/// let mut literal = DictionaryLiteral::new("hlLanguages");
/// literal.entry("Rust", "rust");
///
/// assert_eq!(
///     literal.render(),
///     "public let hlLanguages:[String: String] = [\n\t\"Rust\": \"rust\",\n]"
/// );
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DictionaryLiteral {
    name: String,
    entries: Vec<(String, String)>,
}

impl DictionaryLiteral {
    /// Create an empty dictionary declaration named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Append an entry; entries render in insertion order.
    pub fn entry(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Number of entries recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the declaration.
    ///
    /// Swift rejects `[]` as a dictionary, so an empty literal renders as
    /// `[:]`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut rendered = format!("public let {}:[String: String] = ", self.name);
        if self.entries.is_empty() {
            rendered.push_str("[:]");
            return rendered;
        }

        rendered.push_str("[\n");
        for (key, value) in &self.entries {
            rendered.push_str(&format!(
                "\t\"{}\": \"{}\",\n",
                escape_string(key),
                escape_string(value)
            ));
        }
        rendered.push(']');
        rendered
    }
}
