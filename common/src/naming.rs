//! Display names for internal identifiers.
//!
//! Style sheets ship with file stems such as `atom-one-dark` or
//! `a11y.light`. The host application shows them to people, so each stem is
//! mapped to a display name: an explicit override when one is configured,
//! otherwise a title-cased rendering derived from the stem's delimiters.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

/// Matches a letter or digit at the start of the identifier or directly
/// after one of the word delimiters.
static WORD_START: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?:^|[._-])([a-zA-Z0-9])").ok());

/// Derives a display name from the identifier's structure.
///
/// Every ASCII letter or digit that starts the identifier or follows `.`,
/// `_` or `-` is upper-cased and preceded by a single space, consuming the
/// delimiter. Surrounding whitespace is trimmed. Delimiters that are not
/// followed by a letter or digit are kept verbatim.
///
/// # Examples
///
/// ```
/// use highlight_pack_common::derive_display_name;
///
/// assert_eq!(derive_display_name("atom-one-dark"), "Atom One Dark");
/// assert_eq!(derive_display_name("a11y.light"), "A11y Light");
/// assert_eq!(derive_display_name("github_gist"), "Github Gist");
/// ```
#[must_use]
pub fn derive_display_name(identifier: &str) -> String {
    let Some(word_start) = WORD_START.as_ref() else {
        return identifier.trim().to_owned();
    };
    word_start
        .replace_all(identifier, |captures: &Captures<'_>| {
            let initial = captures.get(1).map_or("", |matched| matched.as_str());
            format!(" {}", initial.to_uppercase())
        })
        .trim()
        .to_owned()
}

/// Resolves display names, preferring explicit overrides.
#[derive(Clone, Copy, Debug)]
pub struct NameResolver<'a> {
    overrides: &'a BTreeMap<String, String>,
}

impl<'a> NameResolver<'a> {
    /// Create a resolver backed by an override table.
    #[must_use]
    pub const fn new(overrides: &'a BTreeMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Return the display name for `identifier`.
    ///
    /// A configured override is returned exactly as written. Missing, empty
    /// and whitespace-only overrides fall back to [`derive_display_name`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use highlight_pack_common::NameResolver;
    ///
    /// let overrides = BTreeMap::from([("xcode".to_owned(), "Xcode Light".to_owned())]);
    /// let resolver = NameResolver::new(&overrides);
    ///
    /// assert_eq!(resolver.resolve("xcode"), "Xcode Light");
    /// assert_eq!(resolver.resolve("solarized-dark"), "Solarized Dark");
    /// ```
    #[must_use]
    pub fn resolve(&self, identifier: &str) -> String {
        self.overrides
            .get(identifier)
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| derive_display_name(identifier))
    }
}
