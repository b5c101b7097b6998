//! Style sheet compression.
//!
//! The style pipeline only needs "compress this text". [`Compressor`] is that
//! seam; [`CssCompressor`] is the built-in implementation backed by the
//! `minifier` crate's CSS minifier.

/// Error raised when a style sheet cannot be compressed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct CompressError {
    /// Description reported by the minifier.
    pub reason: String,
}

/// Compresses a style sheet body.
pub trait Compressor {
    /// Return a compressed rendering of `text`.
    ///
    /// # Errors
    ///
    /// Returns [`CompressError`] if `text` cannot be tokenised.
    fn compress(&self, text: &str) -> Result<String, CompressError>;
}

/// CSS minifier dropping comments and insignificant whitespace.
///
/// # Examples
///
/// ```
/// use highlight_pack_builder::compress::{Compressor, CssCompressor};
///
/// let css = ".foo > p {\n  color: red;\n}\n";
/// assert_eq!(CssCompressor.compress(css).unwrap(), ".foo>p{color:red;}");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CssCompressor;

impl Compressor for CssCompressor {
    fn compress(&self, text: &str) -> Result<String, CompressError> {
        minifier::css::minify(text)
            .map(|minified| minified.to_string())
            .map_err(|reason| CompressError {
                reason: reason.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn compress(text: &str) -> String {
        CssCompressor.compress(text).expect("style sheet compresses")
    }

    #[rstest]
    #[case::declarations(".a {\n  color: red;\n}\n")]
    #[case::comments("/* theme */\n.a { /* inner */ color: red; }")]
    #[case::selector_lists(".a ,\n.b > .c { color: red; }")]
    fn strips_comments_and_line_breaks(#[case] input: &str) {
        let output = compress(input);

        assert!(output.len() < input.len(), "{output:?} is not shorter");
        assert!(!output.contains('\n'), "{output:?} keeps a line break");
        assert!(!output.contains("/*"), "{output:?} keeps a comment");
        assert!(output.contains("color:red"), "{output:?} lost a declaration");
    }

    #[test]
    fn descendant_combinator_keeps_its_space() {
        assert!(compress(".hljs  .hljs-keyword { color: red; }").starts_with(".hljs .hljs-keyword{"));
    }

    #[test]
    fn quoted_strings_survive() {
        assert!(compress(".a { content: \" ; } \"; }").contains("\" ; } \""));
    }

    #[test]
    fn compression_is_idempotent() {
        let once = compress(".hljs {\n  display: block;\n  color: #abb2bf;\n}\n");

        assert_eq!(compress(&once), once);
    }
}
