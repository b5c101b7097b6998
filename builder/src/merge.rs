//! Merging of pipeline outputs into the generated constants file.
//!
//! The constants file is written only when all three pipelines succeeded.
//! Otherwise nothing is written and the merge reports which pipelines
//! produced no output.

use crate::assemble::Pack;
use crate::error::{PackError, Result};
use crate::languages::LanguageCatalog;
use crate::pipeline::Pipeline;
use crate::styles::StyleCatalog;
use camino::Utf8Path;
use log::info;

/// Rendered fragments inserted into the constants template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragments {
    /// The `hlLangCount` declaration.
    pub module_count: String,
    /// The `hlLanguages` dictionary.
    pub languages: String,
    /// The `hlStyles` dictionary.
    pub styles: String,
}

impl Fragments {
    /// Renders the fragments of three finished pipelines.
    #[must_use]
    pub fn from_outputs(pack: &Pack, languages: &LanguageCatalog, styles: &StyleCatalog) -> Self {
        Self {
            module_count: pack.count_declaration(),
            languages: languages.render(),
            styles: styles.render(),
        }
    }
}

/// Collects fragments, or names every pipeline that produced nothing.
///
/// # Errors
///
/// Returns [`PackError::MergeSkipped`] when any output is missing.
pub fn merge_outcomes(
    pack: Option<&Pack>,
    styles: Option<&StyleCatalog>,
    languages: Option<&LanguageCatalog>,
) -> Result<Fragments> {
    match (pack, styles, languages) {
        (Some(pack), Some(styles), Some(languages)) => {
            Ok(Fragments::from_outputs(pack, languages, styles))
        }
        _ => {
            let failed = [
                (Pipeline::ModulePack, pack.is_none()),
                (Pipeline::StyleCatalog, styles.is_none()),
                (Pipeline::LanguageCatalog, languages.is_none()),
            ]
            .into_iter()
            .filter_map(|(pipeline, missing)| missing.then_some(pipeline))
            .collect();
            Err(PackError::MergeSkipped { failed })
        }
    }
}

/// Renders the constants file.
///
/// # Examples
///
/// ```
/// use highlight_pack_builder::merge::{Fragments, render_constants};
///
/// let fragments = Fragments {
///     module_count: "public let hlLangCount: UInt16 = 0".to_owned(),
///     languages: "public let hlLanguages:[String: String] = [:]".to_owned(),
///     styles: "public let hlStyles:[String: String] = [:]".to_owned(),
/// };
/// let text = render_constants("Constant.swift", "Highlight", &fragments);
/// assert!(text.starts_with("//\n// Constant.swift\n// Highlight\n//\n"));
/// assert!(text.ends_with("[:]\n"));
/// ```
#[must_use]
pub fn render_constants(file_name: &str, module_name: &str, fragments: &Fragments) -> String {
    let body = format!(
        "//\n\
         // {file_name}\n\
         // {module_name}\n\
         //\n\
         // This file is automatically generated.\n\
         // DO NOT MODIFY THIS FILE MANUALLY\n\
         //\n\
         \n\
         {}\n\
         \n\
         {}\n\
         \n\
         {}",
        fragments.module_count, fragments.languages, fragments.styles,
    );
    format!("{}\n", body.trim())
}

/// Renders and writes the constants file, creating parent directories.
///
/// # Errors
///
/// Returns [`PackError::Write`] on I/O failure.
pub async fn write_constants(
    path: &Utf8Path,
    module_name: &str,
    fragments: &Fragments,
) -> Result<()> {
    let file_name = path.file_name().unwrap_or(path.as_str());
    let text = render_constants(file_name, module_name, fragments);
    let write_error = |source: std::io::Error| PackError::Write {
        path: path.to_owned(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }
    tokio::fs::write(path, text).await.map_err(write_error)?;
    info!(target: "pack::merge", "wrote {path}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::StyleAsset;
    use rstest::{fixture, rstest};

    #[fixture]
    fn pack() -> Pack {
        Pack {
            script: String::new(),
            module_count: 2,
        }
    }

    #[fixture]
    fn styles() -> StyleCatalog {
        StyleCatalog::new(vec![StyleAsset {
            file_name: "github".to_owned(),
            compressed_body: String::new(),
            display_name: "Github".to_owned(),
        }])
    }

    #[fixture]
    fn languages() -> LanguageCatalog {
        LanguageCatalog::extract(r#"name="rust.js" checked>Rust</label>"#)
    }

    #[rstest]
    fn renders_the_complete_constants_file(
        pack: Pack,
        styles: StyleCatalog,
        languages: LanguageCatalog,
    ) {
        let fragments = merge_outcomes(Some(&pack), Some(&styles), Some(&languages))
            .expect("all pipelines succeeded");

        let text = render_constants("Constant.swift", "Highlight", &fragments);

        assert_eq!(
            text,
            concat!(
                "//\n",
                "// Constant.swift\n",
                "// Highlight\n",
                "//\n",
                "// This file is automatically generated.\n",
                "// DO NOT MODIFY THIS FILE MANUALLY\n",
                "//\n",
                "\n",
                "public let hlLangCount: UInt16 = 2\n",
                "\n",
                "public let hlLanguages:[String: String] = [\n",
                "\t\"Rust\": \"rust\",\n",
                "]\n",
                "\n",
                "public let hlStyles:[String: String] = [\n",
                "\t\"Github\": \"github\",\n",
                "]\n",
            )
        );
    }

    #[rstest]
    #[case::languages_missing(true, true, false, &[Pipeline::LanguageCatalog])]
    #[case::pack_and_styles_missing(
        false,
        false,
        true,
        &[Pipeline::ModulePack, Pipeline::StyleCatalog]
    )]
    #[case::all_missing(
        false,
        false,
        false,
        &[Pipeline::ModulePack, Pipeline::StyleCatalog, Pipeline::LanguageCatalog]
    )]
    fn merge_names_missing_pipelines(
        pack: Pack,
        styles: StyleCatalog,
        languages: LanguageCatalog,
        #[case] has_pack: bool,
        #[case] has_styles: bool,
        #[case] has_languages: bool,
        #[case] expected: &[Pipeline],
    ) {
        let err = merge_outcomes(
            has_pack.then_some(&pack),
            has_styles.then_some(&styles),
            has_languages.then_some(&languages),
        )
        .expect_err("merge must be skipped");

        match err {
            PackError::MergeSkipped { failed } => assert_eq!(failed, expected),
            other => panic!("expected MergeSkipped, got {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn write_constants_creates_the_file(
        pack: Pack,
        styles: StyleCatalog,
        languages: LanguageCatalog,
    ) {
        let temp = tempfile::tempdir().expect("temp dir");
        let root = camino::Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8 path");
        let path = root.join("Highlight/Constant.swift");
        let fragments = Fragments::from_outputs(&pack, &languages, &styles);

        write_constants(&path, "Highlight", &fragments)
            .await
            .expect("constants written");

        let text = std::fs::read_to_string(&path).expect("read constants");
        assert!(text.contains("// Constant.swift\n// Highlight\n"));
        assert!(text.contains("public let hlLangCount: UInt16 = 2"));
    }
}
