//! Behaviour-driven tests for a complete pack build.

use highlight_pack::PackConfig;
use highlight_pack_builder::compress::{Compressor, CssCompressor};
use highlight_pack_builder::error::PackError;
use highlight_pack_builder::pipeline::{BuildContext, BuildReport, run_build};
use highlight_pack_builder::test_utils::{CORE_SOURCE, DOWNLOAD_PAGE, FixtureTree, StubFetcher};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::sync::Arc;

const PACK_PATH: &str = "Highlight/scripts/highlight.pack.js";
const CONSTANTS_PATH: &str = "Highlight/Constant.swift";
const STYLE_SHEET: &str = ".hljs {\n  display: block;\n}\n";

struct BuildWorld {
    tree: FixtureTree,
    core: String,
    styles: Vec<String>,
    strict_exports: bool,
    fetcher: Option<Arc<StubFetcher>>,
    report: Option<BuildReport>,
}

impl BuildWorld {
    fn report(&self) -> &BuildReport {
        self.report.as_ref().expect("the pack should have been built")
    }

    fn pack_script(&self) -> String {
        self.tree.read(PACK_PATH).expect("pack script should exist")
    }
}

#[fixture]
fn world() -> BuildWorld {
    BuildWorld {
        tree: FixtureTree::new().expect("fixture tree"),
        core: CORE_SOURCE.to_owned(),
        styles: Vec::new(),
        strict_exports: false,
        fetcher: None,
        report: None,
    }
}

fn split_list(list: &str) -> Vec<&str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
}

#[given("a project with grammar modules \"{ids}\"")]
fn given_modules(world: &mut BuildWorld, ids: String) {
    world
        .tree
        .with_modules(&split_list(&ids))
        .expect("write modules");
}

#[given("a grammar module \"{id}\" without an export")]
fn given_plain_module(world: &mut BuildWorld, id: String) {
    world
        .tree
        .write(
            &format!("node_modules/highlight.js/lib/languages/{id}.js"),
            "var unused = 1;\n",
        )
        .expect("write module");
}

#[given("an order manifest listing \"{ids}\"")]
fn given_order(world: &mut BuildWorld, ids: String) {
    world
        .tree
        .with_order(&split_list(&ids))
        .expect("write manifest");
}

#[given("a core engine without an export")]
fn given_core_without_export(world: &mut BuildWorld) {
    world.core = "var hljs = {};\n".to_owned();
}

#[given("style sheets \"{names}\"")]
fn given_styles(world: &mut BuildWorld, names: String) {
    let names: Vec<String> = split_list(&names).into_iter().map(str::to_owned).collect();
    let sheets: Vec<(&str, &str)> = names
        .iter()
        .map(|name| (name.as_str(), STYLE_SHEET))
        .collect();
    world.tree.with_styles(&sheets).expect("write styles");
    world.styles = names;
}

#[given("strict exports are enabled")]
fn given_strict_exports(world: &mut BuildWorld) {
    world.strict_exports = true;
}

#[given("a download page listing Rust and Bash")]
fn given_download_page(world: &mut BuildWorld) {
    world.fetcher = Some(Arc::new(StubFetcher::serving(DOWNLOAD_PAGE)));
}

#[given("a download page that cannot be fetched")]
fn given_failing_download(world: &mut BuildWorld) {
    world.fetcher = Some(Arc::new(StubFetcher::failing("connection refused")));
}

fn build(world: &mut BuildWorld) {
    world.tree.with_core(&world.core).expect("write core");
    let config = PackConfig {
        strict_exports: world.strict_exports,
        ..PackConfig::default()
    }
    .resolve(world.tree.root());
    let fetcher = world.fetcher.clone().expect("fetcher configured");
    let requests = fetcher.calls();
    let compressor = CssCompressor;
    let context = BuildContext {
        config: &config,
        fetcher: fetcher.clone(),
        compressor: &compressor,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");
    world.report = Some(runtime.block_on(run_build(&context)));
    assert_eq!(
        fetcher.calls(),
        requests + 1,
        "the download page is fetched once per build"
    );
}

#[when("the pack is built")]
fn when_built(world: &mut BuildWorld) {
    build(world);
}

#[when("the pack is built again")]
fn when_rebuilt(world: &mut BuildWorld) {
    build(world);
}

#[then("the constants file is written")]
fn then_constants_written(world: &mut BuildWorld) {
    assert!(world.report().is_complete());
    assert!(world.tree.exists(CONSTANTS_PATH));
}

#[then("the constants file declares {count} modules")]
fn then_constants_count(world: &mut BuildWorld, count: u16) {
    let constants = world.tree.read(CONSTANTS_PATH).expect("constants file");
    assert!(
        constants.contains(&format!("public let hlLangCount: UInt16 = {count}\n")),
        "unexpected constants file:\n{constants}"
    );
    assert!(constants.contains("\t\"Rust\": \"rust\",\n"));
}

#[then("the pack registers modules in the order \"{ids}\"")]
fn then_pack_order(world: &mut BuildWorld, ids: String) {
    let script = world.pack_script();
    assert!(script.starts_with("var hljs"));
    assert!(script.contains("var highlightGlobalInstance = hljs;"));

    let positions: Vec<usize> = split_list(&ids)
        .into_iter()
        .map(|id| {
            script
                .find(&format!("highlightGlobalInstance.registerLanguage('{id}',"))
                .unwrap_or_else(|| panic!("module {id} should be registered"))
        })
        .collect();
    assert!(
        positions.windows(2).all(|pair| pair[0] < pair[1]),
        "registrations out of order: {positions:?}"
    );
}

#[then("every style sheet has been replaced by its minified sibling")]
fn then_styles_minified(world: &mut BuildWorld) {
    for name in &world.styles {
        let stem = name.trim_end_matches(".css");
        let original = format!("Highlight/scripts/styles/{name}");
        let minified = format!("Highlight/scripts/styles/{stem}.min.css");
        assert!(!world.tree.exists(&original), "{original} should be removed");
        assert_eq!(
            world.tree.read(&minified).expect("minified sibling"),
            CssCompressor
                .compress(STYLE_SHEET)
                .expect("style sheet compresses")
        );
    }
}

#[then("the pack script is written")]
fn then_pack_written(world: &mut BuildWorld) {
    assert!(world.report().pack.is_some());
    assert!(world.pack_script().contains("registerLanguage"));
}

#[then("the style catalog lists {count} style")]
fn then_style_count(world: &mut BuildWorld, count: usize) {
    let styles = world
        .report()
        .styles
        .as_ref()
        .expect("the style pipeline should succeed");
    assert_eq!(styles.len(), count);
}

#[then("the constants file lists the style \"{name}\"")]
fn then_constants_style(world: &mut BuildWorld, name: String) {
    let constants = world.tree.read(CONSTANTS_PATH).expect("constants file");
    assert!(
        constants.contains(&format!("\t\"{name}\": \"")),
        "style {name} missing from constants file:\n{constants}"
    );
}

#[then("the constants file is not written")]
fn then_constants_not_written(world: &mut BuildWorld) {
    assert!(!world.report().is_complete());
    assert!(!world.tree.exists(CONSTANTS_PATH));
}

#[then("the merge reports the \"{pipeline}\" pipeline as failed")]
fn then_merge_reports(world: &mut BuildWorld, pipeline: String) {
    match &world.report().constants {
        Err(PackError::MergeSkipped { failed }) => {
            let names: Vec<String> = failed.iter().map(ToString::to_string).collect();
            assert_eq!(names, vec![pipeline]);
        }
        other => panic!("expected a skipped merge, got {other:?}"),
    }
}

#[scenario(
    path = "tests/features/pack_build.feature",
    name = "A complete build writes the pack and the constants file"
)]
fn scenario_complete_build(world: BuildWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/pack_build.feature",
    name = "A failed fetch keeps the other outputs but skips the constants file"
)]
fn scenario_failed_fetch(world: BuildWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/pack_build.feature",
    name = "A core engine without an export fails only the module pipeline"
)]
fn scenario_core_without_export(world: BuildWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/pack_build.feature",
    name = "Strict exports reject modules without an export"
)]
fn scenario_strict_exports(world: BuildWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/pack_build.feature",
    name = "Rebuilding keeps every style in the constants file"
)]
fn scenario_rebuild(world: BuildWorld) {
    let _ = world;
}
