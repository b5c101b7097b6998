//! `highlight-pack` CLI entrypoint.
//!
//! Loads the project configuration, installs the stderr subscriber, and runs the
//! module, style and language pipelines on a single-threaded runtime. The
//! process exits non-zero when the constants file was not written.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use highlight_pack::PackConfig;
use highlight_pack_builder::cli::Cli;
use highlight_pack_builder::compress::CssCompressor;
use highlight_pack_builder::error::{PackError, Result};
use highlight_pack_builder::languages::HttpFetcher;
use highlight_pack_builder::logging::{init, level_for};
use highlight_pack_builder::pipeline::{BuildContext, run_build};
use std::io::Write;
use std::sync::Arc;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    if let Err(error) = init(level_for(cli.verbosity, cli.quiet)) {
        write_stderr_line(&mut stderr, format!("logging unavailable: {error}"));
    }
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let root = project_root(cli)?;
    let config = load_config(cli, &root)?.resolve(&root);

    if cli.dry_run {
        print_dry_run_info(&config, stderr);
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| PackError::Task(e.to_string()))?;

    let compressor = CssCompressor;
    let context = BuildContext {
        config: &config,
        fetcher: Arc::new(HttpFetcher),
        compressor: &compressor,
    };
    let report = runtime.block_on(run_build(&context));
    report.constants.map(|_| ())
}

/// Resolves the project root from the CLI or the current directory.
fn project_root(cli: &Cli) -> Result<Utf8PathBuf> {
    if let Some(root) = &cli.root {
        return Ok(root.clone());
    }
    let cwd = std::env::current_dir().map_err(|source| PackError::Read {
        path: Utf8PathBuf::from("."),
        source,
    })?;
    Utf8PathBuf::try_from(cwd).map_err(|e| PackError::Read {
        path: Utf8PathBuf::from("."),
        source: e.into_io_error(),
    })
}

/// Loads the explicit configuration file, or the one in `root`.
fn load_config(cli: &Cli, root: &Utf8Path) -> Result<PackConfig> {
    let config = match &cli.config {
        Some(path) => PackConfig::load_from(path)?,
        None => PackConfig::load(root)?,
    };
    Ok(config)
}

/// Prints the resolved configuration.
fn print_dry_run_info(config: &PackConfig, stderr: &mut dyn Write) {
    write_stderr_line(stderr, "Dry run - no files will be modified");
    write_stderr_line(stderr, "");
    write_stderr_line(stderr, format!("Styles directory: {}", config.styles_dir));
    write_stderr_line(
        stderr,
        format!("Languages directory: {}", config.languages_dir),
    );
    write_stderr_line(stderr, format!("Core engine: {}", config.core_path));
    write_stderr_line(stderr, format!("Order manifest: {}", config.index_path));
    write_stderr_line(stderr, format!("Pack output: {}", config.pack_path));
    write_stderr_line(
        stderr,
        format!("Constants output: {}", config.constants_path),
    );
    write_stderr_line(stderr, format!("Module name: {}", config.module_name));
    write_stderr_line(stderr, format!("Catalog URL: {}", config.catalog_url));
    write_stderr_line(stderr, format!("Instance name: {}", config.instance_name));
    write_stderr_line(
        stderr,
        format!("Strict exports: {}", config.strict_exports),
    );

    if !config.style_names.is_empty() {
        write_stderr_line(stderr, "");
        write_stderr_line(stderr, "Style name overrides:");
        for (stem, display) in &config.style_names {
            write_stderr_line(stderr, format!("  - {stem}: {display}"));
        }
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
