//! CLI argument definitions for the pack generator.
//!
//! Kept apart from the entrypoint so tests can parse arguments directly.

use camino::Utf8PathBuf;
use clap::Parser;

/// Generate the highlight.js pack script and its Swift constants.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "highlight-pack")]
#[command(version, about)]
#[command(long_about = concat!(
    "Generate the highlight.js pack script and its Swift constants.\n\n",
    "Grammar modules are rewritten to register themselves with one shared ",
    "engine instance and concatenated after the core engine in registration ",
    "order. Style sheets are minified in place. Language names are fetched ",
    "from the highlight.js download page. The constants file is written only ",
    "when all three steps succeed.",
))]
#[command(after_help = concat!(
    "CONFIGURATION:\n",
    "  Paths and names are read from highlight-pack.toml in the project root\n",
    "  when present. Relative paths are resolved against the project root.\n\n",
    "EXAMPLES:\n",
    "  Generate everything from the current directory:\n",
    "    $ highlight-pack\n\n",
    "  Preview the resolved configuration:\n",
    "    $ highlight-pack --dry-run\n\n",
    "  Use another project root and configuration file:\n",
    "    $ highlight-pack -C ../app -c ci/highlight-pack.toml",
))]
pub struct Cli {
    /// Project root [default: current directory].
    #[arg(short = 'C', long, value_name = "DIR")]
    pub root: Option<Utf8PathBuf>,

    /// Configuration file [default: <root>/highlight-pack.toml].
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Show the resolved configuration and exit without generating.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log output (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only report errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_parse_from_bare_invocation() {
        let cli = Cli::try_parse_from(["highlight-pack"]).expect("bare invocation parses");

        assert!(cli.root.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.dry_run);
        assert_eq!(cli.verbosity, 0);
        assert!(!cli.quiet);
    }

    #[rstest]
    #[case::single(&["highlight-pack", "-v"], 1)]
    #[case::double(&["highlight-pack", "-vv"], 2)]
    #[case::long(&["highlight-pack", "--verbose", "--verbose"], 2)]
    fn verbosity_counts_repeats(#[case] args: &[&str], #[case] expected: u8) {
        let cli = Cli::try_parse_from(args).expect("arguments parse");
        assert_eq!(cli.verbosity, expected);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["highlight-pack", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn root_and_config_accept_paths() {
        let cli = Cli::try_parse_from([
            "highlight-pack",
            "-C",
            "../app",
            "--config",
            "ci/highlight-pack.toml",
            "--dry-run",
        ])
        .expect("arguments parse");

        assert_eq!(cli.root.as_deref(), Some(camino::Utf8Path::new("../app")));
        assert_eq!(
            cli.config.as_deref(),
            Some(camino::Utf8Path::new("ci/highlight-pack.toml"))
        );
        assert!(cli.dry_run);
    }
}
