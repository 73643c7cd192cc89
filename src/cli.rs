//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared options.
//! Individual command definitions are in the `commands` module.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::commands::Command;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Root of the target project; `.autocrud.json` is read from here
    #[arg(long, default_value = ".", global = true)]
    pub root: PathBuf,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Log filter used when `RUST_LOG` is unset or cannot be parsed.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Build the log filter from `RUST_LOG`-style directives.
///
/// The directives replace the default entirely, so `RUST_LOG=debug` turns
/// debug output on.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tracing_subscriber::filter::LevelFilter;

    // =========================================================================
    // Log filter
    // =========================================================================

    #[rstest]
    #[case(None, LevelFilter::WARN)]
    #[case(Some("debug"), LevelFilter::DEBUG)]
    #[case(Some("autocrud=trace"), LevelFilter::TRACE)]
    #[case(Some("error"), LevelFilter::ERROR)]
    fn test_log_filter_level(#[case] directives: Option<&str>, #[case] expected: LevelFilter) {
        assert_eq!(log_filter(directives).max_level_hint(), Some(expected));
    }

    #[rstest]
    fn test_global_defaults() {
        let args = Args::try_parse_from(["autocrud", "inspect"]).unwrap();
        assert_eq!(args.root, PathBuf::from("."));
        assert_eq!(args.format, OutputFormat::Table);
    }

    #[rstest]
    #[case(&["autocrud", "--root", "/srv/shop", "make", "Product"])]
    #[case(&["autocrud", "make", "Product", "--root", "/srv/shop"])]
    fn test_root_is_global(#[case] argv: &[&str]) {
        let args = Args::try_parse_from(argv.to_vec()).unwrap();
        assert_eq!(args.root, PathBuf::from("/srv/shop"));
    }

    #[rstest]
    #[case("table", OutputFormat::Table)]
    #[case("json", OutputFormat::Json)]
    #[case("toon", OutputFormat::Toon)]
    fn test_format_values(#[case] value: &str, #[case] expected: OutputFormat) {
        let args = Args::try_parse_from(["autocrud", "-o", value, "inspect"]).unwrap();
        assert_eq!(args.format, expected);
    }

    #[rstest]
    fn test_invalid_format_rejected() {
        assert!(Args::try_parse_from(["autocrud", "-o", "yaml", "inspect"]).is_err());
    }
}
