//! # polyloc
//!
//! Count lines of code per language across a directory tree.
//!
//! ## Usage
//!
//! ```bash
//! # Count the current directory
//! polyloc
//!
//! # Count another tree, skipping vendored code
//! polyloc ../service --exclude "vendor/**"
//!
//! # Include files that .gitignore would hide
//! polyloc . --no-ignore
//!
//! # Output as JSON
//! polyloc . --output json
//!
//! # Show pipeline logs (RUST_LOG overrides)
//! polyloc . -v
//! ```

mod render;

use std::process::ExitCode;

use anyhow::anyhow;
use clap::{Arg, ArgAction, ArgMatches, Command};
use polyloclib::{count_directory, CountOptions, FilterConfig, LOCTable};
use render::OutputMode;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Output formats accepted by `--output`
const OUTPUT_FORMATS: [&str; 2] = ["table", "json"];

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("polyloc")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Count lines of code per language, concurrently")
        .arg(
            Arg::new("path")
                .help("Path to analyze (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern (relative to the path)"),
        )
        .arg(
            Arg::new("no-ignore")
                .long("no-ignore")
                .action(ArgAction::SetTrue)
                .help("Do not read .gitignore at the root"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(OUTPUT_FORMATS)
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log pipeline progress to stderr"),
        )
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

/// Translate parsed arguments into count options.
fn count_options(matches: &ArgMatches) -> anyhow::Result<CountOptions> {
    let mut filter = FilterConfig::new();
    if let Some(patterns) = matches.get_many::<String>("exclude") {
        for pattern in patterns {
            filter = filter.exclude(pattern)?;
        }
    }

    let mut options = CountOptions::new().filter(filter);
    if matches.get_flag("no-ignore") {
        options = options.no_ignore();
    }
    Ok(options)
}

/// Run a count and return what should go to stdout.
fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or(".");
    let options = count_options(matches)?;
    debug!(path, capacities = ?options.capacities, "starting count");

    let result = count_directory(path, options)?;
    let table = LOCTable::from_count(&result);

    render::render_count(&table, output_mode(matches))
        .map_err(|e| anyhow!("failed to render output: {}", e))
}

/// Map `--output` onto outstanding's output modes.
fn output_mode(matches: &ArgMatches) -> OutputMode {
    matches
        .get_one::<String>("output")
        .map(|s| match s.as_str() {
            "json" => OutputMode::Json,
            _ => OutputMode::Auto,
        })
        .unwrap_or(OutputMode::Auto)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
