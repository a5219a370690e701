use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use space_guard::checker::{IgnorePatternCatalog, Validator};
use space_guard::cli::{CheckArgs, Cli, Commands};
use space_guard::config::Settings;
use space_guard::output::{
    CheckOutcome, ColorMode, ErrorOutput, FileFailure, JsonFormatter, OutputFormat,
    OutputFormatter, TextFormatter,
};
use space_guard::scanner::{DirectoryScanner, FileScanner, GlobFilter};
use space_guard::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_VIOLATIONS_FOUND};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Patterns => run_patterns(),
    };

    std::process::exit(exit_code);
}

/// Logs go to stderr: `warn` by default, `-v` for info, `-vv` for debug.
/// `RUST_LOG` takes precedence.
fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            ErrorOutput::new(cli.color.into()).print(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_check_impl(args: &CheckArgs, cli: &Cli) -> space_guard::Result<i32> {
    // 1. Engine options from the command line
    let options = args.settings()?;

    // 2. Expand directories into files
    let files = collect_files(args)?;
    tracing::info!("Checking {} file(s)", files.len());

    // 3. Validate (parallel with rayon, one engine per worker)
    let catalog = IgnorePatternCatalog::builtin();
    let outcome = validate_files(&files, &options, &catalog);

    // 4. Format and write output
    let color_mode = ColorMode::from(cli.color);
    let output = format_output(args.format, &outcome, color_mode, cli.verbose)?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    // 5. Input errors go to stderr unless already part of the JSON output
    if args.format == OutputFormat::Text {
        let errors = ErrorOutput::new(color_mode);
        for failure in &outcome.failures {
            errors.print(&failure.error);
        }
    }

    // 6. Determine exit code
    if !outcome.failures.is_empty() {
        return Ok(EXIT_CONFIG_ERROR);
    }
    if outcome.has_violations(args.strict) {
        return Ok(EXIT_VIOLATIONS_FOUND);
    }
    Ok(EXIT_SUCCESS)
}

fn collect_files(args: &CheckArgs) -> space_guard::Result<Vec<PathBuf>> {
    let extensions = args.ext.clone().unwrap_or_default();
    let filter = GlobFilter::new(extensions, &args.exclude)?;
    DirectoryScanner::new(filter).collect(&args.paths)
}

fn validate_files(
    files: &[PathBuf],
    options: &Settings,
    catalog: &IgnorePatternCatalog,
) -> CheckOutcome {
    let mut outcome = files
        .par_iter()
        .fold(
            || (Validator::new(options.clone(), catalog), Vec::new()),
            |(mut validator, mut failures), path| {
                if let Err(error) = validator.validate(path) {
                    tracing::debug!("{}: {error}", path.display());
                    failures.push(FileFailure {
                        path: path.clone(),
                        error,
                    });
                }
                (validator, failures)
            },
        )
        .map(|(validator, failures)| CheckOutcome {
            report: validator.into_report(),
            failures,
            files_checked: 0,
        })
        .reduce(CheckOutcome::default, |mut left, right| {
            left.report.merge(right.report);
            left.failures.extend(right.failures);
            left
        });

    outcome.report.sort_by_path();
    outcome.failures.sort_by(|a, b| a.path.cmp(&b.path));
    outcome.files_checked = files.len();
    outcome
}

fn format_output(
    format: OutputFormat,
    outcome: &CheckOutcome,
    color_mode: ColorMode,
    verbose: u8,
) -> space_guard::Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::new(color_mode)
            .with_payloads(verbose >= 1)
            .format(outcome),
        OutputFormat::Json => JsonFormatter.format(outcome),
    }
}

fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> space_guard::Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

fn run_patterns() -> i32 {
    let catalog = IgnorePatternCatalog::builtin();
    for (id, pattern) in catalog.iter() {
        println!("{id:<22} {}", pattern.as_str());
    }
    EXIT_SUCCESS
}
