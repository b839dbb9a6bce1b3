//! output-compare CLI - Compare program output against expected answers.

use clap::{Args, Parser, Subcommand};
use comfy_table::{Cell, Color, Table};
use output_compare_core::{
    BatchReport, CaseError, Comparator, CompareConfig, ConfigError, ConfigOverrides, ReportFormat,
    Reporter, ReporterConfig, apply_overrides, format_comparison_json, format_report_json,
    load_cases, load_config, run_cases_with_progress,
};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use time::OffsetDateTime;
use time::macros::format_description;

/// Exit codes for the CLI.
mod exit_code {
    pub const SUCCESS: u8 = 0;
    pub const MISMATCH: u8 = 1;
    pub const CONFIG_ERROR: u8 = 2;
    pub const IO_ERROR: u8 = 3;
}

#[derive(Parser)]
#[command(name = "output-compare")]
#[command(about = "Compare program output against expected answers")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    options: CompareOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare one prediction file against one expected file
    Check {
        /// File holding the produced output ("-" reads stdin)
        #[arg(value_name = "PREDICTION")]
        prediction: PathBuf,

        /// File holding the expected output ("-" reads stdin)
        #[arg(value_name = "EXPECTED")]
        expected: PathBuf,
    },

    /// Compare every case listed in a YAML or JSON case file
    Batch {
        /// Case file (`cases: [{id, prediction, expected}]`)
        #[arg(value_name = "CASES")]
        cases: PathBuf,
    },
}

#[derive(Args)]
#[allow(clippy::struct_excessive_bools)]
struct CompareOptions {
    /// Comparator config file (YAML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Character budget for values shown in mismatch messages (overrides config)
    #[arg(long, global = true)]
    truncate_length: Option<usize>,

    /// Relative float tolerance (overrides config)
    #[arg(long, global = true)]
    rtol: Option<f64>,

    /// Absolute float tolerance (overrides config)
    #[arg(long, global = true)]
    atol: Option<f64>,

    /// Skip JSON structural comparison
    #[arg(long, global = true)]
    no_structural: bool,

    /// Require numeric lines to match exactly as decimals
    #[arg(long, global = true)]
    no_tolerance: bool,

    /// Output format: text, json
    #[arg(long, global = true, default_value = "text")]
    format: String,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl CompareOptions {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            truncate_length: self.truncate_length,
            structural: if self.no_structural { Some(false) } else { None },
            rtol: self.rtol,
            atol: self.atol,
            no_tolerance: self.no_tolerance,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.options.verbose);
    run_command(&cli)
}

/// Initialize the tracing subscriber on stderr.
///
/// `RUST_LOG` takes precedence over the verbosity flag.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("output_compare={default_level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
fn iso8601_now() -> String {
    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        ))
        .unwrap_or_else(|_| "unknown".to_string())
}

fn read_input(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
    }
}

fn config_exit_code(error: &ConfigError) -> u8 {
    match error {
        ConfigError::Io(_) => exit_code::IO_ERROR,
        _ => exit_code::CONFIG_ERROR,
    }
}

fn case_exit_code(error: &CaseError) -> u8 {
    match error {
        CaseError::Io(_) | CaseError::NotFound(_) => exit_code::IO_ERROR,
        _ => exit_code::CONFIG_ERROR,
    }
}

fn run_command(cli: &Cli) -> ExitCode {
    let options = &cli.options;
    let reporter = Reporter::new(ReporterConfig {
        verbose: options.verbose,
        color: !options.no_color,
    });

    let report_format: ReportFormat = match options.format.parse() {
        Ok(f) => f,
        Err(e) => {
            reporter.error(&format!("Invalid format: {e}"));
            return ExitCode::from(exit_code::CONFIG_ERROR);
        }
    };

    let config = match resolve_config(options) {
        Ok(config) => config,
        Err(e) => {
            reporter.error(&format!("Failed to load config: {e}"));
            return ExitCode::from(config_exit_code(&e));
        }
    };
    tracing::info!(?config, "resolved comparator config");
    let comparator = Comparator::from_config(&config);

    match &cli.command {
        Commands::Check {
            prediction,
            expected,
        } => run_check(&comparator, &reporter, report_format, prediction, expected),
        Commands::Batch { cases } => {
            run_batch(&comparator, &reporter, report_format, cases, options.verbose)
        }
    }
}

fn resolve_config(options: &CompareOptions) -> Result<CompareConfig, ConfigError> {
    let config = load_config(options.config.as_deref())?;
    let config = apply_overrides(config, &options.overrides());
    output_compare_core::config::validate_config(&config)?;
    Ok(config)
}

fn run_check(
    comparator: &Comparator,
    reporter: &Reporter,
    format: ReportFormat,
    prediction_path: &Path,
    expected_path: &Path,
) -> ExitCode {
    if prediction_path.as_os_str() == "-" && expected_path.as_os_str() == "-" {
        reporter.error("Only one of PREDICTION and EXPECTED can be read from stdin");
        return ExitCode::from(exit_code::CONFIG_ERROR);
    }

    let prediction = match read_input(prediction_path) {
        Ok(text) => text,
        Err(e) => {
            reporter.error(&format!(
                "Failed to read {}: {e}",
                prediction_path.display()
            ));
            return ExitCode::from(exit_code::IO_ERROR);
        }
    };
    let expected = match read_input(expected_path) {
        Ok(text) => text,
        Err(e) => {
            reporter.error(&format!("Failed to read {}: {e}", expected_path.display()));
            return ExitCode::from(exit_code::IO_ERROR);
        }
    };

    let comparison = comparator.compare(&prediction, &expected, Some(reporter));

    match format {
        ReportFormat::Json => println!("{}", format_comparison_json(&comparison)),
        ReportFormat::Text => reporter.comparison(&comparison),
    }

    if comparison.matched {
        ExitCode::from(exit_code::SUCCESS)
    } else {
        ExitCode::from(exit_code::MISMATCH)
    }
}

fn run_batch(
    comparator: &Comparator,
    reporter: &Reporter,
    format: ReportFormat,
    cases_path: &Path,
    verbose: bool,
) -> ExitCode {
    let case_file = match load_cases(cases_path) {
        Ok(file) => file,
        Err(e) => {
            reporter.error(&format!("Failed to load cases: {e}"));
            return ExitCode::from(case_exit_code(&e));
        }
    };

    if case_file.cases.is_empty() {
        reporter.warn(&format!("No cases found in {}", cases_path.display()));
        return ExitCode::from(exit_code::SUCCESS);
    }

    let show_progress = format == ReportFormat::Text;
    let start_time = Instant::now();

    if show_progress {
        reporter.batch_start(case_file.cases.len());
    }

    let report = run_cases_with_progress(comparator, &case_file.cases, Some(reporter), |result| {
        if show_progress {
            reporter.case_result(result);
            reporter.flush();
        }
    });

    let duration = start_time.elapsed();

    match format {
        ReportFormat::Json => {
            println!("{}", format_report_json(&report, &iso8601_now()));
        }
        ReportFormat::Text => {
            reporter.failures(&report.results);
            if verbose {
                print_results_table(&report);
            }
            reporter.summary(&report.summary, duration);
        }
    }

    if report.summary.failed == 0 {
        ExitCode::from(exit_code::SUCCESS)
    } else {
        ExitCode::from(exit_code::MISMATCH)
    }
}

fn print_results_table(report: &BatchReport) {
    let mut table = Table::new();
    table.set_header(vec!["Case", "Strategy", "Result"]);

    for result in &report.results {
        let result_cell = if result.matched {
            Cell::new("Match").fg(Color::Green)
        } else {
            Cell::new("Mismatch").fg(Color::Red)
        };

        table.add_row(vec![
            Cell::new(&result.id),
            Cell::new(result.strategy),
            result_cell,
        ]);
    }

    println!();
    println!("{table}");
}
