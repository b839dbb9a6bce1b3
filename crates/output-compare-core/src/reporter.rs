//! Console reporter with cargo test-like formatting.

use crate::runner::{BatchSummary, CaseResult};
use crate::sink::DiagnosticSink;
use crate::types::Comparison;
use std::io::{self, Write};
use std::time::Duration;

const GREEN: &str = "32";
const RED: &str = "31";
const YELLOW: &str = "33";

/// Reporter configuration.
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    /// Show verbose output (strategy per case).
    pub verbose: bool,
    /// Use colors in output.
    pub color: bool,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            color: true,
        }
    }
}

/// Console reporter for comparison results.
#[derive(Debug, Clone)]
pub struct Reporter {
    config: ReporterConfig,
}

impl Reporter {
    /// Create a new reporter with the given configuration.
    #[must_use]
    pub const fn new(config: ReporterConfig) -> Self {
        Self { config }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.config.color {
            format!("\x1b[{color}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    /// Colored `ok` / `FAILED` label.
    #[must_use]
    pub fn status(&self, matched: bool) -> String {
        if matched {
            self.paint("ok", GREEN)
        } else {
            self.paint("FAILED", RED)
        }
    }

    /// Print the outcome of a single comparison.
    pub fn comparison(&self, comparison: &Comparison) {
        if comparison.matched {
            println!("{}", self.status(true));
        } else {
            println!("{}: {}", self.status(false), comparison.message);
        }
        if self.config.verbose {
            println!("     (decided by {} strategy)", comparison.strategy);
        }
    }

    /// Print the start of a batch run.
    pub fn batch_start(&self, case_count: usize) {
        println!();
        println!("running {case_count} cases");
    }

    /// Print a case result line.
    pub fn case_result(&self, result: &CaseResult) {
        let display_name = result.desc.as_deref().unwrap_or(&result.id);
        println!("case {display_name} ... {}", self.status(result.matched));

        if self.config.verbose {
            println!("     ({} strategy)", result.strategy);
        }
    }

    /// Print failures section.
    pub fn failures(&self, results: &[CaseResult]) {
        if results.iter().all(|r| r.matched) {
            return;
        }

        println!();
        println!("failures:");
        println!();

        for result in results.iter().filter(|r| !r.matched) {
            println!("---- {} ----", result.id);
            println!("    {}", result.message);
            println!();
        }
    }

    /// Print the final summary.
    pub fn summary(&self, summary: &BatchSummary, duration: Duration) {
        println!();
        println!(
            "test result: {}. {} passed; {} failed; finished in {:.1}s",
            self.status(summary.failed == 0),
            summary.passed,
            summary.failed,
            duration.as_secs_f64()
        );
    }

    /// Print a warning message.
    pub fn warn(&self, message: &str) {
        eprintln!("{}: {message}", self.paint("warning", YELLOW));
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        eprintln!("{}: {message}", self.paint("error", RED));
    }

    /// Flush stdout.
    pub fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

impl DiagnosticSink for Reporter {
    fn warn(&self, message: &str) {
        Self::warn(self, message);
    }
}
