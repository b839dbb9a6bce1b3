//! Core library for output-compare.
//!
//! Decides whether a program's output matches an expected answer despite
//! superficial differences:
//! - Trimmed string equality
//! - JSON structural equality (key order, spacing, `1` vs `1.0`)
//! - Line-by-line comparison with arbitrary-precision decimals and float tolerance
//!
//! Plus configuration loading, batch case files, and report generation.

pub mod cases;
pub mod comparator;
pub mod config;
pub mod decimal;
pub mod lines;
pub mod report;
pub mod reporter;
pub mod runner;
pub mod sink;
pub mod structural;
pub mod tolerance;
pub mod truncate;
pub mod types;
pub mod value;

pub use cases::{Case, CaseError, CaseFile, load_cases, validate_cases};
pub use comparator::{Comparator, compare};
pub use config::{CompareConfig, ConfigError, ConfigOverrides, apply_overrides, load_config};
pub use decimal::{DecimalValue, parse_decimal_line};
pub use lines::{stripped_lines, trim_output};
pub use report::{ReportFormat, format_comparison_json, format_comparison_text, format_report_json};
pub use reporter::{Reporter, ReporterConfig};
pub use runner::{BatchReport, BatchSummary, CaseResult, run_cases, run_cases_with_progress};
pub use sink::{DiagnosticSink, TracingSink};
pub use structural::{StructuralOutcome, compare_structural};
pub use tolerance::{AllClose, Tolerance};
pub use truncate::{DEFAULT_TRUNCATE_LENGTH, truncate_output};
pub use types::*;
pub use value::StructuredValue;
