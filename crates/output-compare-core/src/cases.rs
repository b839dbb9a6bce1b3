//! Case file loader for batch comparison.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a case file.
#[derive(Error, Debug)]
pub enum CaseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yml::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("case file not found: {0}")]
    NotFound(String),
    #[error("case #{0} has an empty id")]
    EmptyId(usize),
    #[error("duplicate case id: {0}")]
    DuplicateId(String),
}

/// One prediction/expected pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Case {
    pub id: String,
    /// Human-readable description.
    #[serde(default)]
    pub desc: Option<String>,
    pub prediction: String,
    pub expected: String,
}

/// A set of cases loaded from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseFile {
    #[serde(default)]
    pub cases: Vec<Case>,
}

/// Load cases from a YAML or JSON file. Files ending in `.json` are parsed
/// as JSON, everything else as YAML.
///
/// # Errors
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - Parsing fails (including unknown fields)
/// - A case id is empty or repeated
pub fn load_cases(path: &Path) -> Result<CaseFile, CaseError> {
    if !path.exists() {
        return Err(CaseError::NotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let file: CaseFile = if is_json {
        serde_json::from_str(&content)?
    } else {
        serde_yml::from_str(&content)?
    };

    validate_cases(&file.cases)?;
    Ok(file)
}

/// Check that every case id is non-empty and unique.
///
/// # Errors
/// Returns `CaseError::EmptyId` or `CaseError::DuplicateId`.
pub fn validate_cases(cases: &[Case]) -> Result<(), CaseError> {
    let mut seen_ids: HashSet<&str> = HashSet::new();
    for (index, case) in cases.iter().enumerate() {
        if case.id.trim().is_empty() {
            return Err(CaseError::EmptyId(index));
        }
        if !seen_ids.insert(case.id.as_str()) {
            return Err(CaseError::DuplicateId(case.id.clone()));
        }
    }
    Ok(())
}
