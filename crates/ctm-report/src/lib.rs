//! Match report generation.
//!
//! Two artifacts are produced from the per-patient result list:
//!
//! - **CSV**: one row per match with the matched conditions joined by `"; "`
//! - **JSON**: the result list itself, one entry per patient

mod common;
mod csv_report;
mod json_report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use ctm_model::PatientResult;

pub use common::write_atomically;
pub use csv_report::{CONDITION_SEPARATOR, CSV_HEADER, write_csv_report};
pub use json_report::write_json_report;

pub const CSV_FILE_NAME: &str = "patient_trial_matches.csv";
pub const JSON_FILE_NAME: &str = "patient_trial_matches.json";

/// Report artifact kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

/// Paths of the artifacts a run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportPaths {
    pub csv: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

/// Write the requested artifacts into `output_dir`, creating it if needed.
pub fn write_reports(
    output_dir: &Path,
    results: &[PatientResult],
    formats: &[OutputFormat],
) -> Result<ReportPaths> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let mut paths = ReportPaths::default();
    for format in formats {
        match format {
            OutputFormat::Csv => {
                let path = output_dir.join(CSV_FILE_NAME);
                write_atomically(&path, |writer| write_csv_report(writer, results))?;
                info!(path = %path.display(), "csv report written");
                paths.csv = Some(path);
            }
            OutputFormat::Json => {
                let path = output_dir.join(JSON_FILE_NAME);
                write_atomically(&path, |writer| write_json_report(writer, results))?;
                info!(path = %path.display(), "json report written");
                paths.json = Some(path);
            }
        }
    }
    Ok(paths)
}
