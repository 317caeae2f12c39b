use std::path::PathBuf;

use ctm_model::{PatientFailure, PatientId};
use ctm_report::ReportPaths;

#[derive(Debug)]
pub struct MatchRunResult {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub patients: Vec<PatientSummary>,
    pub failures: Vec<PatientFailure>,
    pub reports: ReportPaths,
    pub has_errors: bool,
}

impl MatchRunResult {
    pub fn total_matches(&self) -> usize {
        self.patients.iter().filter_map(|p| p.match_count).sum()
    }
}

#[derive(Debug)]
pub struct PatientSummary {
    pub patient_id: PatientId,
    pub age: u32,
    pub sex: String,
    pub condition_count: usize,
    /// `None` when retrieval failed for this patient.
    pub match_count: Option<usize>,
}
