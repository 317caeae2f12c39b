//! Matching run with explicit stages.
//!
//! 1. **Ingest**: load patients and conditions from the data folder
//! 2. **Match**: query the registry and filter trials, one patient at a time
//! 3. **Output**: write the CSV and JSON reports once, after every patient
//!
//! A fatal error in any stage returns before the output stage, so no
//! artifacts are written for an aborted run.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use ctm_core::{MatchConfig, MatchEngine, RunOptions, match_population};
use ctm_ingest::{IngestOptions, load_patients};
use ctm_model::Patient;
use ctm_registry::TrialSource;
use ctm_report::{OutputFormat, ReportPaths, write_reports};

use crate::types::{MatchRunResult, PatientSummary};

/// Everything a run needs besides the trial source.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub formats: Vec<OutputFormat>,
    pub dry_run: bool,
    pub ingest: IngestOptions,
    pub matching: MatchConfig,
    pub run: RunOptions,
}

/// Run ingest, match and output against `source`.
///
/// `on_loaded` receives the patient count once ingestion finishes and
/// `on_patient` is called after each patient; both drive progress display.
pub fn run_matching<S, L, F>(
    config: &RunConfig,
    source: S,
    on_loaded: L,
    on_patient: F,
) -> Result<MatchRunResult>
where
    S: TrialSource,
    L: FnOnce(usize),
    F: FnMut(&Patient),
{
    let run_span = info_span!("run", data_dir = %config.data_dir.display());
    let _run_guard = run_span.enter();

    // Stage 1: ingest
    let ingest_start = Instant::now();
    let patients = info_span!("ingest")
        .in_scope(|| load_patients(&config.data_dir, &config.ingest))
        .context("load patient data")?;
    info!(
        patient_count = patients.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );
    on_loaded(patients.len());

    // Stage 2: match
    let match_start = Instant::now();
    let engine = MatchEngine::new(source, config.matching.clone());
    let outcome = match_population(&engine, &patients, config.run, on_patient)
        .context("match patients")?;
    info!(
        matched_patients = outcome.results.len(),
        failed_patients = outcome.failures.len(),
        total_matches = outcome.match_count(),
        duration_ms = match_start.elapsed().as_millis(),
        "matching complete"
    );

    // Stage 3: output
    let reports = if config.dry_run {
        info!("dry run, skipping report output");
        ReportPaths::default()
    } else {
        write_reports(&config.output_dir, &outcome.results, &config.formats)
            .context("write reports")?
    };

    let match_counts: BTreeMap<&str, usize> = outcome
        .results
        .iter()
        .map(|result| (result.patient_id.as_str(), result.matches.len()))
        .collect();
    let summaries = patients
        .iter()
        .map(|patient| PatientSummary {
            patient_id: patient.id.clone(),
            age: patient.age,
            sex: patient.sex.clone(),
            condition_count: patient.conditions.len(),
            match_count: match_counts.get(patient.id.as_str()).copied(),
        })
        .collect();

    Ok(MatchRunResult {
        data_dir: config.data_dir.clone(),
        output_dir: config.output_dir.clone(),
        patients: summaries,
        has_errors: outcome.has_failures(),
        failures: outcome.failures,
        reports,
    })
}
