//! End-to-end runs of the matching pipeline over a stub registry.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use ctm_cli::pipeline::{RunConfig, run_matching};
use ctm_core::{MatchConfig, RunOptions};
use ctm_ingest::IngestOptions;
use ctm_model::{EligibilityRule, EligibleSex, TrialRecord};
use ctm_registry::{QuerySpec, RegistryError, Result, TrialSource};
use ctm_report::{CSV_FILE_NAME, JSON_FILE_NAME, OutputFormat};

struct FixedTrials {
    trials: Vec<TrialRecord>,
    fail_for: Option<&'static str>,
}

impl TrialSource for FixedTrials {
    fn fetch_trials(&self, query: &QuerySpec) -> Result<Vec<TrialRecord>> {
        if self.fail_for == Some(query.condition.as_str()) {
            return Err(RegistryError::Network("connection reset".to_string()));
        }
        Ok(self.trials.clone())
    }
}

fn trials() -> Vec<TrialRecord> {
    vec![TrialRecord {
        id: "NCT1".to_string(),
        title: "T1".to_string(),
        conditions: vec!["Diabetes".to_string(), "Obesity".to_string()],
        eligibility: EligibilityRule {
            minimum_age: Some("18 Years".to_string()),
            maximum_age: Some("70 Years".to_string()),
            sex: EligibleSex::Female,
        },
    }]
}

fn write_inputs(dir: &Path) {
    fs::write(
        dir.join("patients.csv"),
        "Id,BIRTHDATE,FIRST,LAST,GENDER,CITY,STATE\n\
         P1,1979-05-20,Ann,Lee,F,Boston,MA\n\
         P2,1960-01-01,Bob,Ray,M,Austin,TX\n\
         P3,2000-01-01,Cy,Poe,F,Reno,NV\n",
    )
    .expect("write patients");
    fs::write(
        dir.join("conditions.csv"),
        "PATIENT,DESCRIPTION\n\
         P1,Diabetes\n\
         P1,Asthma\n\
         P2,Diabetes\n\
         P3,Asthma\n",
    )
    .expect("write conditions");
}

fn config(data_dir: &Path, output_dir: PathBuf) -> RunConfig {
    RunConfig {
        data_dir: data_dir.to_path_buf(),
        output_dir,
        formats: vec![OutputFormat::Csv, OutputFormat::Json],
        dry_run: false,
        ingest: IngestOptions::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
        matching: MatchConfig::default(),
        run: RunOptions::default(),
    }
}

#[test]
fn run_writes_both_reports() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let output_dir = dir.path().join("out");
    let source = FixedTrials {
        trials: trials(),
        fail_for: None,
    };

    let mut loaded = 0;
    let mut visited = Vec::new();
    let result = run_matching(
        &config(dir.path(), output_dir.clone()),
        source,
        |count| loaded = count,
        |patient| visited.push(patient.id.to_string()),
    )
    .unwrap();

    assert_eq!(loaded, 3);
    assert_eq!(visited, vec!["P1", "P2", "P3"]);
    assert!(!result.has_errors);
    assert_eq!(result.total_matches(), 1);
    assert_eq!(result.patients[0].match_count, Some(1));
    assert_eq!(result.patients[1].match_count, Some(0));

    let csv = fs::read_to_string(output_dir.join(CSV_FILE_NAME)).unwrap();
    assert_eq!(
        csv,
        "patientId,trialId,trialName,eligibilityCriteriaMet\nP1,NCT1,T1,Diabetes\n"
    );

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output_dir.join(JSON_FILE_NAME)).unwrap())
            .unwrap();
    let patients = json.as_array().unwrap();
    assert_eq!(patients.len(), 3);
    assert_eq!(patients[0]["patientId"], "P1");
    assert_eq!(patients[0]["eligibleTrials"][0]["trialId"], "NCT1");
    assert_eq!(
        patients[0]["eligibleTrials"][0]["eligibilityCriteriaMet"],
        serde_json::json!(["Diabetes"])
    );
    assert_eq!(patients[2]["eligibleTrials"], serde_json::json!([]));
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let output_dir = dir.path().join("out");
    let mut config = config(dir.path(), output_dir.clone());
    config.dry_run = true;
    let source = FixedTrials {
        trials: trials(),
        fail_for: None,
    };

    let result = run_matching(&config, source, |_| {}, |_| {}).unwrap();

    assert_eq!(result.total_matches(), 1);
    assert!(result.reports.csv.is_none());
    assert!(!output_dir.exists());
}

#[test]
fn failed_patient_is_reported_and_omitted() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let output_dir = dir.path().join("out");
    let source = FixedTrials {
        trials: trials(),
        fail_for: Some("Asthma"),
    };

    let result = run_matching(&config(dir.path(), output_dir.clone()), source, |_| {}, |_| {})
        .unwrap();

    assert!(result.has_errors);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].patient_id.as_str(), "P3");
    assert_eq!(result.patients[2].match_count, None);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output_dir.join(JSON_FILE_NAME)).unwrap())
            .unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[test]
fn fail_fast_aborts_before_output() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let output_dir = dir.path().join("out");
    let mut config = config(dir.path(), output_dir.clone());
    config.run.fail_fast = true;
    let source = FixedTrials {
        trials: trials(),
        fail_for: Some("Asthma"),
    };

    let error = run_matching(&config, source, |_| {}, |_| {}).unwrap_err();

    assert!(format!("{error:#}").contains("P3"));
    assert!(!output_dir.exists());
}

#[test]
fn missing_patients_file_fails_run() {
    let dir = tempfile::tempdir().unwrap();
    let source = FixedTrials {
        trials: trials(),
        fail_for: None,
    };

    let error = run_matching(
        &config(dir.path(), dir.path().join("out")),
        source,
        |_| {},
        |_| {},
    )
    .unwrap_err();

    assert!(format!("{error:#}").contains("patients.csv"));
}
