//! Assemble [`Patient`] records from `patients.csv` and `conditions.csv`.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use ctm_model::{Demographics, Patient, PatientId};

use crate::age::compute_age;
use crate::csv_table::{CsvTable, read_csv_table};
use crate::error::{IngestError, Result};

pub const PATIENTS_FILE: &str = "patients.csv";
pub const CONDITIONS_FILE: &str = "conditions.csv";

pub const PATIENT_COLUMNS: [&str; 7] = [
    "Id",
    "BIRTHDATE",
    "FIRST",
    "LAST",
    "GENDER",
    "CITY",
    "STATE",
];
pub const CONDITION_COLUMNS: [&str; 2] = ["PATIENT", "DESCRIPTION"];

#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Date ages are computed against.
    pub reference_date: NaiveDate,
}

impl IngestOptions {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            reference_date: chrono::Local::now().date_naive(),
        }
    }
}

/// Load every patient in `folder`.
///
/// `patients.csv` is required; a missing `conditions.csv` leaves every
/// patient without conditions.
pub fn load_patients(folder: &Path, options: &IngestOptions) -> Result<Vec<Patient>> {
    let patients_path = folder.join(PATIENTS_FILE);
    if !patients_path.is_file() {
        return Err(IngestError::MissingFile {
            path: patients_path,
        });
    }
    let patients = read_csv_table(&patients_path)?;

    let conditions_path = folder.join(CONDITIONS_FILE);
    let conditions = if conditions_path.is_file() {
        Some(read_csv_table(&conditions_path)?)
    } else {
        warn!(
            path = %conditions_path.display(),
            "conditions file not found, patients will have no conditions"
        );
        None
    };

    let built = build_patients(&patients, conditions.as_ref(), options)?;
    info!(
        patient_count = built.len(),
        with_conditions = built.iter().filter(|p| !p.conditions.is_empty()).count(),
        "patients loaded"
    );
    Ok(built)
}

/// Join patient rows with their grouped conditions, in `patients` row order.
pub fn build_patients(
    patients: &CsvTable,
    conditions: Option<&CsvTable>,
    options: &IngestOptions,
) -> Result<Vec<Patient>> {
    let columns = patients.require_columns(PATIENTS_FILE, &PATIENT_COLUMNS)?;
    let [id, birthdate, first, last, gender, city, state] = columns[..] else {
        unreachable!("require_columns returns one index per requested column");
    };

    let mut grouped = match conditions {
        Some(table) if !table.is_empty() => group_conditions(table)?,
        _ => BTreeMap::new(),
    };

    let mut out = Vec::with_capacity(patients.rows.len());
    let mut first_seen: HashMap<String, u64> = HashMap::new();
    for row in &patients.rows {
        let patient_id =
            PatientId::new(row.cell(id)).map_err(|source| IngestError::InvalidRow {
                file: PATIENTS_FILE.to_string(),
                line: row.line,
                source,
            })?;
        if let Some(&first_line) = first_seen.get(patient_id.as_str()) {
            return Err(IngestError::DuplicatePatientId {
                file: PATIENTS_FILE.to_string(),
                line: row.line,
                first_line,
                patient_id: patient_id.to_string(),
            });
        }
        first_seen.insert(patient_id.to_string(), row.line);
        let age = compute_age(row.cell(birthdate), options.reference_date);
        let patient_conditions = grouped.remove(patient_id.as_str()).unwrap_or_default();
        debug!(
            patient_id = %patient_id,
            age,
            condition_count = patient_conditions.len(),
            "patient assembled"
        );
        let demographics = Demographics {
            first_name: non_empty(row.cell(first)),
            last_name: non_empty(row.cell(last)),
            city: non_empty(row.cell(city)),
            state: non_empty(row.cell(state)),
        };
        out.push(
            Patient::new(patient_id, age, row.cell(gender), patient_conditions)
                .with_demographics(demographics),
        );
    }
    if !grouped.is_empty() {
        warn!(
            orphan_patients = grouped.len(),
            "conditions reference patients missing from patients file"
        );
    }
    Ok(out)
}

/// Group condition descriptions by patient id: blanks dropped, duplicates
/// removed keeping the first occurrence, file order otherwise preserved.
fn group_conditions(table: &CsvTable) -> Result<BTreeMap<String, Vec<String>>> {
    let columns = table.require_columns(CONDITIONS_FILE, &CONDITION_COLUMNS)?;
    let [patient, description] = columns[..] else {
        unreachable!("require_columns returns one index per requested column");
    };
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for row in &table.rows {
        let patient_id = row.cell(patient);
        let description = row.cell(description);
        if patient_id.is_empty() || description.is_empty() {
            continue;
        }
        let entry = grouped.entry(patient_id.to_string()).or_default();
        if !entry.iter().any(|existing| existing == description) {
            entry.push(description.to_string());
        }
    }
    Ok(grouped)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
