use std::path::PathBuf;

use thiserror::Error;

use ctm_model::ModelError;

/// Errors raised while loading the patient dataset.
///
/// Every variant is fatal to the run; matching never starts on a dataset
/// that failed to load.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("required file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("{file} is missing columns: {missing:?} (found columns: {found:?})")]
    MissingColumns {
        file: String,
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("read csv {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{file} line {line}: {source}")]
    InvalidRow {
        file: String,
        line: u64,
        #[source]
        source: ModelError,
    },

    #[error("{file} line {line}: patient id {patient_id} already appears on line {first_line}")]
    DuplicatePatientId {
        file: String,
        line: u64,
        first_line: u64,
        patient_id: String,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
