//! Loading of the patient population for trial matching.
//!
//! Reads a folder holding `patients.csv` and `conditions.csv` and produces
//! validated [`ctm_model::Patient`] records. Missing required columns abort
//! the load with [`IngestError::MissingColumns`].

pub mod age;
pub mod csv_table;
pub mod error;
pub mod patients;

pub use age::compute_age;
pub use csv_table::{CsvRow, CsvTable, read_csv_table};
pub use error::{IngestError, Result};
pub use patients::{
    CONDITION_COLUMNS, CONDITIONS_FILE, IngestOptions, PATIENT_COLUMNS, PATIENTS_FILE,
    build_patients, load_patients,
};
