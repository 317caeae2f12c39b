//! Tabular report: one row per patient/trial match.

use std::io::Write;

use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};

use ctm_model::PatientResult;

pub const CSV_HEADER: [&str; 4] = ["patientId", "trialId", "trialName", "eligibilityCriteriaMet"];

/// Separator between matched conditions in the last column.
pub const CONDITION_SEPARATOR: &str = "; ";

/// Write the match table. The header is written even when nothing matched.
pub fn write_csv_report<W: Write>(writer: W, results: &[PatientResult]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    writer.write_record(CSV_HEADER).context("write csv header")?;
    for result in results {
        for matched in &result.matches {
            writer
                .write_record([
                    result.patient_id.as_str(),
                    matched.trial_id.as_str(),
                    matched.trial_name.as_str(),
                    matched.matched_conditions.join(CONDITION_SEPARATOR).as_str(),
                ])
                .with_context(|| format!("write csv row for patient {}", result.patient_id))?;
        }
    }
    writer.flush().context("flush csv report")?;
    Ok(())
}
