//! Hierarchical report: the per-patient result list as JSON.

use std::io::Write;

use anyhow::{Context, Result};

use ctm_model::PatientResult;

/// Write the result list as a pretty-printed JSON array.
pub fn write_json_report<W: Write>(mut writer: W, results: &[PatientResult]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, results).context("serialize json report")?;
    writer.write_all(b"\n").context("write json report")?;
    Ok(())
}
