//! Matching over a whole population, one patient at a time.

use tracing::{info_span, warn};

use ctm_model::{Patient, PatientFailure, PatientResult};
use ctm_registry::TrialSource;

use crate::config::RunOptions;
use crate::engine::MatchEngine;
use crate::error::{MatchError, Result};

/// Results of a population run.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// One entry per successfully matched patient, in input order.
    pub results: Vec<PatientResult>,
    /// Patients whose retrieval failed, in input order.
    pub failures: Vec<PatientFailure>,
}

impl RunOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn match_count(&self) -> usize {
        self.results.iter().map(|result| result.matches.len()).sum()
    }
}

/// Match every patient in order.
///
/// A retrieval failure is recorded and the run continues, unless
/// `options.fail_fast` is set, in which case it aborts the run.
/// `on_patient` is called after each patient, successful or not.
pub fn match_population<S, F>(
    engine: &MatchEngine<S>,
    patients: &[Patient],
    options: RunOptions,
    mut on_patient: F,
) -> Result<RunOutcome>
where
    S: TrialSource,
    F: FnMut(&Patient),
{
    let mut outcome = RunOutcome::default();
    for patient in patients {
        let span = info_span!("patient", patient_id = %patient.id);
        let matched = span.in_scope(|| engine.match_patient(patient));
        on_patient(patient);
        match matched {
            Ok(matches) => outcome.results.push(PatientResult {
                patient_id: patient.id.clone(),
                matches,
            }),
            Err(source) if options.fail_fast => {
                return Err(MatchError::Retrieval {
                    patient_id: patient.id.clone(),
                    source,
                });
            }
            Err(error) => {
                warn!(patient_id = %patient.id, %error, "registry retrieval failed");
                outcome.failures.push(PatientFailure {
                    patient_id: patient.id.clone(),
                    message: error.to_string(),
                });
            }
        }
    }
    Ok(outcome)
}
