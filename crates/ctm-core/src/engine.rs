//! Per-patient matching: query, retrieve, filter.

use tracing::{debug, info};

use ctm_model::phi::redact_value;
use ctm_model::{Match, Patient, TrialRecord};
use ctm_registry::{RegistryError, TrialSource, build_query};

use crate::config::MatchConfig;
use crate::eligibility::{intersect_conditions, meets_structured_criteria};

/// Matches one patient at a time against trials from a [`TrialSource`].
pub struct MatchEngine<S> {
    source: S,
    config: MatchConfig,
}

impl<S: TrialSource> MatchEngine<S> {
    pub fn new(source: S, config: MatchConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Trials the patient is eligible for, in registry response order.
    ///
    /// A patient without an anchor condition yields no matches and issues no
    /// registry request.
    pub fn match_patient(&self, patient: &Patient) -> Result<Vec<Match>, RegistryError> {
        let Some(anchor) = patient.conditions.get(self.config.anchor_condition_index) else {
            debug!(patient_id = %patient.id, "no anchor condition, skipping registry query");
            return Ok(Vec::new());
        };
        debug!(
            patient_id = %patient.id,
            anchor = %redact_value(anchor),
            age = patient.age,
            "querying registry"
        );
        let query = build_query(anchor, patient.age, &self.config.statuses);
        let trials = self.source.fetch_trials(&query)?;
        let matches = filter_trials(patient, &trials);
        info!(
            patient_id = %patient.id,
            candidate_trials = trials.len(),
            matches = matches.len(),
            "patient matched"
        );
        Ok(matches)
    }
}

/// Keep trials whose structured criteria admit the patient and whose
/// conditions overlap the patient's full condition list.
pub fn filter_trials(patient: &Patient, trials: &[TrialRecord]) -> Vec<Match> {
    trials
        .iter()
        .filter(|trial| meets_structured_criteria(patient.age, &patient.sex, &trial.eligibility))
        .filter_map(|trial| {
            Match::new(trial, intersect_conditions(&patient.conditions, &trial.conditions))
        })
        .collect()
}
