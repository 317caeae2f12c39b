use serde::{Deserialize, Serialize};

use crate::{PatientId, TrialRecord};

/// A trial the patient is eligible for, with the conditions they share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub trial_id: String,
    pub trial_name: String,
    #[serde(rename = "eligibilityCriteriaMet")]
    pub matched_conditions: Vec<String>,
}

impl Match {
    /// Build a match for `trial`. Returns `None` when no condition overlaps,
    /// so every `Match` carries at least one matched condition.
    pub fn new(trial: &TrialRecord, matched_conditions: Vec<String>) -> Option<Self> {
        if matched_conditions.is_empty() {
            return None;
        }
        Some(Self {
            trial_id: trial.id.clone(),
            trial_name: trial.title.clone(),
            matched_conditions,
        })
    }
}

/// All matches for one patient, in registry response order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientResult {
    pub patient_id: PatientId,
    #[serde(rename = "eligibleTrials")]
    pub matches: Vec<Match>,
}

/// A patient whose registry retrieval failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientFailure {
    pub patient_id: PatientId,
    pub message: String,
}
