use thiserror::Error;

use ctm_model::PatientId;
use ctm_registry::RegistryError;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("registry retrieval failed for patient {patient_id}: {source}")]
    Retrieval {
        patient_id: PatientId,
        #[source]
        source: RegistryError,
    },
}

pub type Result<T> = std::result::Result<T, MatchError>;
