use serde::{Deserialize, Serialize};

use crate::PatientId;

/// A patient as consumed by the matcher.
///
/// `conditions` keeps source order; the first entry anchors the registry
/// query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub age: u32,
    pub sex: String,
    pub conditions: Vec<String>,
    #[serde(default)]
    pub demographics: Demographics,
}

impl Patient {
    pub fn new(
        id: PatientId,
        age: u32,
        sex: impl Into<String>,
        conditions: Vec<String>,
    ) -> Self {
        Self {
            id,
            age,
            sex: sex.into(),
            conditions,
            demographics: Demographics::default(),
        }
    }

    #[must_use]
    pub fn with_demographics(mut self, demographics: Demographics) -> Self {
        self.demographics = demographics;
        self
    }
}

/// Descriptive fields carried through from ingestion; not used for matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}
