use serde::{Deserialize, Serialize};

/// Sex restriction published with a trial's structured criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EligibleSex {
    #[default]
    All,
    Male,
    Female,
}

impl EligibleSex {
    /// Map the registry's sex field. Only exact `MALE`/`FEMALE` restrict;
    /// anything else, including a missing value, admits all.
    pub fn from_registry(value: Option<&str>) -> Self {
        match value {
            Some("MALE") => Self::Male,
            Some("FEMALE") => Self::Female,
            _ => Self::All,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }
}

/// Structured eligibility criteria of one trial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityRule {
    pub minimum_age: Option<String>,
    pub maximum_age: Option<String>,
    pub sex: EligibleSex,
}

/// A trial as returned by the registry, reduced to the fields matching needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub id: String,
    pub title: String,
    pub conditions: Vec<String>,
    pub eligibility: EligibilityRule,
}
