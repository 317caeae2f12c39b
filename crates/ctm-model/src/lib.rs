//! Data model for matching patients against registered clinical trials.

pub mod age;
pub mod error;
pub mod ids;
pub mod matching;
pub mod patient;
pub mod phi;
pub mod trial;

pub use age::{age_years, format_age_query, parse_age};
pub use error::{ModelError, Result};
pub use ids::PatientId;
pub use matching::{Match, PatientFailure, PatientResult};
pub use patient::{Demographics, Patient};
pub use trial::{EligibilityRule, EligibleSex, TrialRecord};

#[cfg(test)]
mod tests {
    use super::*;

    fn trial() -> TrialRecord {
        TrialRecord {
            id: "NCT1".to_string(),
            title: "T1".to_string(),
            conditions: vec!["Diabetes".to_string()],
            eligibility: EligibilityRule::default(),
        }
    }

    #[test]
    fn match_requires_overlap() {
        assert!(Match::new(&trial(), vec![]).is_none());
        let matched = Match::new(&trial(), vec!["Diabetes".to_string()]).expect("match");
        assert_eq!(matched.trial_id, "NCT1");
        assert_eq!(matched.trial_name, "T1");
    }

    #[test]
    fn patient_id_rejects_blank() {
        assert!(PatientId::new("  ").is_err());
        assert_eq!(PatientId::new(" P1 ").unwrap().as_str(), "P1");
    }

    #[test]
    fn eligible_sex_defaults_to_all() {
        assert_eq!(EligibleSex::from_registry(Some("FEMALE")), EligibleSex::Female);
        assert_eq!(EligibleSex::from_registry(Some("MALE")), EligibleSex::Male);
        assert_eq!(EligibleSex::from_registry(Some("female")), EligibleSex::All);
        assert_eq!(EligibleSex::from_registry(None), EligibleSex::All);
    }

    #[test]
    fn result_serializes_with_report_field_names() {
        let result = PatientResult {
            patient_id: PatientId::new("P1").unwrap(),
            matches: vec![Match::new(&trial(), vec!["Diabetes".to_string()]).unwrap()],
        };
        let value = serde_json::to_value(&result).expect("serialize result");
        assert_eq!(
            value,
            serde_json::json!({
                "patientId": "P1",
                "eligibleTrials": [{
                    "trialId": "NCT1",
                    "trialName": "T1",
                    "eligibilityCriteriaMet": ["Diabetes"]
                }]
            })
        );
    }
}
