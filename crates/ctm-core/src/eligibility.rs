//! Structured eligibility and condition overlap for a single trial.

use std::collections::HashSet;

use ctm_model::{EligibilityRule, EligibleSex, parse_age};

/// Check a patient's age and sex against a trial's structured criteria.
///
/// Age bounds that are absent, unparseable or zero do not constrain.
pub fn meets_structured_criteria(age_years: u32, sex: &str, rule: &EligibilityRule) -> bool {
    if let Some(minimum) = age_bound(rule.minimum_age.as_deref())
        && age_years < minimum
    {
        return false;
    }
    if let Some(maximum) = age_bound(rule.maximum_age.as_deref())
        && age_years > maximum
    {
        return false;
    }
    sex_admits(rule.sex, sex)
}

/// Trial conditions that also appear in the patient's list, compared
/// case-insensitively. Keeps the trial's order and casing.
pub fn intersect_conditions(patient_conditions: &[String], trial_conditions: &[String]) -> Vec<String> {
    let patient: HashSet<String> = patient_conditions
        .iter()
        .map(|condition| condition.to_lowercase())
        .collect();
    trial_conditions
        .iter()
        .filter(|condition| patient.contains(&condition.to_lowercase()))
        .cloned()
        .collect()
}

// A parsed bound of 0 is indistinguishable from "no bound" in registry data.
fn age_bound(text: Option<&str>) -> Option<u32> {
    text.and_then(parse_age).filter(|years| *years > 0)
}

fn sex_admits(rule: EligibleSex, patient_sex: &str) -> bool {
    let patient_sex = patient_sex.to_uppercase();
    match rule {
        EligibleSex::All => true,
        EligibleSex::Female => matches!(patient_sex.as_str(), "FEMALE" | "F"),
        EligibleSex::Male => matches!(patient_sex.as_str(), "MALE" | "M"),
    }
}
