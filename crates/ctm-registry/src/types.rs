//! Registry response types.
//!
//! Every field is optional on the wire; missing modules degrade to empty
//! values rather than failing the page.

use serde::Deserialize;

use ctm_model::{EligibilityRule, EligibleSex, TrialRecord};

/// One page of a study search.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPage {
    #[serde(default)]
    pub studies: Vec<Study>,
    pub next_page_token: Option<String>,
    pub total_count: Option<u64>,
}

impl StudyPage {
    /// The token for the following page; empty tokens count as absent.
    pub fn next_token(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Study {
    #[serde(default)]
    pub protocol_section: ProtocolSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolSection {
    pub identification_module: Option<IdentificationModule>,
    pub eligibility_module: Option<EligibilityModule>,
    pub conditions_module: Option<ConditionsModule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationModule {
    pub nct_id: Option<String>,
    pub brief_title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityModule {
    pub minimum_age: Option<String>,
    pub maximum_age: Option<String>,
    pub sex: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConditionsModule {
    pub conditions: Option<Vec<String>>,
}

impl From<Study> for TrialRecord {
    fn from(study: Study) -> Self {
        let ProtocolSection {
            identification_module,
            eligibility_module,
            conditions_module,
        } = study.protocol_section;
        let identification = identification_module.unwrap_or_default();
        let eligibility = eligibility_module.unwrap_or_default();
        Self {
            id: identification.nct_id.unwrap_or_default(),
            title: identification.brief_title.unwrap_or_default(),
            conditions: conditions_module
                .and_then(|module| module.conditions)
                .unwrap_or_default(),
            eligibility: EligibilityRule {
                sex: EligibleSex::from_registry(eligibility.sex.as_deref()),
                minimum_age: eligibility.minimum_age,
                maximum_age: eligibility.maximum_age,
            },
        }
    }
}

/// Parse a page body, mapping malformed JSON to a retrieval error.
pub fn parse_page(body: &str) -> crate::Result<StudyPage> {
    Ok(serde_json::from_str(body)?)
}
