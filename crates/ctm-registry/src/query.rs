//! Registry search query construction.
//!
//! Conditions are sent as `query.cond`; age eligibility is pushed to the
//! registry as an advanced range filter so only trials whose bounds admit the
//! patient come back.

use ctm_model::format_age_query;

/// Study fields requested from the registry.
pub const STUDY_FIELDS: [&str; 4] = [
    "NCTId",
    "BriefTitle",
    "protocolSection.eligibilityModule",
    "protocolSection.conditionsModule",
];

/// A built registry search, independent of paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    /// Escaped condition search term.
    pub condition: String,
    /// Comma-joined overall status filter.
    pub status_filter: String,
    /// Advanced filter constraining trial age bounds around the patient age.
    pub advanced_filter: String,
}

impl QuerySpec {
    /// Query parameters for one page request.
    pub fn params(&self, page_size: u32, page_token: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", "json".to_string()),
            ("query.cond", self.condition.clone()),
            ("filter.overallStatus", self.status_filter.clone()),
            ("filter.advanced", self.advanced_filter.clone()),
            ("fields", STUDY_FIELDS.join(",")),
            ("pageSize", page_size.to_string()),
            ("countTotal", "true".to_string()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }
        params
    }
}

/// Build the search for one condition and patient age.
pub fn build_query(condition: &str, patient_age: u32, statuses: &[String]) -> QuerySpec {
    let age = format_age_query(patient_age);
    QuerySpec {
        condition: quote_for_search(condition),
        status_filter: statuses.join(","),
        advanced_filter: format!(
            "AREA[MinimumAge]RANGE[MIN, {age}] AND AREA[MaximumAge]RANGE[{age}, MAX]"
        ),
    }
}

/// Quote a search term containing whitespace or brackets so the registry
/// tokenizer keeps it as one phrase. Embedded double quotes are
/// backslash-escaped; other terms pass through unchanged.
pub fn quote_for_search(text: &str) -> String {
    let needs_quoting = text
        .chars()
        .any(|ch| ch.is_whitespace() || matches!(ch, '(' | ')' | '{' | '}' | '[' | ']'));
    if !needs_quoting {
        return text.to_string();
    }
    format!("\"{}\"", text.replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn statuses() -> Vec<String> {
        vec!["RECRUITING".to_string(), "ENROLLING_BY_INVITATION".to_string()]
    }

    #[test]
    fn single_word_terms_pass_through() {
        assert_eq!(quote_for_search("diabetes"), "diabetes");
        assert_eq!(quote_for_search(""), "");
        assert_eq!(quote_for_search("say\"what"), "say\"what");
    }

    #[test]
    fn multi_word_terms_are_quoted() {
        assert_eq!(quote_for_search("type 2 diabetes"), "\"type 2 diabetes\"");
        assert_eq!(quote_for_search("tab\tseparated"), "\"tab\tseparated\"");
    }

    #[test]
    fn bracketed_terms_are_quoted() {
        assert_eq!(
            quote_for_search("Hypertension(disorder)"),
            "\"Hypertension(disorder)\""
        );
        assert_eq!(quote_for_search("a[b]"), "\"a[b]\"");
        assert_eq!(quote_for_search("{x}"), "\"{x}\"");
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        assert_eq!(quote_for_search("foo \"bar\""), "\"foo \\\"bar\\\"\"");
    }

    #[test]
    fn builds_age_range_filter() {
        let query = build_query("Diabetes", 45, &statuses());
        assert_eq!(query.condition, "Diabetes");
        assert_eq!(query.status_filter, "RECRUITING,ENROLLING_BY_INVITATION");
        assert_eq!(
            query.advanced_filter,
            "AREA[MinimumAge]RANGE[MIN, 45 Years] AND AREA[MaximumAge]RANGE[45 Years, MAX]"
        );
    }

    #[test]
    fn params_carry_page_token_only_when_present() {
        let query = build_query("Prediabetes (finding)", 30, &statuses());
        let first = query.params(20, None);
        assert_eq!(first.len(), 7);
        assert!(first.contains(&("query.cond", "\"Prediabetes (finding)\"".to_string())));
        assert!(first.contains(&("pageSize", "20".to_string())));
        assert!(first.contains(&("countTotal", "true".to_string())));
        assert!(first.contains(&(
            "fields",
            "NCTId,BriefTitle,protocolSection.eligibilityModule,protocolSection.conditionsModule"
                .to_string()
        )));

        let next = query.params(20, Some("T2"));
        assert_eq!(next.last(), Some(&("pageToken", "T2".to_string())));
    }

    proptest! {
        #[test]
        fn quoted_terms_are_wrapped(text in "[a-z]{1,8} [a-z\"]{0,8}") {
            let quoted = quote_for_search(&text);
            prop_assert!(quoted.starts_with('"') && quoted.ends_with('"'));
            prop_assert_eq!(quoted[1..quoted.len() - 1].replace("\\\"", "\""), text);
        }

        #[test]
        fn plain_terms_are_unchanged(text in "[A-Za-z0-9,.'-]{0,16}") {
            prop_assert_eq!(quote_for_search(&text), text);
        }
    }
}
