/// Overall statuses searched when none are configured.
pub const DEFAULT_STATUSES: [&str; 2] = ["RECRUITING", "ENROLLING_BY_INVITATION"];

/// Matching policy passed to [`crate::MatchEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Registry overall-status filter.
    pub statuses: Vec<String>,
    /// Which patient condition drives the registry query. Only this one is
    /// searched; overlap is still computed against every condition.
    pub anchor_condition_index: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            statuses: DEFAULT_STATUSES.iter().map(|s| (*s).to_string()).collect(),
            anchor_condition_index: 0,
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub fn with_statuses(mut self, statuses: Vec<String>) -> Self {
        self.statuses = statuses;
        self
    }

    #[must_use]
    pub fn with_anchor_condition_index(mut self, index: usize) -> Self {
        self.anchor_condition_index = index;
        self
    }
}

/// How a population run reacts to a failed patient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Abort on the first retrieval failure instead of recording it and
    /// moving on.
    pub fail_fast: bool,
}
