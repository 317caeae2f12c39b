//! Paginated retrieval from the registry's study search endpoint.

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::{debug, info_span};

use ctm_model::TrialRecord;

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::query::QuerySpec;
use crate::types::{StudyPage, parse_page};

/// User agent string for registry requests.
const USER_AGENT_VALUE: &str = concat!("clinical-trial-matcher/", env!("CARGO_PKG_VERSION"));

/// Longest response body kept in a status error.
const ERROR_BODY_LIMIT: usize = 512;

/// Fetches a single page of search results.
pub trait PageFetcher {
    fn fetch_page(&self, query: &QuerySpec, page_token: Option<&str>) -> Result<StudyPage>;
}

/// Produces the complete trial list for a query.
pub trait TrialSource {
    fn fetch_trials(&self, query: &QuerySpec) -> Result<Vec<TrialRecord>>;
}

/// Follow page tokens until the registry stops returning one, accumulating
/// every study. Any failed page fails the whole fetch.
pub fn collect_pages<F>(fetcher: &F, query: &QuerySpec, max_pages: usize) -> Result<Vec<TrialRecord>>
where
    F: PageFetcher + ?Sized,
{
    let mut trials = Vec::new();
    let mut page_token: Option<String> = None;
    for page_number in 1..=max_pages {
        let page = fetcher.fetch_page(query, page_token.as_deref())?;
        let next = page.next_token().map(str::to_string);
        debug!(
            page = page_number,
            studies = page.studies.len(),
            total_count = page.total_count,
            has_next = next.is_some(),
            "registry page fetched"
        );
        trials.extend(page.studies.into_iter().map(TrialRecord::from));
        match next {
            Some(token) => page_token = Some(token),
            None => return Ok(trials),
        }
    }
    Err(RegistryError::PageLimitExceeded { max_pages })
}

/// Blocking HTTP client for the registry.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: Client,
    config: RegistryConfig,
}

impl RegistryClient {
    /// Create a client with the configured timeout.
    pub fn new(config: RegistryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RegistryError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Full request URL for one page.
    pub fn page_url(&self, query: &QuerySpec, page_token: Option<&str>) -> Result<Url> {
        Url::parse_with_params(
            &self.config.base_url,
            query.params(self.config.page_size, page_token),
        )
        .map_err(|e| RegistryError::InvalidUrl(format!("{}: {e}", self.config.base_url)))
    }
}

impl PageFetcher for RegistryClient {
    fn fetch_page(&self, query: &QuerySpec, page_token: Option<&str>) -> Result<StudyPage> {
        let url = self.page_url(query, page_token)?;
        debug!(has_token = page_token.is_some(), "requesting registry page");

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().unwrap_or_default();
            truncate_at_char_boundary(&mut body, ERROR_BODY_LIMIT);
            return Err(RegistryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text()?;
        parse_page(&body)
    }
}

impl TrialSource for RegistryClient {
    fn fetch_trials(&self, query: &QuerySpec) -> Result<Vec<TrialRecord>> {
        let span = info_span!("fetch", status_filter = %query.status_filter);
        let _guard = span.enter();
        collect_pages(self, query, self.config.max_pages)
    }
}

fn truncate_at_char_boundary(text: &mut String, limit: usize) {
    if text.len() <= limit {
        return;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}
