//! Clinical trial registry access.
//!
//! Builds search queries from a patient condition and age, then retrieves
//! every page of matching studies from the registry's study search API.
//!
//! Retrieval sits behind two seams:
//!
//! - [`PageFetcher`] fetches one page; [`collect_pages`] drives the token loop
//!   over any fetcher, bounded by a page limit.
//! - [`TrialSource`] yields the complete trial list for a query and is what the
//!   matching engine consumes.
//!
//! [`RegistryClient`] implements both over blocking HTTP.

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod types;

pub use client::{PageFetcher, RegistryClient, TrialSource, collect_pages};
pub use config::{
    DEFAULT_BASE_URL, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT, RegistryConfig,
};
pub use error::{RegistryError, Result};
pub use query::{QuerySpec, STUDY_FIELDS, build_query, quote_for_search};
pub use types::{StudyPage, parse_page};
