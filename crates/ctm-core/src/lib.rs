//! Eligibility matching engine.
//!
//! For each patient the engine searches the registry with the patient's
//! anchor condition and age, then keeps the trials whose structured age/sex
//! criteria admit the patient and whose conditions overlap the patient's.

pub mod batch;
pub mod config;
pub mod eligibility;
pub mod engine;
pub mod error;

pub use batch::{RunOutcome, match_population};
pub use config::{DEFAULT_STATUSES, MatchConfig, RunOptions};
pub use eligibility::{intersect_conditions, meets_structured_criteria};
pub use engine::{MatchEngine, filter_trials};
pub use error::{MatchError, Result};
