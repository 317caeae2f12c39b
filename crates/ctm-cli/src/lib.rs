//! CLI library components for the clinical trial matcher.

pub mod logging;
pub mod pipeline;
pub mod types;
