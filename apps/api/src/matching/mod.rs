// Matching core: normalization, vocabulary and experience extraction, scoring, ranking.
// Everything below `handlers` is pure and synchronous; no I/O happens in this module tree.

pub mod config;
pub mod engine;
pub mod experience;
pub mod handlers;
pub mod normalize;
pub mod ranking;
pub mod scorer;
pub mod similarity;
pub mod vocabulary;

use thiserror::Error;

pub use config::MatcherConfig;
pub use engine::{MatchEngine, MatchOutcome, ResumeInput};

#[derive(Debug, Error)]
pub enum MatchError {
    /// The job description yielded an empty required-skill set.
    #[error("No skills detected in job description")]
    NoRequirementsDetected,

    #[error("Invalid matcher configuration: {0}")]
    InvalidConfiguration(String),
}
