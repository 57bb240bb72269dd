//! Matcher configuration: vocabularies and fuzzy-matching knobs.
//!
//! Vocabularies are plain configuration values handed to `MatchEngine::new`;
//! nothing here is process-global.

use serde::Serialize;

use crate::matching::vocabulary::{FuzzySettings, Vocabulary};
use crate::matching::MatchError;

pub const DEFAULT_FUZZY_THRESHOLD: u8 = 85;
pub const DEFAULT_FUZZY_MIN_TERM_LEN: usize = 2;

pub const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "machine learning",
    "deep learning",
    "sql",
    "aws",
    "numpy",
    "javascript",
    "c++",
    "c",
    "html",
    "css",
    "nlp",
    "react",
    "java",
    "excel",
    "pandas",
    "tensorflow",
    "web scraping",
    "google colab",
];

pub const DEFAULT_DEGREES: &[&str] = &[
    "bachelor",
    "b.tech",
    "m.tech",
    "msc",
    "mba",
    "bsc",
    "phd",
    "doctorate",
    "master",
    "master's",
    "bachelor's",
    "int. msc",
    "b.sc",
    "m.sc",
];

#[derive(Debug, Clone, Serialize)]
pub struct MatcherConfig {
    pub skills: Vocabulary,
    pub degrees: Vocabulary,
    pub fuzzy_enabled: bool,
    /// 0 – 100. Stored wider than `u8` so out-of-range values can be reported, not truncated.
    pub fuzzy_threshold: u32,
    pub fuzzy_min_term_len: usize,
}

impl MatcherConfig {
    /// Built-in vocabularies with fuzzy matching on at the default threshold.
    pub fn with_defaults() -> Result<Self, MatchError> {
        Ok(Self {
            skills: Vocabulary::new(DEFAULT_SKILLS.iter().copied())?,
            degrees: Vocabulary::new(DEFAULT_DEGREES.iter().copied())?,
            fuzzy_enabled: true,
            fuzzy_threshold: u32::from(DEFAULT_FUZZY_THRESHOLD),
            fuzzy_min_term_len: DEFAULT_FUZZY_MIN_TERM_LEN,
        })
    }

    /// Rejects configurations that could never produce a meaningful score.
    ///
    /// An empty degree vocabulary is allowed (degrees are then never reported);
    /// an empty skill vocabulary is not, since no job description could yield requirements.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.fuzzy_threshold > 100 {
            return Err(MatchError::InvalidConfiguration(format!(
                "fuzzy threshold must be within 0..=100, got {}",
                self.fuzzy_threshold
            )));
        }
        if self.skills.is_empty() {
            return Err(MatchError::InvalidConfiguration(
                "skill vocabulary cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Fuzzy settings for the skill matcher, `None` when fuzzy matching is off.
    pub fn skill_fuzzy_settings(&self) -> Result<Option<FuzzySettings>, MatchError> {
        if !self.fuzzy_enabled {
            return Ok(None);
        }
        let threshold = u8::try_from(self.fuzzy_threshold)
            .ok()
            .filter(|t| *t <= 100)
            .ok_or_else(|| {
                MatchError::InvalidConfiguration(format!(
                    "fuzzy threshold must be within 0..=100, got {}",
                    self.fuzzy_threshold
                ))
            })?;
        Ok(Some(FuzzySettings {
            threshold,
            min_term_len: self.fuzzy_min_term_len,
        }))
    }
}
