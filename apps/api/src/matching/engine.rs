//! Wires configuration, extractors, the scoring pool and ranking together.
//!
//! # Flow
//! 1. Required skills are extracted from the job description. An empty set fails the
//!    whole request with `NoRequirementsDetected` before any resume is touched.
//! 2. Every resume is scored as an independent unit of work on a rayon pool.
//! 3. All units are joined (indexed collect keeps input order), then ranked.
//!
//! `run` is synchronous and CPU-bound; async callers wrap it in `spawn_blocking`.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::matching::config::MatcherConfig;
use crate::matching::experience::ExperienceExtractor;
use crate::matching::ranking::{rank, RankedResultSet};
use crate::matching::scorer::{score_resume, ExtractionResult, Extractors, RequiredSkills};
use crate::matching::vocabulary::VocabularyMatcher;
use crate::matching::MatchError;

/// One resume handed in by the caller, text already extracted from its source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeInput {
    pub name: String,
    pub text: String,
}

/// Successful result of one matching request.
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub required_skills: RequiredSkills,
    pub results: RankedResultSet,
}

pub struct MatchEngine {
    config: MatcherConfig,
    extractors: Extractors,
    pool: ThreadPool,
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("config", &self.config)
            .field("threads", &self.pool.current_num_threads())
            .finish()
    }
}

impl MatchEngine {
    /// Validates `config` and builds the matchers and the scoring pool.
    ///
    /// `threads = None` sizes the pool to the available cores.
    pub fn new(config: MatcherConfig, threads: Option<usize>) -> Result<Self, MatchError> {
        config.validate()?;

        let skills = match config.skill_fuzzy_settings()? {
            Some(settings) => VocabularyMatcher::fuzzy(&config.skills, settings)?,
            None => VocabularyMatcher::exact(&config.skills)?,
        };
        let degrees = VocabularyMatcher::exact(&config.degrees)?;
        let experience = ExperienceExtractor::new()?;

        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("scoring-{i}"));
        if let Some(n) = threads {
            if n == 0 {
                return Err(MatchError::InvalidConfiguration(
                    "scoring thread count must be at least 1".to_string(),
                ));
            }
            builder = builder.num_threads(n);
        }
        let pool = builder.build().map_err(|e| {
            MatchError::InvalidConfiguration(format!("failed to build scoring pool: {e}"))
        })?;

        Ok(Self {
            config,
            extractors: Extractors {
                skills,
                degrees,
                experience,
            },
            pool,
        })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Skills, experience phrases and degrees found in one text.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        self.extractors.extract(text)
    }

    /// The job description's skill set; fails when nothing from the vocabulary is present.
    pub fn required_skills(&self, jd_text: &str) -> Result<RequiredSkills, MatchError> {
        RequiredSkills::new(self.extractors.skills.find(jd_text))
    }

    /// Scores every resume against the job description and ranks the results.
    pub fn run(&self, jd_text: &str, resumes: &[ResumeInput]) -> Result<MatchOutcome, MatchError> {
        let run_id = Uuid::new_v4();

        let required = match self.required_skills(jd_text) {
            Ok(required) => required,
            Err(e) => {
                warn!(%run_id, "No skills detected in job description");
                return Err(e);
            }
        };

        let extractors = &self.extractors;
        let required_ref = &required;
        let records = self.pool.install(|| {
            resumes
                .par_iter()
                .map(|resume| {
                    let record = score_resume(&resume.name, &resume.text, required_ref, extractors);
                    debug!(
                        %run_id,
                        resume = %record.resume,
                        match_percent = record.match_percent,
                        "Scored resume"
                    );
                    record
                })
                .collect::<Vec<_>>()
        });

        let results = rank(records);

        info!(
            %run_id,
            resumes = results.len(),
            required_skills = required.len(),
            "Match run complete"
        );

        Ok(MatchOutcome {
            run_id,
            generated_at: Utc::now(),
            required_skills: required,
            results,
        })
    }
}
