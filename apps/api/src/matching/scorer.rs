//! Resume Scorer — turns one resume's extracted attributes into a `ScoreRecord`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::matching::experience::ExperienceExtractor;
use crate::matching::vocabulary::VocabularyMatcher;
use crate::matching::MatchError;

/// Attributes extracted from one text. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub skills: BTreeSet<String>,
    /// Literal phrases, left to right, duplicates kept.
    pub experience: Vec<String>,
    pub degrees: BTreeSet<String>,
}

/// The job description's required skills. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequiredSkills(BTreeSet<String>);

impl RequiredSkills {
    pub fn new(skills: BTreeSet<String>) -> Result<Self, MatchError> {
        if skills.is_empty() {
            return Err(MatchError::NoRequirementsDetected);
        }
        Ok(Self(skills))
    }

    pub fn as_set(&self) -> &BTreeSet<String> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Per-resume result.
///
/// `matched_skills ∪ skill_gaps == required skills` and the two sets are disjoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub resume: String,
    /// 0.0 – 100.0, rounded to 2 decimals.
    pub match_percent: f64,
    pub matched_skills: BTreeSet<String>,
    pub skill_gaps: BTreeSet<String>,
    pub experience: Vec<String>,
    pub degrees: BTreeSet<String>,
}

/// The three extractors run over every text: skills (exact + optional fuzzy),
/// degrees (exact only) and experience phrases.
#[derive(Debug)]
pub struct Extractors {
    pub skills: VocabularyMatcher,
    pub degrees: VocabularyMatcher,
    pub experience: ExperienceExtractor,
}

impl Extractors {
    pub fn extract(&self, text: &str) -> ExtractionResult {
        ExtractionResult {
            skills: self.skills.find(text),
            experience: self.experience.extract(text),
            degrees: self.degrees.find(text),
        }
    }
}

/// Scores one resume against the required skills. Pure; safe to run on any thread.
pub fn score_resume(
    resume_id: &str,
    resume_text: &str,
    required: &RequiredSkills,
    extractors: &Extractors,
) -> ScoreRecord {
    let extraction = extractors.extract(resume_text);
    score_extraction(resume_id, extraction, required)
}

pub fn score_extraction(
    resume_id: &str,
    extraction: ExtractionResult,
    required: &RequiredSkills,
) -> ScoreRecord {
    let (matched_skills, skill_gaps): (BTreeSet<String>, BTreeSet<String>) = required
        .as_set()
        .iter()
        .cloned()
        .partition(|skill| extraction.skills.contains(skill));

    ScoreRecord {
        resume: resume_id.to_string(),
        match_percent: match_percent(matched_skills.len(), required.len()),
        matched_skills,
        skill_gaps,
        experience: extraction.experience,
        degrees: extraction.degrees,
    }
}

/// `100 * matched / required`, rounded to 2 decimals. `required` is never 0 here.
fn match_percent(matched: usize, required: usize) -> f64 {
    let pct = 100.0 * matched as f64 / required as f64;
    ((pct * 100.0).round() / 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::vocabulary::{FuzzySettings, Vocabulary};

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn required(items: &[&str]) -> RequiredSkills {
        RequiredSkills::new(set(items)).unwrap()
    }

    fn extractors() -> Extractors {
        let skills = Vocabulary::new(["python", "sql", "aws", "java", "react"]).unwrap();
        let degrees = Vocabulary::new(["mba", "phd", "b.sc"]).unwrap();
        Extractors {
            skills: VocabularyMatcher::fuzzy(
                &skills,
                FuzzySettings {
                    threshold: 85,
                    min_term_len: 2,
                },
            )
            .unwrap(),
            degrees: VocabularyMatcher::exact(&degrees).unwrap(),
            experience: ExperienceExtractor::new().unwrap(),
        }
    }

    #[test]
    fn test_full_match_scenario() {
        let record = score_resume(
            "a.pdf",
            "Proficient in Python and SQL, 3 years experience, MBA",
            &required(&["python", "sql"]),
            &extractors(),
        );

        assert_eq!(record.resume, "a.pdf");
        assert_eq!(record.matched_skills, set(&["python", "sql"]));
        assert!(record.skill_gaps.is_empty());
        assert_eq!(record.match_percent, 100.0);
        assert_eq!(record.experience, vec!["3 years"]);
        assert_eq!(record.degrees, set(&["mba"]));
    }

    #[test]
    fn test_no_match_scenario() {
        let record = score_resume(
            "b.pdf",
            "Java developer",
            &required(&["python", "aws"]),
            &extractors(),
        );

        assert!(record.matched_skills.is_empty());
        assert_eq!(record.skill_gaps, set(&["python", "aws"]));
        assert_eq!(record.match_percent, 0.0);
    }

    #[test]
    fn test_matched_and_gaps_partition_required() {
        let req = required(&["python", "sql", "aws"]);
        let record = score_resume("c.pdf", "Python on AWS", &req, &extractors());

        let union: BTreeSet<String> = record
            .matched_skills
            .union(&record.skill_gaps)
            .cloned()
            .collect();
        assert_eq!(&union, req.as_set());
        assert!(record.matched_skills.is_disjoint(&record.skill_gaps));
    }

    #[test]
    fn test_percent_rounds_to_two_decimals() {
        let record = score_resume(
            "d.pdf",
            "Python only",
            &required(&["python", "sql", "aws"]),
            &extractors(),
        );
        assert_eq!(record.match_percent, 33.33);
    }

    #[test]
    fn test_empty_resume_scores_zero_but_is_not_an_error() {
        let record = score_resume("empty.pdf", "", &required(&["python"]), &extractors());
        assert_eq!(record.match_percent, 0.0);
        assert!(record.experience.is_empty());
        assert!(record.degrees.is_empty());
        assert_eq!(record.skill_gaps, set(&["python"]));
    }

    #[test]
    fn test_resume_skills_outside_requirements_are_ignored() {
        let record = score_resume(
            "e.pdf",
            "React, Java, Python",
            &required(&["python"]),
            &extractors(),
        );
        assert_eq!(record.matched_skills, set(&["python"]));
        assert_eq!(record.match_percent, 100.0);
    }

    #[test]
    fn test_required_skills_cannot_be_empty() {
        let err = RequiredSkills::new(BTreeSet::new()).unwrap_err();
        assert!(matches!(err, MatchError::NoRequirementsDetected));
    }

    #[test]
    fn test_match_percent_values() {
        assert_eq!(match_percent(1, 2), 50.0);
        assert_eq!(match_percent(2, 3), 66.67);
        assert_eq!(match_percent(0, 7), 0.0);
        assert_eq!(match_percent(7, 7), 100.0);
    }
}
