//! Vocabulary Matcher — finds which canonical terms of a vocabulary occur in a text.
//!
//! Matching runs in two passes:
//! 1. Exact: the term must occur as a literal phrase bounded by non-word characters
//!    or the string edges on both sides (`c` never matches inside `javascript`).
//! 2. Fuzzy (optional): every term not found exactly is scored against the whole
//!    normalized text through a `Similarity` backend and kept when the score
//!    reaches the threshold.
//!
//! Fuzzy matching only ever adds terms on top of the exact pass.

use std::collections::BTreeSet;
use std::sync::Arc;

use regex::Regex;
use serde::Serialize;

use crate::matching::normalize::normalize;
use crate::matching::similarity::{PartialRatio, Similarity};
use crate::matching::MatchError;

/// An ordered, de-duplicated list of canonical lowercase terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Vocabulary {
    terms: Vec<String>,
}

impl Vocabulary {
    /// Normalizes every term (lowercase, collapsed whitespace, trimmed) and drops
    /// later duplicates. Blank terms are a configuration error.
    pub fn new<I, S>(terms: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();

        for raw in terms {
            let term = normalize(raw.as_ref()).trim().to_string();
            if term.is_empty() {
                return Err(MatchError::InvalidConfiguration(
                    "vocabulary terms cannot be blank".to_string(),
                ));
            }
            if seen.insert(term.clone()) {
                out.push(term);
            }
        }

        Ok(Self { terms: out })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }
}

/// Fuzzy fallback settings for a matcher. `None` on the matcher means exact-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzySettings {
    /// Minimum similarity (0 – 100) for a fuzzy hit.
    pub threshold: u8,
    /// Terms shorter than this many chars skip the fuzzy pass. Only the term length is
    /// checked: a text shorter than a term is aligned inside the term, so a one-char
    /// text still fuzzy-matches every term containing that char.
    pub min_term_len: usize,
}

struct CompiledTerm {
    term: String,
    pattern: Regex,
}

/// Matches texts against one vocabulary in a fixed mode (exact, or exact + fuzzy).
///
/// Built once per configuration; holds no per-call state and is safe to share across threads.
pub struct VocabularyMatcher {
    terms: Vec<CompiledTerm>,
    fuzzy: Option<FuzzySettings>,
    similarity: Arc<dyn Similarity>,
}

impl std::fmt::Debug for VocabularyMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VocabularyMatcher")
            .field("terms", &self.terms.len())
            .field("fuzzy", &self.fuzzy)
            .finish()
    }
}

impl VocabularyMatcher {
    /// Exact word-boundary matching only.
    pub fn exact(vocabulary: &Vocabulary) -> Result<Self, MatchError> {
        Self::build(vocabulary, None, Arc::new(PartialRatio))
    }

    /// Exact matching with a `PartialRatio` fuzzy fallback.
    pub fn fuzzy(vocabulary: &Vocabulary, settings: FuzzySettings) -> Result<Self, MatchError> {
        Self::build(vocabulary, Some(settings), Arc::new(PartialRatio))
    }

    /// Full constructor: any `Similarity` backend may drive the fuzzy pass.
    pub fn build(
        vocabulary: &Vocabulary,
        fuzzy: Option<FuzzySettings>,
        similarity: Arc<dyn Similarity>,
    ) -> Result<Self, MatchError> {
        if let Some(settings) = fuzzy {
            if settings.threshold > 100 {
                return Err(MatchError::InvalidConfiguration(format!(
                    "fuzzy threshold must be within 0..=100, got {}",
                    settings.threshold
                )));
            }
        }

        let terms = vocabulary
            .terms()
            .iter()
            .map(|term| {
                let pattern = boundary_pattern(term)?;
                Ok(CompiledTerm {
                    term: term.clone(),
                    pattern,
                })
            })
            .collect::<Result<Vec<_>, MatchError>>()?;

        Ok(Self {
            terms,
            fuzzy,
            similarity,
        })
    }

    /// Returns every vocabulary term present in `text`.
    pub fn find(&self, text: &str) -> BTreeSet<String> {
        let text = normalize(text);

        let mut found: BTreeSet<String> = self
            .terms
            .iter()
            .filter(|t| t.pattern.is_match(&text))
            .map(|t| t.term.clone())
            .collect();

        if let Some(settings) = self.fuzzy {
            for t in &self.terms {
                if found.contains(&t.term) || t.term.chars().count() < settings.min_term_len {
                    continue;
                }
                if self.similarity.similarity(&t.term, &text) >= settings.threshold {
                    found.insert(t.term.clone());
                }
            }
        }

        found
    }
}

/// `(?:^|\W)<term>(?:\W|$)` with the term escaped literally.
fn boundary_pattern(term: &str) -> Result<Regex, MatchError> {
    let pattern = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(term));
    Regex::new(&pattern).map_err(|e| {
        MatchError::InvalidConfiguration(format!("cannot compile pattern for '{term}': {e}"))
    })
}
