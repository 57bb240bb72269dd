//! Ranking of score records for display.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::matching::scorer::ScoreRecord;

/// Score records sorted by `match_percent` descending; equal scores keep input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedResultSet(Vec<ScoreRecord>);

// Accessors for callers embedding the engine; the HTTP layer only serializes the set.
#[allow(dead_code)]
impl RankedResultSet {
    pub fn records(&self) -> &[ScoreRecord] {
        &self.0
    }

    pub fn into_records(self) -> Vec<ScoreRecord> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Stable sort by `match_percent` descending.
///
/// `sort_by` is a stable merge sort, so ties stay in first-seen order and
/// ranking an already ranked set is a no-op.
pub fn rank(mut records: Vec<ScoreRecord>) -> RankedResultSet {
    records.sort_by(|a, b| {
        b.match_percent
            .partial_cmp(&a.match_percent)
            .unwrap_or(Ordering::Equal)
    });
    RankedResultSet(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn record(name: &str, pct: f64) -> ScoreRecord {
        ScoreRecord {
            resume: name.to_string(),
            match_percent: pct,
            matched_skills: BTreeSet::new(),
            skill_gaps: BTreeSet::new(),
            experience: vec![],
            degrees: BTreeSet::new(),
        }
    }

    fn names(set: &RankedResultSet) -> Vec<&str> {
        set.records().iter().map(|r| r.resume.as_str()).collect()
    }

    #[test]
    fn test_sorted_descending() {
        let ranked = rank(vec![
            record("low", 10.0),
            record("high", 90.0),
            record("mid", 50.0),
        ]);
        assert_eq!(names(&ranked), vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank(vec![
            record("first", 50.0),
            record("top", 75.0),
            record("second", 50.0),
            record("third", 50.0),
        ]);
        assert_eq!(names(&ranked), vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let once = rank(vec![
            record("a", 0.0),
            record("b", 33.33),
            record("c", 33.33),
            record("d", 100.0),
        ]);
        let twice = rank(once.clone().into_records());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank(vec![]).is_empty());
    }
}
