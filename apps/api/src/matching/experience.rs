//! Experience phrase extraction ("5 years", "10+ yrs").
//!
//! Only the simple form is recognised: a 1–2 digit number, an optional `+`, optional
//! whitespace and one of `years`, `yrs`, `year`. Ranges ("3-5 years") yield only their
//! trailing number and spelled-out numbers are ignored.

use regex::Regex;

use crate::matching::MatchError;

const EXPERIENCE_PATTERN: &str = r"\d{1,2}\+?\s*(?:years|yrs|year)";

#[derive(Debug, Clone)]
pub struct ExperienceExtractor {
    pattern: Regex,
}

impl ExperienceExtractor {
    pub fn new() -> Result<Self, MatchError> {
        let pattern = Regex::new(EXPERIENCE_PATTERN).map_err(|e| {
            MatchError::InvalidConfiguration(format!("experience pattern failed to compile: {e}"))
        })?;
        Ok(Self { pattern })
    }

    /// Returns every experience phrase in `text`, left to right, duplicates preserved.
    ///
    /// Only case is normalized; the matched phrases keep their original spacing.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.pattern
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_experience(text: &str) -> Vec<String> {
        ExperienceExtractor::new().unwrap().extract(text)
    }

    #[test]
    fn test_simple_phrases() {
        assert_eq!(
            extract_experience("5 Years Python, 2yrs AWS and 1 year of SQL"),
            vec!["5 years", "2yrs", "1 year"]
        );
    }

    #[test]
    fn test_plus_suffix_is_kept() {
        assert_eq!(extract_experience("10+ years leading teams"), vec!["10+ years"]);
    }

    #[test]
    fn test_duplicates_preserved_in_order() {
        assert_eq!(
            extract_experience("5 years at A. 3 years at B. 5 years at C."),
            vec!["5 years", "3 years", "5 years"]
        );
    }

    #[test]
    fn test_original_spacing_is_not_collapsed() {
        assert_eq!(extract_experience("7   YEARS"), vec!["7   years"]);
    }

    #[test]
    fn test_ranges_and_words_are_a_known_limitation() {
        assert_eq!(extract_experience("3-5 years"), vec!["5 years"]);
        assert!(extract_experience("five years of experience").is_empty());
    }

    #[test]
    fn test_three_digit_numbers_keep_last_two_digits() {
        assert_eq!(extract_experience("100 years"), vec!["00 years"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_experience("").is_empty());
    }
}
