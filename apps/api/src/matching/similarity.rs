//! Similarity capability used by the fuzzy fallback of the vocabulary matcher.
//!
//! The matcher only depends on the `Similarity` trait; `PartialRatio` is the default backend.

use strsim::generic_levenshtein;

/// Scores how well `needle` is contained in `haystack`, on a 0 – 100 scale.
///
/// Implementations must return 0 when either input is empty.
pub trait Similarity: Send + Sync {
    fn similarity(&self, needle: &str, haystack: &str) -> u8;
}

/// Partial-ratio similarity: the shorter string is aligned against every equal-length
/// character window of the longer one and the best window score wins.
///
/// Window scores are normalized Levenshtein similarity, scaled to 0 – 100 and rounded.
/// Windows are compared as `char` slices through one reused buffer, so no per-window
/// string is built.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatio;

impl Similarity for PartialRatio {
    fn similarity(&self, needle: &str, haystack: &str) -> u8 {
        if needle.is_empty() || haystack.is_empty() {
            return 0;
        }

        let needle_chars: Vec<char> = needle.chars().collect();
        let haystack_chars: Vec<char> = haystack.chars().collect();
        let (shorter, longer) = if needle_chars.len() <= haystack_chars.len() {
            (needle_chars, haystack_chars)
        } else {
            (haystack_chars, needle_chars)
        };

        let window_len = shorter.len();
        let mut window_buf: Vec<char> = Vec::with_capacity(window_len);

        let mut best = 0.0_f64;
        for window in longer.windows(window_len) {
            window_buf.clear();
            window_buf.extend_from_slice(window);
            let distance = generic_levenshtein(&shorter, &window_buf);
            let score = 1.0 - distance as f64 / window_len as f64;
            if score > best {
                best = score;
                if best >= 1.0 {
                    break;
                }
            }
        }

        (best * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_substring_scores_100() {
        assert_eq!(PartialRatio.similarity("sql", "strong sql skills"), 100);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(PartialRatio.similarity("python", ""), 0);
        assert_eq!(PartialRatio.similarity("", "python"), 0);
    }

    #[test]
    fn test_ocr_substitution_scores_high() {
        // One substituted char out of ten.
        let score = PartialRatio.similarity("tensorflow", "used tensorfiow daily");
        assert!(score >= 85, "score was {score}");
    }

    #[test]
    fn test_unrelated_text_scores_low() {
        let score = PartialRatio.similarity("python", "java developer");
        assert!(score < 85, "score was {score}");
    }

    #[test]
    fn test_multibyte_windows_align_on_chars() {
        assert_eq!(PartialRatio.similarity("café", "le café crème"), 100);
        // One substitution in a 10-char term, surrounded by multi-byte text.
        assert_eq!(PartialRatio.similarity("tensorflow", "ééé tensorfiow ééé"), 90);
    }

    #[test]
    fn test_long_haystack_still_finds_the_best_window() {
        let mut text = "lorem ipsum dolor sit amet ".repeat(2_000);
        text.push_str("deep lerning");
        // Best window is " deep lerning": two edits over 13 chars.
        assert_eq!(PartialRatio.similarity("deep learning", &text), 85);
    }

    #[test]
    fn test_needle_longer_than_haystack_is_swapped() {
        assert_eq!(PartialRatio.similarity("machine learning", "learning"), 100);
    }
}
