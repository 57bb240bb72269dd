use anyhow::{bail, Context, Result};

use crate::matching::config::{
    DEFAULT_DEGREES, DEFAULT_FUZZY_MIN_TERM_LEN, DEFAULT_FUZZY_THRESHOLD, DEFAULT_SKILLS,
};
use crate::matching::vocabulary::Vocabulary;
use crate::matching::MatcherConfig;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;
const DEFAULT_MAX_JSON_BYTES: usize = 2 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub matcher: MatcherConfig,
    /// Scoring pool size. `None` = one thread per available core.
    pub scoring_threads: Option<usize>,
    /// Body limit for the multipart upload route.
    pub max_upload_bytes: usize,
    /// Body limit for JSON routes, which carry already-extracted text.
    pub max_json_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let skills = match lookup("SKILL_VOCABULARY") {
            Some(raw) => Vocabulary::new(split_list(&raw)),
            None => Vocabulary::new(DEFAULT_SKILLS.iter().copied()),
        }
        .context("SKILL_VOCABULARY is invalid")?;

        let degrees = match lookup("DEGREE_VOCABULARY") {
            Some(raw) => Vocabulary::new(split_list(&raw)),
            None => Vocabulary::new(DEFAULT_DEGREES.iter().copied()),
        }
        .context("DEGREE_VOCABULARY is invalid")?;

        let matcher = MatcherConfig {
            skills,
            degrees,
            fuzzy_enabled: parse_or("FUZZY_ENABLED", &lookup, true, parse_bool)?,
            fuzzy_threshold: parse_or(
                "FUZZY_THRESHOLD",
                &lookup,
                u32::from(DEFAULT_FUZZY_THRESHOLD),
                |s| s.parse::<u32>().ok(),
            )?,
            fuzzy_min_term_len: parse_or(
                "FUZZY_MIN_TERM_LEN",
                &lookup,
                DEFAULT_FUZZY_MIN_TERM_LEN,
                |s| s.parse::<usize>().ok(),
            )?,
        };
        matcher.validate().context("Matcher configuration rejected")?;

        let scoring_threads = match lookup("SCORING_THREADS") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => Some(n),
                _ => bail!("SCORING_THREADS must be a positive integer, got '{raw}'"),
            },
            None => None,
        };

        Ok(Config {
            port: parse_or("PORT", &lookup, 8080, |s| s.parse::<u16>().ok())?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            matcher,
            scoring_threads,
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", &lookup, DEFAULT_MAX_UPLOAD_BYTES, |s| {
                s.parse::<usize>().ok()
            })?,
            max_json_bytes: parse_or("MAX_JSON_BYTES", &lookup, DEFAULT_MAX_JSON_BYTES, |s| {
                s.parse::<usize>().ok()
            })?,
        })
    }
}

fn parse_or<T, F, P>(key: &str, lookup: &F, default: T, parse: P) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Option<T>,
{
    match lookup(key) {
        Some(raw) => parse(raw.trim())
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Comma-separated list; surrounding whitespace and empty items are dropped.
fn split_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert!(config.matcher.fuzzy_enabled);
        assert_eq!(config.matcher.fuzzy_threshold, 85);
        assert_eq!(config.matcher.fuzzy_min_term_len, 2);
        assert_eq!(config.matcher.skills.len(), DEFAULT_SKILLS.len());
        assert_eq!(config.scoring_threads, None);
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
        assert_eq!(config.max_json_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_vocabulary_overrides() {
        let config = config_from(&[
            ("SKILL_VOCABULARY", "Rust, Go ,, Kubernetes"),
            ("DEGREE_VOCABULARY", "MSc"),
        ])
        .unwrap();
        assert_eq!(config.matcher.skills.terms(), &["rust", "go", "kubernetes"]);
        assert_eq!(config.matcher.degrees.terms(), &["msc"]);
    }

    #[test]
    fn test_empty_skill_vocabulary_fails_startup() {
        assert!(config_from(&[("SKILL_VOCABULARY", " , ")]).is_err());
    }

    #[test]
    fn test_threshold_out_of_range_fails_startup() {
        assert!(config_from(&[("FUZZY_THRESHOLD", "120")]).is_err());
        assert!(config_from(&[("FUZZY_THRESHOLD", "-1")]).is_err());
        assert!(config_from(&[("FUZZY_THRESHOLD", "90")]).is_ok());
    }

    #[test]
    fn test_fuzzy_flag_parsing() {
        let config = config_from(&[("FUZZY_ENABLED", "off")]).unwrap();
        assert!(!config.matcher.fuzzy_enabled);
        assert!(config_from(&[("FUZZY_ENABLED", "maybe")]).is_err());
    }

    #[test]
    fn test_scoring_threads() {
        let config = config_from(&[("SCORING_THREADS", "4")]).unwrap();
        assert_eq!(config.scoring_threads, Some(4));
        assert!(config_from(&[("SCORING_THREADS", "0")]).is_err());
    }

    #[test]
    fn test_invalid_port() {
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
    }
}
