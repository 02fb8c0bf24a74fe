//! Filter, fetch and application configuration.
//!
//! Values are fixed at startup. `AppConfig::from_env` reads overrides from
//! `NEWS_*` environment variables; anything unset keeps its default.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::error::ConfigError;
use crate::recency::DEFAULT_MAX_AGE_DAYS;
use crate::summary::{DEFAULT_MAX_SUMMARY_CHARS, DEFAULT_TITLE_PREFIX_CHARS};

/// Business, market and government terms that mark an entry off-topic
pub const DEFAULT_NOISE_KEYWORDS: &[&str] = &[
    "株", "決算", "市場", "政府", "規制", "国税", "株式", "取引", "投資",
    "stock", "shares", "market", "policy", "government", "regulation", "revenue", "earnings",
];

/// HTTP timeout for fetching feeds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
/// Upper bound on time spent retrying a transient fetch failure
pub const DEFAULT_RETRY_ELAPSED_SECS: u64 = 20;
pub const DEFAULT_USER_AGENT: &str = concat!("feed-pipeline/", env!("CARGO_PKG_VERSION"));

pub const ENV_SOURCES_FILE: &str = "NEWS_SOURCES_FILE";
pub const ENV_NOISE_KEYWORDS: &str = "NEWS_NOISE_KEYWORDS";
pub const ENV_MAX_AGE_DAYS: &str = "NEWS_MAX_AGE_DAYS";
pub const ENV_MAX_SUMMARY_CHARS: &str = "NEWS_MAX_SUMMARY_CHARS";
pub const ENV_TITLE_PREFIX_CHARS: &str = "NEWS_TITLE_PREFIX_CHARS";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "NEWS_FETCH_TIMEOUT_SECS";
pub const ENV_FETCH_RETRY_SECS: &str = "NEWS_FETCH_RETRY_SECS";

/// Per-run filtering rules handed to the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    /// Lower-cased on construction
    pub noise_keywords: BTreeSet<String>,
    pub max_age: Duration,
    pub max_summary_length: usize,
    /// Length of the title prefix used by the redundancy check
    pub title_prefix_chars: usize,
}

impl FilterConfig {
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            noise_keywords: normalize_keywords(keywords),
            ..Self::default()
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            noise_keywords: normalize_keywords(DEFAULT_NOISE_KEYWORDS),
            max_age: Duration::days(DEFAULT_MAX_AGE_DAYS),
            max_summary_length: DEFAULT_MAX_SUMMARY_CHARS,
            title_prefix_chars: DEFAULT_TITLE_PREFIX_CHARS,
        }
    }
}

fn normalize_keywords<I, S>(keywords: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// HTTP behaviour of the feed fetcher
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    pub timeout: StdDuration,
    /// Zero disables retries
    pub max_retry_elapsed: StdDuration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: StdDuration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            max_retry_elapsed: StdDuration::from_secs(DEFAULT_RETRY_ELAPSED_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub filter: FilterConfig,
    pub fetch: FetchConfig,
    /// JSON source list replacing the built-in registry
    pub sources_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = AppConfig::default();

        if let Some(raw) = read_env(ENV_NOISE_KEYWORDS) {
            config.filter.noise_keywords = normalize_keywords(raw.split(','));
        }
        if let Some(days) = parse_env::<u32>(ENV_MAX_AGE_DAYS)? {
            config.filter.max_age = Duration::days(i64::from(days));
        }
        if let Some(chars) = parse_env::<usize>(ENV_MAX_SUMMARY_CHARS)? {
            config.filter.max_summary_length = chars;
        }
        if let Some(chars) = parse_env::<usize>(ENV_TITLE_PREFIX_CHARS)? {
            config.filter.title_prefix_chars = chars;
        }
        if let Some(secs) = parse_env::<u64>(ENV_FETCH_TIMEOUT_SECS)? {
            config.fetch.timeout = StdDuration::from_secs(secs);
        }
        if let Some(secs) = parse_env::<u64>(ENV_FETCH_RETRY_SECS)? {
            config.fetch.max_retry_elapsed = StdDuration::from_secs(secs);
        }
        config.sources_file = read_env(ENV_SOURCES_FILE).map(PathBuf::from);

        Ok(config)
    }
}

/// Set and non-blank, trimmed
fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match read_env(key) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key: key.to_string(), value }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ALL_KEYS: [&str; 7] = [
        ENV_SOURCES_FILE,
        ENV_NOISE_KEYWORDS,
        ENV_MAX_AGE_DAYS,
        ENV_MAX_SUMMARY_CHARS,
        ENV_TITLE_PREFIX_CHARS,
        ENV_FETCH_TIMEOUT_SECS,
        ENV_FETCH_RETRY_SECS,
    ];

    fn clear_env() {
        for key in ALL_KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_filter_defaults() {
        let config = FilterConfig::default();
        assert_eq!(config.max_age, Duration::days(60));
        assert_eq!(config.max_summary_length, 200);
        assert_eq!(config.title_prefix_chars, 30);
        assert!(config.noise_keywords.contains("株"));
        assert!(config.noise_keywords.contains("earnings"));
    }

    #[test]
    fn test_keywords_are_lowercased_and_deduplicated() {
        let config = FilterConfig::with_keywords(["Stock", "stock", " 政府 ", ""]);
        let keywords: Vec<&str> = config.noise_keywords.iter().map(String::as_str).collect();
        assert_eq!(keywords, vec!["stock", "政府"]);
    }

    #[test]
    #[serial]
    fn test_from_env_without_overrides_is_default() {
        clear_env();
        assert_eq!(AppConfig::from_env().unwrap(), AppConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var(ENV_NOISE_KEYWORDS, "crypto, NFT");
        std::env::set_var(ENV_MAX_AGE_DAYS, "14");
        std::env::set_var(ENV_MAX_SUMMARY_CHARS, "120");
        std::env::set_var(ENV_TITLE_PREFIX_CHARS, "10");
        std::env::set_var(ENV_FETCH_TIMEOUT_SECS, "5");
        std::env::set_var(ENV_FETCH_RETRY_SECS, "0");
        std::env::set_var(ENV_SOURCES_FILE, "/etc/news/sources.json");

        let config = AppConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.filter.noise_keywords.len(), 2);
        assert!(config.filter.noise_keywords.contains("nft"));
        assert_eq!(config.filter.max_age, Duration::days(14));
        assert_eq!(config.filter.max_summary_length, 120);
        assert_eq!(config.filter.title_prefix_chars, 10);
        assert_eq!(config.fetch.timeout, StdDuration::from_secs(5));
        assert_eq!(config.fetch.max_retry_elapsed, StdDuration::ZERO);
        assert_eq!(config.sources_file, Some(PathBuf::from("/etc/news/sources.json")));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_malformed_number() {
        clear_env();
        std::env::set_var(ENV_MAX_AGE_DAYS, "two months");

        let err = AppConfig::from_env().unwrap_err();
        clear_env();

        match err {
            ConfigError::InvalidValue { key, value } => {
                assert_eq!(key, ENV_MAX_AGE_DAYS);
                assert_eq!(value, "two months");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
