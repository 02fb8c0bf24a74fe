//! Named feed endpoints.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// A feed endpoint under a human-readable name
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Source {
    pub name: String,
    pub endpoint: Url,
}

impl Source {
    pub fn new(name: &str, endpoint: &str) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            name: name.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            endpoint,
        })
    }
}

/// Curated Japanese AI/tech feeds: (name, endpoint)
const BUILTIN_SOURCES: &[(&str, &str)] = &[
    // Google
    ("Google Developers Japan", "https://developers-jp.googleblog.com/feeds/posts/default?alt=rss"),
    ("Google Cloud JP (Zenn)", "https://zenn.dev/p/google_cloud_jp/feed"),
    // note users
    ("note (akira_papa_ai)", "https://note.com/akira_papa_ai/rss"),
    // note hashtags
    ("note (#生成AI)", "https://note.com/hashtag/生成AI/rss"),
    ("note (#LLM)", "https://note.com/hashtag/LLM/rss"),
    ("note (#自動化)", "https://note.com/hashtag/自動化/rss"),
    ("note (#AntiGravity)", "https://note.com/hashtag/AntiGravity/rss"),
    ("note (#AgentSkills)", "https://note.com/hashtag/AgentSkills/rss"),
    ("note (#OpenClaw)", "https://note.com/hashtag/OpenClaw/rss"),
    // Tech blogs
    ("Zenn (AIトピック)", "https://zenn.dev/topics/ai/feed"),
];

/// Immutable, ordered set of sources with unique names
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRegistry {
    sources: Vec<Source>,
}

impl SourceRegistry {
    pub fn new(sources: Vec<Source>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for source in &sources {
            if !seen.insert(source.name.as_str()) {
                return Err(ConfigError::DuplicateSource(source.name.clone()));
            }
        }
        Ok(Self { sources })
    }

    pub fn builtin() -> Result<Self, ConfigError> {
        let sources = BUILTIN_SOURCES
            .iter()
            .map(|(name, endpoint)| Source::new(name, endpoint))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(sources)
    }

    /// Load a JSON array of `{"name": ..., "endpoint": ...}` objects
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &[u8]) -> Result<Self, ConfigError> {
        let sources: Vec<Source> = serde_json::from_slice(data)?;
        Self::new(sources)
    }

    pub fn get(&self, name: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Resolve names in the given order; an empty list selects everything
    pub fn select(&self, names: &[String]) -> Result<Vec<Source>, ConfigError> {
        if names.is_empty() {
            return Ok(self.sources.clone());
        }
        names
            .iter()
            .map(|name| {
                self.get(name)
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownSource(name.clone()))
            })
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
