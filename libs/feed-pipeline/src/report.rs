//! Per-source outcome handed to the presentation layer.
//!
//! The pipeline cannot tell an outage from an empty feed; the report can,
//! because it also sees the fetch result.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::FilterConfig;
use crate::entry::{Article, RawEntry};
use crate::error::FeedError;
use crate::pipeline::build_articles;
use crate::registry::Source;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeedStatus {
    Ready { count: usize },
    /// Source answered with zero entries
    NoEntries,
    /// Entries arrived but none survived filtering
    AllFiltered { fetched: usize },
    Unavailable { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub source: String,
    pub endpoint: String,
    #[serde(flatten)]
    pub status: FeedStatus,
    pub articles: Vec<Article>,
}

impl SourceReport {
    pub fn build(
        source: &Source,
        fetched: Result<Vec<RawEntry>, FeedError>,
        config: &FilterConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let (status, articles) = match fetched {
            Err(e) => (FeedStatus::Unavailable { reason: e.to_string() }, Vec::new()),
            Ok(entries) if entries.is_empty() => (FeedStatus::NoEntries, Vec::new()),
            Ok(entries) => {
                let fetched = entries.len();
                let articles: Vec<Article> = build_articles(entries, config, now).collect();
                let status = if articles.is_empty() {
                    FeedStatus::AllFiltered { fetched }
                } else {
                    FeedStatus::Ready { count: articles.len() }
                };
                (status, articles)
            }
        };

        Self {
            source: source.name.clone(),
            endpoint: source.endpoint.to_string(),
            status,
            articles,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.status, FeedStatus::Unavailable { .. })
    }
}
