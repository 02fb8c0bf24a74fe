use std::collections::BTreeMap;
use std::time::Duration;

use atom_syndication::Feed;
use backoff::{future::retry, ExponentialBackoff};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use rss::Channel;
use tracing::{debug, instrument, warn};

use crate::config::FetchConfig;
use crate::entry::RawEntry;
use crate::error::FeedError;
use crate::registry::Source;

/// Retrieves a source and maps its items to `RawEntry` values
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: reqwest::Client,
    max_retry_elapsed: Duration,
}

impl FeedFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self::with_client(client, config.max_retry_elapsed))
    }

    /// Reuse an existing client (connection pool)
    pub fn with_client(client: reqwest::Client, max_retry_elapsed: Duration) -> Self {
        Self {
            client,
            max_retry_elapsed,
        }
    }

    /// Fetch one source. Transient failures are retried until the
    /// configured elapsed limit runs out.
    #[instrument(skip(self, source), fields(source = %source.name))]
    pub async fn fetch(&self, source: &Source) -> Result<Vec<RawEntry>, FeedError> {
        if self.max_retry_elapsed.is_zero() {
            return self.fetch_once(source).await;
        }

        let policy = ExponentialBackoff {
            max_elapsed_time: Some(self.max_retry_elapsed),
            ..Default::default()
        };

        retry(policy, move || async move {
            self.fetch_once(source).await.map_err(|e| {
                if e.is_transient() {
                    warn!(error = %e, "Transient feed error, retrying");
                    backoff::Error::transient(e)
                } else {
                    backoff::Error::permanent(e)
                }
            })
        })
        .await
    }

    /// Fetch every source concurrently; results keep the input order
    pub async fn fetch_all<'a>(
        &self,
        sources: &'a [Source],
    ) -> Vec<(&'a Source, Result<Vec<RawEntry>, FeedError>)> {
        let results = join_all(sources.iter().map(|source| self.fetch(source))).await;
        sources.iter().zip(results).collect()
    }

    async fn fetch_once(&self, source: &Source) -> Result<Vec<RawEntry>, FeedError> {
        let response = self.client.get(source.endpoint.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: source.endpoint.to_string(),
            });
        }

        let body = response.bytes().await?;
        let entries = parse_feed(&body).map_err(|reason| FeedError::Parse {
            url: source.endpoint.to_string(),
            reason,
        })?;

        debug!(count = entries.len(), "Fetched feed entries");
        Ok(entries)
    }
}

/// Parse an RSS 2.0 document, falling back to Atom
pub fn parse_feed(body: &[u8]) -> Result<Vec<RawEntry>, String> {
    match Channel::read_from(body) {
        Ok(channel) => Ok(channel.items().iter().map(rss_entry).collect()),
        Err(rss_err) => match Feed::read_from(body) {
            Ok(feed) => Ok(feed.entries().iter().map(atom_entry).collect()),
            Err(atom_err) => Err(format!("not RSS ({rss_err}) nor Atom ({atom_err})")),
        },
    }
}

fn rss_entry(item: &rss::Item) -> RawEntry {
    let dc_date = item
        .dublin_core_ext()
        .and_then(|dc| dc.dates().first())
        .map(String::as_str);

    let published_text = item.pub_date().or(dc_date).map(str::to_string);
    let published_at = item
        .pub_date()
        .and_then(parse_rfc2822)
        .or_else(|| dc_date.and_then(parse_rfc3339));

    let image_url = media_image(item.extensions(), rss::extension::Extension::attrs).or_else(|| {
        item.enclosure()
            .filter(|e| e.mime_type().starts_with("image/"))
            .map(|e| e.url().to_string())
    });

    RawEntry {
        title: item.title().map(str::to_string),
        summary: item.description().map(str::to_string),
        link: item.link().map(str::to_string),
        published_text,
        published_at,
        image_url,
    }
}

fn atom_entry(entry: &atom_syndication::Entry) -> RawEntry {
    let title = Some(entry.title().as_str())
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let summary = entry
        .summary()
        .map(|s| s.as_str().to_string())
        .or_else(|| entry.content().and_then(|c| c.value()).map(str::to_string));

    let link = entry
        .links()
        .iter()
        .find(|l| l.rel() == "alternate")
        .or_else(|| entry.links().first())
        .map(|l| l.href().to_string());

    let published = entry.published();

    let image_url = media_image(entry.extensions(), atom_syndication::extension::Extension::attrs).or_else(|| {
        entry
            .links()
            .iter()
            .find(|l| l.mime_type().is_some_and(|m| m.starts_with("image/")))
            .map(|l| l.href().to_string())
    });

    RawEntry {
        title,
        summary,
        link,
        published_text: published.map(|d| d.to_rfc3339()),
        published_at: published.map(|d| d.with_timezone(&Utc)),
        image_url,
    }
}

/// First `media:content` URL, then `media:thumbnail`. RSS and Atom share
/// the extension map layout but not the element type.
fn media_image<E>(
    extensions: &BTreeMap<String, BTreeMap<String, Vec<E>>>,
    attrs: impl Fn(&E) -> &BTreeMap<String, String>,
) -> Option<String> {
    let media = extensions.get("media")?;
    ["content", "thumbnail"].iter().find_map(|kind| {
        media
            .get(*kind)?
            .iter()
            .find_map(|ext| attrs(ext).get("url").cloned())
    })
}

fn parse_rfc2822(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(text.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

fn parse_rfc3339(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}
