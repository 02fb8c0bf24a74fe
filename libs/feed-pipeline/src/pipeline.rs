//! Raw feed entries in, display-ready articles out.
//!
//! The pipeline performs no I/O and never reads the clock: entries and
//! `now` come from the caller. Feed order is preserved.

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::config::FilterConfig;
use crate::entry::{Article, RawEntry, MISSING_LINK};
use crate::noise::is_noise;
use crate::recency::is_recent;
use crate::summary::normalize_summary;

/// Why an entry did not become an article
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Noise,
    Stale,
}

/// Lazily filter and normalize `raw_entries`, one pass, in feed order.
pub fn build_articles<'a, I>(
    raw_entries: I,
    config: &'a FilterConfig,
    now: DateTime<Utc>,
) -> impl Iterator<Item = Article> + 'a
where
    I: IntoIterator<Item = RawEntry>,
    I::IntoIter: 'a,
{
    raw_entries
        .into_iter()
        .filter_map(move |entry| admit(entry, config, now).ok())
}

/// Run one entry through the noise, recency and summary stages
pub fn admit(entry: RawEntry, config: &FilterConfig, now: DateTime<Utc>) -> Result<Article, Rejection> {
    let title = entry.display_title();

    if is_noise(Some(title), &config.noise_keywords)
        || is_noise(entry.summary.as_deref(), &config.noise_keywords)
    {
        trace!(title = %title, "Dropped noisy entry");
        return Err(Rejection::Noise);
    }

    if !is_recent(entry.published_at, now, config.max_age) {
        trace!(title = %title, published_at = ?entry.published_at, "Dropped stale entry");
        return Err(Rejection::Stale);
    }

    let summary = normalize_summary(
        entry.summary.as_deref(),
        title,
        config.max_summary_length,
        config.title_prefix_chars,
    );
    let title = title.to_string();

    Ok(Article {
        title,
        link: entry.link.unwrap_or_else(|| MISSING_LINK.to_string()),
        published_display: entry.published_text.unwrap_or_default(),
        summary,
        published_at: entry.published_at,
        image_url: entry.image_url,
    })
}
