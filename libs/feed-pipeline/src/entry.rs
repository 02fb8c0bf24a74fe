use chrono::{DateTime, Utc};
use serde::Serialize;

/// Title shown when a feed entry has none
pub const UNTITLED_PLACEHOLDER: &str = "タイトルなし";
/// Link used when a feed entry has none
pub const MISSING_LINK: &str = "#";

/// One unvalidated item as delivered by a feed. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntry {
    pub title: Option<String>,
    /// May contain markup
    pub summary: Option<String>,
    pub link: Option<String>,
    /// Date as written in the feed, display only
    pub published_text: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
}

impl RawEntry {
    /// Title with blanks treated as absent
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(UNTITLED_PLACEHOLDER)
    }
}

/// A filtered, normalized entry ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub published_display: String,
    /// Plain text; empty when absent or redundant with the title
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
