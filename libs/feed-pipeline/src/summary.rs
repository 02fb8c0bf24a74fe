//! Summary cleanup: tag stripping, title-redundancy suppression and truncation.
//!
//! Lengths are counted in characters, not bytes, so Japanese text is cut
//! on character boundaries.

use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_MAX_SUMMARY_CHARS: usize = 200;
pub const DEFAULT_TITLE_PREFIX_CHARS: usize = 30;
pub const ELLIPSIS: &str = "...";

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^<]+>").expect("tag pattern compiles"));

/// Remove angle-bracket tags and surrounding whitespace. Entities are left as is.
pub fn strip_tags(raw: &str) -> String {
    TAG.replace_all(raw, "").trim().to_string()
}

/// True when `clean` repeats the title outright or opens with the title's
/// first `prefix_chars` characters.
pub fn is_redundant(clean: &str, title: &str, prefix_chars: usize) -> bool {
    if clean == title {
        return true;
    }
    let prefix: String = title.chars().take(prefix_chars).collect();
    clean.starts_with(&prefix)
}

/// Cut to `max_chars` characters and mark the cut with an ellipsis
pub fn truncate(text: String, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text;
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str(ELLIPSIS);
    cut
}

/// Turn a raw feed summary into display text, or an empty string when
/// there is nothing worth showing beside the title.
pub fn normalize_summary(raw: Option<&str>, title: &str, max_chars: usize, prefix_chars: usize) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let clean = strip_tags(raw);
    if is_redundant(&clean, title, prefix_chars) {
        return String::new();
    }
    truncate(clean, max_chars)
}
