//! Off-topic detection by keyword substring.

/// True when `text` contains any keyword, ignoring case.
///
/// Plain substring match: no tokenization, so a keyword may also fire
/// inside an unrelated word.
pub fn is_noise<I, S>(text: Option<&str>, keywords: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let text = match text {
        Some(t) if !t.is_empty() => t.to_lowercase(),
        _ => return false,
    };

    keywords.into_iter().any(|kw| {
        let kw = kw.as_ref();
        !kw.is_empty() && text.contains(&kw.to_lowercase())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYWORDS: [&str; 4] = ["株", "決算", "stock", "Market"];

    #[test]
    fn test_absent_or_empty_is_not_noise() {
        assert!(!is_noise(None, KEYWORDS));
        assert!(!is_noise(Some(""), KEYWORDS));
    }

    #[test]
    fn test_japanese_keyword_matches() {
        assert!(is_noise(Some("株価が急騰"), KEYWORDS));
        assert!(is_noise(Some("第3四半期決算を発表"), KEYWORDS));
    }

    #[test]
    fn test_match_ignores_case_on_both_sides() {
        assert!(is_noise(Some("STOCK split announced"), KEYWORDS));
        assert!(is_noise(Some("the market opens"), KEYWORDS));
    }

    #[test]
    fn test_substring_overtriggers() {
        // "stockpile" contains "stock"; accepted.
        assert!(is_noise(Some("GPU stockpile grows"), KEYWORDS));
    }

    #[test]
    fn test_clean_text_passes() {
        assert!(!is_noise(Some("LLMエージェントの設計"), KEYWORDS));
        assert!(!is_noise(Some("anything"), Vec::<String>::new()));
    }

    #[test]
    fn test_empty_keyword_never_matches() {
        assert!(!is_noise(Some("text"), [""]));
    }
}
