//! Regex-based title and content extraction for raw HTML.
//!
//! This is a best-effort heuristic, not a general HTML-to-text algorithm.
//! It knows one content platform's conventions (WeChat articles: a
//! `msg_title` script variable and a `js_content` container with lazy-loaded
//! images) and otherwise treats the whole page as content.
//!
//! Steps, in order:
//! 1. `<title>` text, entity-decoded
//! 2. `var msg_title = "…"` overrides the title
//! 3. `id="js_content"` container → fragment, `data-src` → `src`
//! 4. no container → the whole page is the fragment
//! 5. drop non-rendered elements, strip tags, decode entities, collapse whitespace
//! 6. truncate to the text limit

use crate::config::TRUNCATION_MARKER;
use crate::output::{ScrapeFailure, ScrapeResult, ScrapeSuccess};
use crate::pipeline::detect;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

static RE_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<title>([^<]+)</title>").unwrap());

static RE_MSG_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"var msg_title = ["']([^"']*)["']"#).unwrap());

static RE_CONTENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)id="js_content"[^>]*>(.*?)</div>\s*(?:<div|<script)"#).unwrap()
});

static RE_DATA_SRC: Lazy<Regex> = Lazy::new(|| Regex::new(r#"data-src="([^"]*)""#).unwrap());

// No backreferences in `regex`, so one alternative per element.
static RE_NON_RENDERED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<script\b[^>]*>.*?</script>|<style\b[^>]*>.*?</style>|<title\b[^>]*>.*?</title>|<noscript\b[^>]*>.*?</noscript>",
    )
    .unwrap()
});

static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Title, fragment and text recovered from one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    pub title: String,
    /// Content fragment markup.
    pub html: String,
    /// Plain text after truncation.
    pub text: String,
    /// Character count before truncation.
    pub content_length: usize,
    /// Whether a known content container was found.
    pub isolated: bool,
}

/// Detect block pages, then extract content. Pure; equal inputs give equal results.
pub fn analyze_html(html: &str, text_limit: usize) -> ScrapeResult {
    if let Some(indicator) = detect::detect_static(html) {
        warn!(indicator = indicator.label, "Block page detected");
        return ScrapeFailure::blocked(indicator.label).into();
    }

    let content = extract_content(html, text_limit);
    debug!(
        title = %content.title,
        isolated = content.isolated,
        content_length = content.content_length,
        "Extracted content"
    );

    ScrapeSuccess {
        title: content.title,
        html: content.html,
        text: content.text,
        content_length: content.content_length,
        full_html: Some(html.to_string()),
        pdf: None,
        screenshot: None,
    }
    .into()
}

/// Run extraction steps 1–6 without block detection.
pub fn extract_content(html: &str, text_limit: usize) -> ExtractedContent {
    let title = extract_title(html);
    let (fragment, isolated) = match extract_fragment(html) {
        Some(fragment) => (fragment, true),
        None => (html.to_string(), false),
    };
    let plain = html_to_text(&fragment);
    let (text, content_length) = truncate_text(&plain, text_limit);

    ExtractedContent {
        title,
        html: fragment,
        text,
        content_length,
        isolated,
    }
}

/// `msg_title` if present, else the decoded first `<title>`, else empty.
pub fn extract_title(html: &str) -> String {
    if let Some(caps) = RE_MSG_TITLE.captures(html) {
        return caps[1].to_string();
    }
    RE_TITLE
        .captures(html)
        .map(|caps| htmlize::unescape(&caps[1]).into_owned())
        .unwrap_or_default()
}

/// Inner markup of the `js_content` container with lazy images made eager.
pub fn extract_fragment(html: &str) -> Option<String> {
    RE_CONTENT
        .captures(html)
        .map(|caps| RE_DATA_SRC.replace_all(&caps[1], r#"src="$1""#).into_owned())
}

/// Drop script/style/title bodies, strip tags, decode entities, collapse
/// whitespace runs, trim.
pub fn html_to_text(fragment: &str) -> String {
    let visible = RE_NON_RENDERED.replace_all(fragment, "");
    let stripped = RE_TAG.replace_all(&visible, "");
    let decoded = htmlize::unescape(stripped);
    RE_WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

/// Cut `text` to `limit` characters, appending the marker when cut.
///
/// Returns the (possibly truncated) text and the original character count.
pub fn truncate_text(text: &str, limit: usize) -> (String, usize) {
    let total = text.chars().count();
    if total <= limit {
        return (text.to_string(), total);
    }
    let cut = text
        .char_indices()
        .nth(limit)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    (format!("{}{}", &text[..cut], TRUNCATION_MARKER), total)
}
