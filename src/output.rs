//! The scrape result record returned by both scraping pipelines.
//!
//! On the wire a result is one flat JSON object whose boolean `success`
//! field comes first and decides which other fields are present. In Rust
//! the two shapes are separate structs behind the [`ScrapeResult`] enum, so
//! a record can never carry fields from both.

use crate::error::ScrapeError;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Outcome of a single scrape.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeResult {
    Success(ScrapeSuccess),
    Failure(ScrapeFailure),
}

/// Fields present when `success == true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeSuccess {
    pub title: String,
    /// Content fragment (static) or full rendered markup (dynamic).
    pub html: String,
    /// Plain text, truncated with a `...` marker past the text limit.
    pub text: String,
    /// Character count of the untruncated text.
    pub content_length: usize,
    /// Entire response body; static pipeline only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<PathBuf>,
}

/// Fields present when `success == false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeFailure {
    pub error: String,
    /// The strategy that produced this record could not obtain the real
    /// page; a more capable one should be tried.
    pub needs_upgrade: bool,
    /// Screenshot of the block page, when one was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<PathBuf>,
}

impl ScrapeFailure {
    /// Failure for a page matching a block indicator.
    pub fn blocked(label: &str) -> Self {
        Self {
            error: format!("Blocked by anti-bot protection (detected: {label})"),
            needs_upgrade: true,
            screenshot: None,
        }
    }
}

impl From<ScrapeError> for ScrapeFailure {
    fn from(err: ScrapeError) -> Self {
        Self {
            error: err.to_string(),
            needs_upgrade: true,
            screenshot: None,
        }
    }
}

impl ScrapeResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ScrapeResult::Success(_))
    }

    /// Always `false` for successes.
    pub fn needs_upgrade(&self) -> bool {
        match self {
            ScrapeResult::Success(_) => false,
            ScrapeResult::Failure(f) => f.needs_upgrade,
        }
    }

    pub fn as_success(&self) -> Option<&ScrapeSuccess> {
        match self {
            ScrapeResult::Success(s) => Some(s),
            ScrapeResult::Failure(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&ScrapeFailure> {
        match self {
            ScrapeResult::Success(_) => None,
            ScrapeResult::Failure(f) => Some(f),
        }
    }

    /// Indented JSON with non-ASCII characters kept literally.
    pub fn to_json_pretty(&self) -> Result<String, ScrapeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write [`Self::to_json_pretty`] to `path`.
    pub async fn write_json(&self, path: &Path) -> Result<(), ScrapeError> {
        let json = self.to_json_pretty()?;
        tokio::fs::write(path, json)
            .await
            .map_err(|source| ScrapeError::OutputWriteFailed {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl From<ScrapeSuccess> for ScrapeResult {
    fn from(s: ScrapeSuccess) -> Self {
        ScrapeResult::Success(s)
    }
}

impl From<ScrapeFailure> for ScrapeResult {
    fn from(f: ScrapeFailure) -> Self {
        ScrapeResult::Failure(f)
    }
}

// ── Wire format ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Tagged<'a, T> {
    success: bool,
    #[serde(flatten)]
    body: &'a T,
}

impl Serialize for ScrapeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ScrapeResult::Success(body) => Tagged {
                success: true,
                body,
            }
            .serialize(serializer),
            ScrapeResult::Failure(body) => Tagged {
                success: false,
                body,
            }
            .serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
struct Envelope {
    success: bool,
    #[serde(flatten)]
    body: serde_json::Map<String, serde_json::Value>,
}

impl<'de> Deserialize<'de> for ScrapeResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Envelope { success, body } = Envelope::deserialize(deserializer)?;
        let body = serde_json::Value::Object(body);
        if success {
            serde_json::from_value(body)
                .map(ScrapeResult::Success)
                .map_err(de::Error::custom)
        } else {
            serde_json::from_value(body)
                .map(ScrapeResult::Failure)
                .map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_success() -> ScrapeResult {
        ScrapeSuccess {
            title: "标题".into(),
            html: "<p>正文</p>".into(),
            text: "正文".into(),
            content_length: 2,
            full_html: None,
            pdf: None,
            screenshot: Some(PathBuf::from("shot.png")),
        }
        .into()
    }

    #[test]
    fn success_is_written_first() {
        let json = sample_success().to_json_pretty().unwrap();
        let first_field = json.lines().nth(1).unwrap().trim();
        assert_eq!(first_field, "\"success\": true,");
    }

    #[test]
    fn non_ascii_is_literal() {
        let json = sample_success().to_json_pretty().unwrap();
        assert!(json.contains("标题"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let v: serde_json::Value = serde_json::to_value(sample_success()).unwrap();
        assert!(v.get("pdf").is_none());
        assert!(v.get("full_html").is_none());
        assert_eq!(v["screenshot"], "shot.png");
        assert!(v.get("error").is_none());
    }

    #[test]
    fn failure_shape() {
        let r: ScrapeResult = ScrapeFailure::blocked("captcha").into();
        let v: serde_json::Value = serde_json::to_value(&r).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["needs_upgrade"], true);
        assert_eq!(
            v["error"],
            "Blocked by anti-bot protection (detected: captcha)"
        );
        assert!(v.get("title").is_none());
        assert!(r.needs_upgrade());
    }

    #[test]
    fn json_reads_back() {
        let original = sample_success();
        let json = original.to_json_pretty().unwrap();
        let parsed: ScrapeResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);

        let failure: ScrapeResult =
            serde_json::from_str(r#"{"success": false, "error": "boom", "needs_upgrade": true}"#)
                .unwrap();
        assert_eq!(failure.as_failure().map(|f| f.error.as_str()), Some("boom"));
    }

    #[test]
    fn success_without_required_field_is_rejected() {
        let r = serde_json::from_str::<ScrapeResult>(r#"{"success": true, "title": "x"}"#);
        assert!(r.is_err());
    }

    #[test]
    fn error_folds_into_failure() {
        let f = ScrapeFailure::from(ScrapeError::NavigationTimeout {
            url: "https://slow.example".into(),
            secs: 60,
        });
        assert!(f.needs_upgrade);
        assert!(f.error.contains("60000ms"));
    }
}
