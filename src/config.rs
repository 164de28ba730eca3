//! Configuration types for scraping and rendering.
//!
//! All pipeline behaviour is controlled through [`ScrapeConfig`], built via
//! its [`ScrapeConfigBuilder`]. Page geometry for PDF export lives in
//! [`PdfLayout`], which has one preset per tool.

use crate::error::ScrapeError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Desktop Chrome user agent sent by both the HTTP client and the browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// `Accept-Language` for the static fetch.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9,en;q=0.8";

/// Characters of plain text kept in a result before truncation.
pub const DEFAULT_TEXT_LIMIT: usize = 5000;

/// Appended to text that was cut at the limit.
pub const TRUNCATION_MARKER: &str = "...";

/// Configuration shared by the three pipelines.
///
/// Built via [`ScrapeConfig::builder()`] or using [`ScrapeConfig::default()`].
///
/// # Example
/// ```rust
/// use scrapekit::ScrapeConfig;
///
/// let config = ScrapeConfig::builder()
///     .navigation_timeout_secs(30)
///     .settle_delay_ms(500)
///     .build()
///     .unwrap();
/// assert_eq!(config.text_limit, 5000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// User agent for HTTP requests and the browser. Default: desktop Chrome 120.
    pub user_agent: String,

    /// `Accept-Language` header for the static fetch.
    pub accept_language: String,

    /// Browser window / viewport width in pixels. Default: 1920.
    pub viewport_width: u32,

    /// Browser window / viewport height in pixels. Default: 1080.
    pub viewport_height: u32,

    /// Upper bound on navigation plus network-idle wait. Default: 60.
    pub navigation_timeout_secs: u64,

    /// Extra sleep after network idle so late scripts can finish. Default: 2000.
    pub settle_delay_ms: u64,

    /// Static fetch timeout in seconds. Default: 30.
    pub http_timeout_secs: u64,

    /// Maximum characters of `text` in a result. Default: 5000.
    pub text_limit: usize,

    /// Explicit Chromium executable. If None, chromiumoxide auto-detects.
    pub chrome_executable: Option<PathBuf>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            viewport_width: 1920,
            viewport_height: 1080,
            navigation_timeout_secs: 60,
            settle_delay_ms: 2000,
            http_timeout_secs: 30,
            text_limit: DEFAULT_TEXT_LIMIT,
            chrome_executable: None,
        }
    }
}

impl ScrapeConfig {
    /// Create a new builder for `ScrapeConfig`.
    pub fn builder() -> ScrapeConfigBuilder {
        ScrapeConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ScrapeConfig`].
#[derive(Debug)]
pub struct ScrapeConfigBuilder {
    config: ScrapeConfig,
}

impl ScrapeConfigBuilder {
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    pub fn accept_language(mut self, lang: impl Into<String>) -> Self {
        self.config.accept_language = lang.into();
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self
    }

    pub fn navigation_timeout_secs(mut self, secs: u64) -> Self {
        self.config.navigation_timeout_secs = secs;
        self
    }

    pub fn settle_delay_ms(mut self, ms: u64) -> Self {
        self.config.settle_delay_ms = ms;
        self
    }

    pub fn http_timeout_secs(mut self, secs: u64) -> Self {
        self.config.http_timeout_secs = secs;
        self
    }

    pub fn text_limit(mut self, chars: usize) -> Self {
        self.config.text_limit = chars;
        self
    }

    pub fn chrome_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.chrome_executable = Some(path.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ScrapeConfig, ScrapeError> {
        let c = &self.config;
        if c.navigation_timeout_secs == 0 {
            return Err(ScrapeError::InvalidConfig(
                "Navigation timeout must be ≥ 1s".into(),
            ));
        }
        if c.http_timeout_secs == 0 {
            return Err(ScrapeError::InvalidConfig(
                "HTTP timeout must be ≥ 1s".into(),
            ));
        }
        if c.text_limit == 0 {
            return Err(ScrapeError::InvalidConfig(
                "Text limit must be ≥ 1 character".into(),
            ));
        }
        if c.viewport_width == 0 || c.viewport_height == 0 {
            return Err(ScrapeError::InvalidConfig(format!(
                "Viewport must be non-zero, got {}x{}",
                c.viewport_width, c.viewport_height
            )));
        }
        if c.user_agent.trim().is_empty() {
            return Err(ScrapeError::InvalidConfig("User agent is empty".into()));
        }
        Ok(self.config)
    }
}

// ── PDF layout ───────────────────────────────────────────────────────────

const MM_PER_INCH: f64 = 25.4;

/// Convert millimetres to the inches CDP's `Page.printToPDF` expects.
pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// Paper size and margins for PDF export, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PdfLayout {
    pub paper_width_mm: f64,
    pub paper_height_mm: f64,
    pub margin_top_mm: f64,
    pub margin_right_mm: f64,
    pub margin_bottom_mm: f64,
    pub margin_left_mm: f64,
    pub print_background: bool,
}

impl PdfLayout {
    const A4_WIDTH_MM: f64 = 210.0;
    const A4_HEIGHT_MM: f64 = 297.0;

    /// A4 with 20mm top/bottom and 15mm side margins. Used by `html2pdf`.
    pub fn document() -> Self {
        Self {
            paper_width_mm: Self::A4_WIDTH_MM,
            paper_height_mm: Self::A4_HEIGHT_MM,
            margin_top_mm: 20.0,
            margin_right_mm: 15.0,
            margin_bottom_mm: 20.0,
            margin_left_mm: 15.0,
            print_background: true,
        }
    }

    /// A4 with 15mm on every side. Used by `scrape-dynamic --pdf`.
    pub fn capture() -> Self {
        Self {
            margin_top_mm: 15.0,
            margin_bottom_mm: 15.0,
            ..Self::document()
        }
    }

    pub fn paper_width_in(&self) -> f64 {
        mm_to_inches(self.paper_width_mm)
    }

    pub fn paper_height_in(&self) -> f64 {
        mm_to_inches(self.paper_height_mm)
    }
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self::document()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tool_behaviour() {
        let c = ScrapeConfig::default();
        assert_eq!(c.navigation_timeout_secs, 60);
        assert_eq!(c.settle_delay_ms, 2000);
        assert_eq!(c.http_timeout_secs, 30);
        assert_eq!(c.text_limit, 5000);
        assert_eq!((c.viewport_width, c.viewport_height), (1920, 1080));
        assert!(c.user_agent.contains("Chrome/120"));
    }

    #[test]
    fn builder_rejects_zero_timeout() {
        let err = ScrapeConfig::builder()
            .navigation_timeout_secs(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_zero_text_limit() {
        assert!(ScrapeConfig::builder().text_limit(0).build().is_err());
    }

    #[test]
    fn builder_rejects_empty_viewport() {
        let err = ScrapeConfig::builder().viewport(0, 600).build().unwrap_err();
        assert!(err.to_string().contains("0x600"));
    }

    #[test]
    fn builder_sets_chrome() {
        let c = ScrapeConfig::builder()
            .chrome_executable("/opt/chrome")
            .build()
            .unwrap();
        assert_eq!(c.chrome_executable, Some(PathBuf::from("/opt/chrome")));
    }

    #[test]
    fn layouts() {
        let doc = PdfLayout::document();
        assert_eq!(doc.margin_top_mm, 20.0);
        assert_eq!(doc.margin_left_mm, 15.0);
        let cap = PdfLayout::capture();
        assert_eq!(cap.margin_top_mm, 15.0);
        assert_eq!(cap.margin_bottom_mm, 15.0);
        assert!(cap.print_background);
        assert!((doc.paper_width_in() - 8.2677).abs() < 1e-3);
        assert!((doc.paper_height_in() - 11.6929).abs() < 1e-3);
    }
}
