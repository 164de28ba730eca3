//! Scraping entry points.
//!
//! ## Static vs. dynamic
//!
//! [`scrape_static`] is one HTTP request and some regexes: fast, but blind
//! to client-rendered content and easy for anti-bot walls to spot. When it
//! reports `needs_upgrade`, retry with [`scrape_dynamic`], which drives a
//! real headless browser.
//!
//! The two also differ in how they report trouble. `scrape_static` returns
//! `Err` for transport and HTTP-status failures. `scrape_dynamic` never
//! does: every error becomes a [`ScrapeFailure`] so callers handle one
//! shape.

use crate::config::{PdfLayout, ScrapeConfig};
use crate::error::ScrapeError;
use crate::output::{ScrapeFailure, ScrapeResult, ScrapeSuccess};
use crate::pipeline::browser::{BrowserSession, RenderedPage};
use crate::pipeline::{detect, extract, fetch};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Optional artefacts written by [`scrape_dynamic`].
#[derive(Debug, Clone, Default)]
pub struct CaptureOptions {
    /// Write an A4 PDF of the page here.
    pub pdf: Option<PathBuf>,
    /// Write a full-page PNG here (a viewport PNG if the page is blocked).
    pub screenshot: Option<PathBuf>,
}

/// Fetch `url` over plain HTTP and extract its content.
///
/// # Errors
/// Returns `Err(ScrapeError)` for invalid URLs, connection failures,
/// timeouts and non-2xx statuses. Block pages are *not* errors: they come
/// back as `Ok(ScrapeResult::Failure)` with `needs_upgrade = true`.
pub async fn scrape_static(url: &str, config: &ScrapeConfig) -> Result<ScrapeResult, ScrapeError> {
    let start = Instant::now();
    let html = fetch::fetch_html(url, config).await?;
    let result = extract::analyze_html(&html, config.text_limit);
    info!(
        success = result.is_success(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Static scrape finished: {}",
        url
    );
    Ok(result)
}

/// Render `url` in headless Chromium and extract its content.
///
/// The browser is always closed before returning. Any error (launch,
/// navigation, timeout, export) is folded into a failure with
/// `needs_upgrade = true`.
pub async fn scrape_dynamic(
    url: &str,
    config: &ScrapeConfig,
    capture: &CaptureOptions,
) -> ScrapeResult {
    let start = Instant::now();

    let result = match BrowserSession::launch(config).await {
        Ok(session) => {
            let settle = Duration::from_millis(config.settle_delay_ms);
            let outcome = match session.open(url, settle).await {
                Ok(page) => read_page(&page, config, capture).await,
                Err(e) => Err(e),
            };
            session.close().await;
            outcome.unwrap_or_else(|e| ScrapeFailure::from(e).into())
        }
        Err(e) => ScrapeFailure::from(e).into(),
    };

    if let Some(f) = result.as_failure() {
        warn!(error = %f.error, "Dynamic scrape failed: {}", url);
    }
    info!(
        success = result.is_success(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Dynamic scrape finished: {}",
        url
    );
    result
}

async fn read_page(
    page: &RenderedPage,
    config: &ScrapeConfig,
    capture: &CaptureOptions,
) -> Result<ScrapeResult, ScrapeError> {
    let content = page.content().await?;
    let title = page.title().await?;

    if let Some(indicator) = detect::detect_rendered(&content) {
        warn!(indicator = indicator.label, "Block page detected: {}", page.url());
        let mut failure = ScrapeFailure::blocked(indicator.label);
        if let Some(ref path) = capture.screenshot {
            match page.save_screenshot(path, false).await {
                Ok(()) => failure.screenshot = Some(path.clone()),
                Err(e) => warn!("Block page screenshot failed: {e}"),
            }
        }
        return Ok(failure.into());
    }

    if let Some(ref path) = capture.pdf {
        page.save_pdf(path, &PdfLayout::capture()).await?;
    }
    if let Some(ref path) = capture.screenshot {
        page.save_screenshot(path, true).await?;
    }

    let inner = page.inner_text().await?;
    let (text, content_length) = extract::truncate_text(&inner, config.text_limit);

    Ok(ScrapeSuccess {
        title,
        html: content,
        text,
        content_length,
        full_html: None,
        pdf: capture.pdf.clone(),
        screenshot: capture.screenshot.clone(),
    }
    .into())
}

/// Write a result as pretty JSON to `path`.
pub async fn save_result(result: &ScrapeResult, path: &Path) -> Result<(), ScrapeError> {
    result.write_json(path).await?;
    info!("Result written: {}", path.display());
    Ok(())
}
