//! Error types for the scrapekit library.
//!
//! Two distinct failure shapes reflect two distinct audiences:
//!
//! * [`ScrapeError`] — **Operational**: something went wrong driving the
//!   browser, the network, or the file system. Returned as `Err` from
//!   [`crate::scrape_static`] and [`crate::html_to_pdf`].
//!
//! * [`crate::output::ScrapeFailure`] — **Classified**: the page was reached
//!   but turned out to be a captcha / verification wall. Always returned
//!   inside a [`crate::output::ScrapeResult`], never as `Err`.
//!
//! [`crate::scrape_dynamic`] folds every `ScrapeError` into a
//! `ScrapeFailure` so browser callers only ever see one shape.

use std::path::PathBuf;
use thiserror::Error;

/// All operational errors returned by the scrapekit library.
#[derive(Debug, Error)]
pub enum ScrapeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input HTML file was not found at the given path.
    #[error("HTML file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// The input string is not a usable URL.
    #[error("Invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    // ── Browser errors ────────────────────────────────────────────────────
    /// Chromium could not be started.
    #[error(
        "Failed to launch Chromium: {0}\n\n\
Install Chrome or Chromium, or point at an existing binary with\n\
  --chrome /path/to/chrome   (or SCRAPEKIT_CHROME=/path/to/chrome)\n"
    )]
    BrowserLaunch(String),

    /// The page could not be opened or navigation failed.
    #[error("Navigation to '{url}' failed: {detail}")]
    Navigation { url: String, detail: String },

    /// Navigation plus network-idle wait exceeded the configured timeout.
    #[error("Timeout {}ms exceeded while loading '{url}'", .secs * 1000)]
    NavigationTimeout { url: String, secs: u64 },

    /// A CDP call against a loaded page failed (content, PDF, screenshot).
    #[error("Rendering failed ({op}): {detail}")]
    Render { op: &'static str, detail: String },

    // ── HTTP errors ───────────────────────────────────────────────────────
    /// Connection / protocol failure on the static fetch.
    #[error("Failed to fetch '{url}': {reason}")]
    Http { url: String, reason: String },

    /// The static fetch exceeded its timeout.
    #[error("Request to '{url}' timed out after {secs}s")]
    HttpTimeout { url: String, secs: u64 },

    /// Server answered with a non-success status.
    #[error("HTTP {status} for url '{url}'")]
    HttpStatus { url: String, status: u16 },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file (JSON, PDF, PNG).
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Result could not be encoded as JSON.
    #[error("Failed to serialise result: {0}")]
    Serialize(#[from] serde_json::Error),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ScrapeError {
    pub(crate) fn render(op: &'static str, err: impl std::fmt::Display) -> Self {
        ScrapeError::Render {
            op,
            detail: err.to_string(),
        }
    }
}
