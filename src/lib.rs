//! # scrapekit
//!
//! Turn web pages into structured JSON, and HTML files into PDFs.
//!
//! ## Three tools, one library
//!
//! ```text
//! scrape-static   URL ─▶ HTTP GET ─▶ block check ─▶ title / fragment / text
//! scrape-dynamic  URL ─▶ Chromium ─▶ network idle + settle ─▶ block check
//!                                    ─▶ [PDF] [screenshot] ─▶ innerText
//! html2pdf        file ─▶ Chromium ─▶ network idle ─▶ A4 PDF
//! ```
//!
//! Both scrapers return a [`ScrapeResult`]. When a page turns out to be a
//! captcha or verification wall the result is a failure with
//! `needs_upgrade = true`: the strategy that produced it could not get the
//! real page, and a more capable one should be tried (static → dynamic →
//! something outside this crate).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scrapekit::{scrape_static, ScrapeConfig, ScrapeResult};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ScrapeConfig::default();
//!     match scrape_static("https://example.com", &config).await? {
//!         ScrapeResult::Success(page) => println!("{}: {}", page.title, page.text),
//!         ScrapeResult::Failure(f) => eprintln!("blocked: {}", f.error),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `html2pdf`, `scrape-dynamic` and `scrape-static` binaries |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod scrape;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{PdfLayout, ScrapeConfig, ScrapeConfigBuilder};
pub use convert::html_to_pdf;
pub use error::ScrapeError;
pub use output::{ScrapeFailure, ScrapeResult, ScrapeSuccess};
pub use pipeline::extract::analyze_html;
pub use scrape::{save_result, scrape_dynamic, scrape_static, CaptureOptions};
