//! HTML file → PDF through headless Chromium.

use crate::config::{PdfLayout, ScrapeConfig};
use crate::error::ScrapeError;
use crate::pipeline::browser::{self, BrowserSession};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Render the local HTML file at `input` and print it to `output`.
///
/// Page setup is [`PdfLayout::document`]. `title` is accepted for callers
/// that track one but does not change the PDF. Relative resources in the
/// HTML resolve against the file's directory.
///
/// # Errors
/// - [`ScrapeError::FileNotFound`] if `input` does not exist
/// - browser launch, navigation, render and write errors
pub async fn html_to_pdf(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    title: Option<&str>,
    config: &ScrapeConfig,
) -> Result<PathBuf, ScrapeError> {
    let start = Instant::now();
    let input = input.as_ref();
    let output = output.as_ref();
    let url = browser::file_url(input)?;
    if let Some(title) = title {
        debug!(title, "Document title");
    }
    info!("Rendering {} → {}", input.display(), output.display());

    let session = BrowserSession::launch(config).await?;
    let outcome = async {
        let page = session.open(&url, Duration::ZERO).await?;
        page.save_pdf(output, &PdfLayout::document()).await
    }
    .await;
    session.close().await;
    outcome?;

    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "PDF saved: {}",
        output.display()
    );
    Ok(output.to_path_buf())
}
