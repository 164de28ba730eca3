//! Headless Chromium session: launch, load a page to network idle, export.
//!
//! One [`BrowserSession`] owns one Chromium process and the task that pumps
//! its CDP event handler. Callers open pages through it and must call
//! [`BrowserSession::close`] on every path; dropping the session kills the
//! process but leaves the handler task to notice on its own.
//!
//! ## Network idle
//!
//! CDP has no "wait for network idle" command. Chrome does emit a
//! `networkIdle` page lifecycle event (no requests for 500ms), so the page
//! subscribes to lifecycle events *before* navigating and waits for
//! `networkIdle` carrying the loader id that `Page.navigate` returned. Idle
//! events from any other loader, such as the initial `about:blank`, are
//! ignored even when they arrive first.

use crate::config::{mm_to_inches, PdfLayout, ScrapeConfig};
use crate::error::ScrapeError;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    EventLifecycleEvent, NavigateParams, PrintToPdfParams, SetLifecycleEventsEnabledParams,
};
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const LIFECYCLE_NETWORK_IDLE: &str = "networkIdle";

/// A running headless browser.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    navigation_timeout: Duration,
}

impl BrowserSession {
    /// Launch Chromium with the configured user agent and viewport.
    pub async fn launch(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(config.viewport_width, config.viewport_height)
            .viewport(Viewport {
                width: config.viewport_width,
                height: config.viewport_height,
                ..Viewport::default()
            })
            .request_timeout(Duration::from_secs(config.navigation_timeout_secs))
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg(format!("--user-agent={}", config.user_agent));

        if let Some(ref path) = config.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        let browser_config = builder.build().map_err(ScrapeError::BrowserLaunch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScrapeError::BrowserLaunch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler error: {e}");
                }
            }
        });

        info!("Headless browser launched");

        Ok(Self {
            browser,
            handler,
            navigation_timeout: Duration::from_secs(config.navigation_timeout_secs),
        })
    }

    /// Navigate a fresh page to `url`, wait for network idle, then `settle`.
    pub async fn open(&self, url: &str, settle: Duration) -> Result<RenderedPage, ScrapeError> {
        let nav_err = |detail: String| ScrapeError::Navigation {
            url: url.to_string(),
            detail,
        };

        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| nav_err(e.to_string()))?;

        page.execute(SetLifecycleEventsEnabledParams::new(true))
            .await
            .map_err(|e| nav_err(e.to_string()))?;
        let mut lifecycle = page
            .event_listener::<EventLifecycleEvent>()
            .await
            .map_err(|e| nav_err(e.to_string()))?;

        debug!(url = %url, "Navigating");
        let load = async {
            let nav = page
                .execute(NavigateParams::new(url))
                .await
                .map_err(|e| nav_err(e.to_string()))?
                .result;
            if let Some(error_text) = nav.error_text {
                return Err(nav_err(error_text));
            }
            // Same-document navigation: no new loader, nothing to wait for.
            let Some(loader_id) = nav.loader_id else {
                return Ok(());
            };

            while let Some(event) = lifecycle.next().await {
                if event.name == LIFECYCLE_NETWORK_IDLE && event.loader_id == loader_id {
                    return Ok(());
                }
            }
            Err::<(), ScrapeError>(nav_err("page closed before network idle".into()))
        };

        match tokio::time::timeout(self.navigation_timeout, load).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => {
                return Err(ScrapeError::NavigationTimeout {
                    url: url.to_string(),
                    secs: self.navigation_timeout.as_secs(),
                })
            }
        }

        if !settle.is_zero() {
            debug!(ms = settle.as_millis() as u64, "Settling");
            tokio::time::sleep(settle).await;
        }

        info!("Loaded: {}", url);
        Ok(RenderedPage {
            page,
            url: url.to_string(),
        })
    }

    /// Close the browser and stop the handler task. Never fails; problems are logged.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to reap browser process: {e}");
        }
        self.handler.abort();
        debug!("Browser closed");
    }
}

/// A page that finished loading.
pub struct RenderedPage {
    page: Page,
    url: String,
}

impl RenderedPage {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Serialized DOM, including client-rendered content.
    pub async fn content(&self) -> Result<String, ScrapeError> {
        self.page
            .content()
            .await
            .map_err(|e| ScrapeError::render("content", e))
    }

    pub async fn title(&self) -> Result<String, ScrapeError> {
        Ok(self
            .page
            .get_title()
            .await
            .map_err(|e| ScrapeError::render("title", e))?
            .unwrap_or_default())
    }

    /// `document.body.innerText`, or empty when the document has no body.
    pub async fn inner_text(&self) -> Result<String, ScrapeError> {
        self.page
            .evaluate("document.body ? document.body.innerText : ''")
            .await
            .map_err(|e| ScrapeError::render("innerText", e))?
            .into_value::<String>()
            .map_err(|e| ScrapeError::render("innerText", e))
    }

    /// Print to PDF with `layout` and write it to `path`.
    pub async fn save_pdf(&self, path: &Path, layout: &PdfLayout) -> Result<(), ScrapeError> {
        let params = PrintToPdfParams::builder()
            .paper_width(layout.paper_width_in())
            .paper_height(layout.paper_height_in())
            .margin_top(mm_to_inches(layout.margin_top_mm))
            .margin_right(mm_to_inches(layout.margin_right_mm))
            .margin_bottom(mm_to_inches(layout.margin_bottom_mm))
            .margin_left(mm_to_inches(layout.margin_left_mm))
            .print_background(layout.print_background)
            .build();

        let bytes = self
            .page
            .pdf(params)
            .await
            .map_err(|e| ScrapeError::render("pdf", e))?;
        write_output(path, &bytes).await?;
        info!(bytes = bytes.len(), "PDF written: {}", path.display());
        Ok(())
    }

    /// PNG screenshot; `full_page` captures the whole scrollable document.
    pub async fn save_screenshot(&self, path: &Path, full_page: bool) -> Result<(), ScrapeError> {
        let params = ScreenshotParams::builder().full_page(full_page).build();
        let bytes = self
            .page
            .screenshot(params)
            .await
            .map_err(|e| ScrapeError::render("screenshot", e))?;
        write_output(path, &bytes).await?;
        info!(bytes = bytes.len(), full_page, "Screenshot written: {}", path.display());
        Ok(())
    }
}

async fn write_output(path: &Path, bytes: &[u8]) -> Result<(), ScrapeError> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| ScrapeError::OutputWriteFailed {
            path: path.to_path_buf(),
            source,
        })
}

/// `file://` URL for a local HTML file. The file must exist.
pub fn file_url(path: &Path) -> Result<String, ScrapeError> {
    let absolute = std::fs::canonicalize(path).map_err(|_| ScrapeError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    reqwest::Url::from_file_path(&absolute)
        .map(|u| u.to_string())
        .map_err(|()| ScrapeError::InvalidUrl {
            input: absolute.display().to_string(),
            reason: "cannot be expressed as a file:// URL".into(),
        })
}
