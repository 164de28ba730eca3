//! CLI binary: scrape a URL with headless Chromium.
//!
//! Prints the result as indented JSON, or writes it to `--output`. Failures
//! (including browser errors) are reported in the JSON, not via exit code.

mod common;

use anyhow::{Context, Result};
use clap::Parser;
use scrapekit::{save_result, scrape_dynamic, CaptureOptions, ScrapeConfig};
use std::path::PathBuf;

const AFTER_HELP: &str = r#"EXAMPLES:
  # JSON to stdout
  scrape-dynamic https://example.com

  # Also keep a PDF and a full-page screenshot
  scrape-dynamic https://example.com --pdf page.pdf --screenshot page.png

  # JSON to a file
  scrape-dynamic https://example.com -o result.json

RESULT:
  success        true / false
  title, html, text, content_length, pdf, screenshot     (on success)
  error, needs_upgrade, screenshot                       (on failure)

  text is cut at 5000 characters with a "..." marker; content_length is the
  full length. When a page is a captcha / verification wall, --screenshot
  captures the wall instead.

ENVIRONMENT VARIABLES:
  SCRAPEKIT_CHROME   Path to a Chrome/Chromium executable
  RUST_LOG           Log filter override (logs go to stderr)
"#;

/// Scrape a web page with headless Chromium.
#[derive(Parser, Debug)]
#[command(
    name = "scrape-dynamic",
    version,
    about = "Dynamic web scraper using headless Chromium",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// URL to scrape.
    url: String,

    /// Write a PDF of the page here.
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// Write a full-page PNG screenshot here.
    #[arg(long)]
    screenshot: Option<PathBuf>,

    /// Write JSON to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Chrome/Chromium executable. Auto-detected if unset.
    #[arg(long, env = "SCRAPEKIT_CHROME")]
    chrome: Option<PathBuf>,

    /// Navigation + network-idle timeout in seconds.
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Extra wait after network idle, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    settle_ms: u64,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress everything except errors and the result.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let show_spinner = !cli.quiet && !cli.verbose;
    common::init_tracing(cli.verbose, cli.quiet, show_spinner);

    let mut builder = ScrapeConfig::builder()
        .navigation_timeout_secs(cli.timeout)
        .settle_delay_ms(cli.settle_ms);
    if let Some(ref chrome) = cli.chrome {
        builder = builder.chrome_executable(chrome);
    }
    let config = builder.build().context("Invalid configuration")?;

    let capture = CaptureOptions {
        pdf: cli.pdf.clone(),
        screenshot: cli.screenshot.clone(),
    };

    let spinner = common::spinner(&format!("Loading {}", cli.url), !show_spinner);
    let result = scrape_dynamic(&cli.url, &config, &capture).await;
    spinner.finish_and_clear();

    if let Some(ref path) = cli.output {
        save_result(&result, path)
            .await
            .context("Failed to write JSON output")?;
        println!("Output saved to: {}", path.display());
    } else {
        let json = result.to_json_pretty().context("Failed to serialise result")?;
        println!("{json}");
    }

    Ok(())
}
