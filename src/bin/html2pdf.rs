//! CLI binary: render a local HTML file to PDF with headless Chromium.

mod common;

use anyhow::{Context, Result};
use clap::Parser;
use scrapekit::{html_to_pdf, ScrapeConfig};
use std::path::PathBuf;

const AFTER_HELP: &str = r#"EXAMPLES:
  # A4, 20mm top/bottom and 15mm side margins, backgrounds printed
  html2pdf article.html article.pdf

  # Use a specific Chromium build
  html2pdf --chrome /opt/chrome/chrome report.html report.pdf

ENVIRONMENT VARIABLES:
  SCRAPEKIT_CHROME   Path to a Chrome/Chromium executable
  RUST_LOG           Log filter override (logs go to stderr)
"#;

/// Convert a local HTML file to PDF.
#[derive(Parser, Debug)]
#[command(
    name = "html2pdf",
    version,
    about = "Convert a local HTML file to PDF using headless Chromium",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input HTML file path.
    input: PathBuf,

    /// Output PDF file path.
    output: PathBuf,

    /// Document title (recorded in logs; the PDF is not changed).
    #[arg(long)]
    title: Option<String>,

    /// Chrome/Chromium executable. Auto-detected if unset.
    #[arg(long, env = "SCRAPEKIT_CHROME")]
    chrome: Option<PathBuf>,

    /// Page load timeout in seconds.
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress everything except errors and the final line.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let show_spinner = !cli.quiet && !cli.verbose;
    common::init_tracing(cli.verbose, cli.quiet, show_spinner);

    let mut builder = ScrapeConfig::builder().navigation_timeout_secs(cli.timeout);
    if let Some(ref chrome) = cli.chrome {
        builder = builder.chrome_executable(chrome);
    }
    let config = builder.build().context("Invalid configuration")?;

    let spinner = common::spinner(
        &format!("Rendering {}", cli.input.display()),
        !show_spinner,
    );
    let result = html_to_pdf(&cli.input, &cli.output, cli.title.as_deref(), &config).await;
    spinner.finish_and_clear();

    let saved = result.context("Conversion failed")?;
    println!("PDF saved: {}", saved.display());
    Ok(())
}
