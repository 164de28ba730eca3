//! CLI binary: scrape a URL with one plain HTTP request.
//!
//! Block pages are reported in the JSON with `needs_upgrade: true`; retry
//! those with `scrape-dynamic`. Network and HTTP-status errors exit nonzero.

mod common;

use anyhow::{Context, Result};
use clap::Parser;
use scrapekit::{save_result, scrape_static, ScrapeConfig};
use std::path::PathBuf;

/// Scrape a web page over plain HTTP.
#[derive(Parser, Debug)]
#[command(
    name = "scrape-static",
    version,
    about = "Static web scraper: one HTTP GET plus regex extraction",
    long_about = "Static web scraper: one HTTP GET plus regex extraction.\n\n\
Takes only the URL and an optional output file. The flags tune the request \
timeout and logging; they never change what is scraped or the JSON shape.",
    arg_required_else_help = true
)]
struct Cli {
    /// URL to scrape.
    url: String,

    /// Write JSON to this file instead of stdout.
    output_file: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

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

    let config = ScrapeConfig::builder()
        .http_timeout_secs(cli.timeout)
        .build()
        .context("Invalid configuration")?;

    let spinner = common::spinner(&format!("Fetching {}", cli.url), !show_spinner);
    let result = scrape_static(&cli.url, &config).await;
    spinner.finish_and_clear();
    let result = result.with_context(|| format!("Failed to scrape {}", cli.url))?;

    if let Some(ref path) = cli.output_file {
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_takes_url_and_optional_output() {
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from(["scrape-static", "https://example.com", "out.json"]).unwrap();
        assert_eq!(cli.url, "https://example.com");
        assert_eq!(cli.output_file, Some(PathBuf::from("out.json")));
        assert_eq!(cli.timeout, 30);

        let cli = Cli::try_parse_from(["scrape-static", "https://example.com"]).unwrap();
        assert!(cli.output_file.is_none());
    }

    #[test]
    fn long_help_describes_ambient_flags() {
        let about = Cli::command()
            .get_long_about()
            .map(|s| s.to_string())
            .unwrap_or_default();
        assert!(about.contains("optional output file"));
        assert!(about.contains("timeout and logging"));
    }
}
