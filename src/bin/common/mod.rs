//! Terminal plumbing shared by the binaries: log setup and the spinner.

use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Route `tracing` to stderr so stdout carries only the tool's output.
///
/// Library INFO logs are suppressed while the spinner is visible; the
/// spinner already says what is happening.
pub fn init_tracing(verbose: bool, quiet: bool, spinner_active: bool) {
    let filter = if verbose {
        "debug"
    } else if quiet || spinner_active {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Stderr spinner, or a hidden bar when `hidden`.
pub fn spinner(message: &str, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
