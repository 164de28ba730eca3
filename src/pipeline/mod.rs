//! Building blocks shared by the three tools.
//!
//! ## Data Flow
//!
//! ```text
//! static:   fetch ──▶ detect (regex) ──▶ extract
//! dynamic:  browser ──▶ detect (tokens) ──▶ pdf / screenshot / innerText
//! html2pdf: browser (file://) ──▶ pdf
//! ```
//!
//! 1. [`fetch`]   — one HTTP GET with browser-like headers
//! 2. [`browser`] — headless Chromium session, network-idle navigation, export
//! 3. [`detect`]  — captcha / verification / rate-limit page classifier
//! 4. [`extract`] — title, content fragment and plain text from raw HTML

pub mod browser;
pub mod detect;
pub mod extract;
pub mod fetch;
