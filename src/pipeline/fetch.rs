//! Static fetch: one HTTP GET dressed up as a desktop browser.
//!
//! No retries. A non-2xx status is an error, not a result: the static tool
//! has nothing useful to report about a 404 page.

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT};
use std::time::Duration;
use tracing::{debug, info};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Headers sent with every static fetch.
///
/// `Accept-Encoding` is absent on purpose: reqwest adds it itself when its
/// decompression features are on, and only then decodes the body.
pub fn browser_headers(config: &ScrapeConfig) -> Result<HeaderMap, ScrapeError> {
    let value = |name: &str, v: &str| {
        HeaderValue::from_str(v)
            .map_err(|e| ScrapeError::InvalidConfig(format!("Bad {name} header value: {e}")))
    };

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, value("User-Agent", &config.user_agent)?);
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(
        ACCEPT_LANGUAGE,
        value("Accept-Language", &config.accept_language)?,
    );
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    Ok(headers)
}

/// Check that `url` is absolute http(s).
pub fn parse_http_url(url: &str) -> Result<reqwest::Url, ScrapeError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| ScrapeError::InvalidUrl {
        input: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ScrapeError::InvalidUrl {
            input: url.to_string(),
            reason: format!("unsupported scheme '{other}', expected http or https"),
        }),
    }
}

/// GET `url` and return the decoded body.
pub async fn fetch_html(url: &str, config: &ScrapeConfig) -> Result<String, ScrapeError> {
    let parsed = parse_http_url(url)?;
    info!("Fetching: {}", parsed);

    let client = reqwest::Client::builder()
        .default_headers(browser_headers(config)?)
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .map_err(|e| ScrapeError::Http {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let map_send_err = |e: reqwest::Error| {
        if e.is_timeout() {
            ScrapeError::HttpTimeout {
                url: url.to_string(),
                secs: config.http_timeout_secs,
            }
        } else {
            ScrapeError::Http {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    };

    let response = client.get(parsed).send().await.map_err(map_send_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(map_send_err)?;
    debug!(status = status.as_u16(), bytes = body.len(), "Fetched body");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_look_like_a_browser() {
        let headers = browser_headers(&ScrapeConfig::default()).unwrap();
        assert!(headers[USER_AGENT].to_str().unwrap().contains("Chrome/120"));
        assert_eq!(headers[ACCEPT], ACCEPT_HTML);
        assert_eq!(headers[ACCEPT_LANGUAGE], "zh-CN,zh;q=0.9,en;q=0.8");
        assert_eq!(headers[CONNECTION], "keep-alive");
        assert!(headers.get(reqwest::header::ACCEPT_ENCODING).is_none());
    }

    #[test]
    fn bad_header_value_is_config_error() {
        let config = ScrapeConfig {
            user_agent: "bad\nagent".into(),
            ..ScrapeConfig::default()
        };
        assert!(matches!(
            browser_headers(&config),
            Err(ScrapeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn url_validation() {
        assert!(parse_http_url("https://mp.weixin.qq.com/s/abc").is_ok());
        assert!(parse_http_url("http://localhost:8080/").is_ok());
        assert!(matches!(
            parse_http_url("ftp://example.com"),
            Err(ScrapeError::InvalidUrl { .. })
        ));
        assert!(parse_http_url("not a url").is_err());
        assert!(parse_http_url("").is_err());
    }
}
