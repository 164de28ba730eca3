//! Integration tests for the static scrape pipeline.
//!
//! Each test serves canned HTML from a local wiremock server, so no network
//! access is needed.

use scrapekit::{scrape_static, ScrapeConfig, ScrapeError, ScrapeResult};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Test helpers ─────────────────────────────────────────────────────────────

async fn serve(route: &str, status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;
    server
}

const WECHAT_ARTICLE: &str = r#"<!DOCTYPE html>
<html>
<head><title>微信公众平台</title></head>
<body>
<script>var msg_title = '一篇文章';</script>
<div class="rich_media_content" id="js_content">
  <p>第一段&amp;内容</p>
  <img data-src="https://mmbiz.example/1.jpg">
  <p>第二段</p>
</div>
<script>var other = 1;</script>
</body>
</html>"#;

// ── Success path ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_wechat_article_extraction() {
    let server = serve("/s/article", 200, WECHAT_ARTICLE).await;
    let url = format!("{}/s/article", server.uri());

    let result = scrape_static(&url, &ScrapeConfig::default())
        .await
        .expect("scrape should succeed");

    let page = result.as_success().expect("not blocked");
    assert_eq!(page.title, "一篇文章");
    assert_eq!(page.text, "第一段&内容 第二段");
    assert_eq!(page.content_length, page.text.chars().count());
    assert!(page.html.contains(r#"src="https://mmbiz.example/1.jpg""#));
    assert!(!page.html.contains("data-src"));
    assert_eq!(page.full_html.as_deref(), Some(WECHAT_ARTICLE));
    assert!(page.pdf.is_none());
}

#[tokio::test]
async fn test_generic_page_falls_back_to_whole_document() {
    let body = "<title>Hi</title><body>Hello&nbsp;World</body>";
    let server = serve("/", 200, body).await;

    let result = scrape_static(&server.uri(), &ScrapeConfig::default())
        .await
        .unwrap();

    let page = result.as_success().unwrap();
    assert_eq!(page.title, "Hi");
    assert_eq!(page.text, "Hello World");
    assert_eq!(page.content_length, 11);
    assert_eq!(page.html, body);
}

#[tokio::test]
async fn test_browser_headers_are_sent() {
    let server = serve("/", 200, "<title>ok</title>").await;

    let result = scrape_static(&server.uri(), &ScrapeConfig::default())
        .await
        .unwrap();
    assert!(result.is_success());

    let requests = server.received_requests().await.expect("recording is on");
    assert_eq!(requests.len(), 1);
    let headers = &requests[0].headers;
    let get = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    assert!(get("user-agent").contains("Chrome/120.0.0.0"));
    assert_eq!(get("accept-language"), "zh-CN,zh;q=0.9,en;q=0.8");
    assert!(get("accept").starts_with("text/html,application/xhtml+xml"));
    assert!(get("accept-encoding").contains("gzip"));
}

#[tokio::test]
async fn test_text_limit_from_config() {
    let body = format!("<body>{}</body>", "a".repeat(50));
    let server = serve("/", 200, &body).await;
    let config = ScrapeConfig::builder().text_limit(10).build().unwrap();

    let result = scrape_static(&server.uri(), &config).await.unwrap();
    let page = result.as_success().unwrap();
    assert_eq!(page.text, format!("{}...", "a".repeat(10)));
    assert_eq!(page.content_length, 50);
}

#[tokio::test]
async fn test_same_html_same_result() {
    let server = serve("/s/article", 200, WECHAT_ARTICLE).await;
    let url = format!("{}/s/article", server.uri());
    let config = ScrapeConfig::default();

    let first = scrape_static(&url, &config).await.unwrap();
    let second = scrape_static(&url, &config).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.to_json_pretty().unwrap(),
        second.to_json_pretty().unwrap()
    );
}

// ── Block pages ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_captcha_page_needs_upgrade() {
    let server = serve(
        "/",
        200,
        r#"<html><body><div class="captcha"><img src="/c.png"></div></body></html>"#,
    )
    .await;

    let result = scrape_static(&server.uri(), &ScrapeConfig::default())
        .await
        .unwrap();

    match result {
        ScrapeResult::Failure(f) => {
            assert!(f.needs_upgrade);
            assert_eq!(f.error, "Blocked by anti-bot protection (detected: captcha)");
            assert!(f.screenshot.is_none());
        }
        ScrapeResult::Success(_) => panic!("captcha page should be blocked"),
    }
}

#[tokio::test]
async fn test_verification_wall_json_shape() {
    let server = serve(
        "/",
        200,
        "<html><head><title>验证</title></head><body>当前环境异常，完成验证后即可继续访问</body></html>",
    )
    .await;

    let result = scrape_static(&server.uri(), &ScrapeConfig::default())
        .await
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&result.to_json_pretty().unwrap()).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["needs_upgrade"], true);
    assert_eq!(
        json["error"],
        "Blocked by anti-bot protection (detected: 环境异常验证页)"
    );
    assert!(json.get("title").is_none());
    assert!(json.get("full_html").is_none());
}

// ── Errors ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_http_error_status_is_err() {
    let server = serve("/gone", 404, "not here").await;
    let url = format!("{}/gone", server.uri());

    let err = scrape_static(&url, &ScrapeConfig::default())
        .await
        .unwrap_err();
    match err {
        ScrapeError::HttpStatus { status, .. } => assert_eq!(status, 404),
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_err() {
    // Bind then drop a listener so the port is (almost certainly) closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let err = scrape_static(&format!("http://127.0.0.1:{port}/"), &ScrapeConfig::default())
        .await
        .unwrap_err();
    assert!(
        matches!(err, ScrapeError::Http { .. }),
        "expected Http, got {err:?}"
    );
}

#[tokio::test]
async fn test_invalid_url_is_err() {
    let err = scrape_static("file:///etc/passwd", &ScrapeConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::InvalidUrl { .. }));
}
