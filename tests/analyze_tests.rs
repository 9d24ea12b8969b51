//! Integration tests for the analysis pipeline
//!
//! These tests use wiremock to serve pages and probe targets and run the
//! full fetch, parse, extract, probe and score cycle end-to-end.

use std::time::{Duration, Instant};
use sumi_lens::config::Config;
use sumi_lens::{analyze, FetchError, LensError, UrlError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SAMPLE_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Sumi Lens Integration Test Page Title</title>
    <meta name="description" content="A page used to exercise the whole analysis pipeline.">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta property="og:title" content="Integration">
    <meta name="twitter:card" content="summary">
    <link rel="canonical" href="/">
    <link rel="stylesheet" href="/static/site.min.css">
    <script src="/static/app.js"></script>
</head>
<body>
    <nav><a href="/">Home</a></nav>
    <h1>Integration Testing</h1>
    <p>Readable sentences make a page easy to scan. Short words help too.</p>
    <a href="/about">About</a>
    <a href="https://external.example.org/" rel="nofollow">Elsewhere</a>
    <a href="#top">Top</a>
    <img src="/img/hero-1920.jpg" alt="Hero">
    <img src="/img/logo.png">
</body>
</html>"##;

fn config_with_budget(secs: u64) -> Config {
    let mut config = Config::default();
    config.analysis.overall_timeout_secs = Some(secs);
    config
}

async fn mount_page(server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_analysis() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header_regex("user-agent", "SumiLens/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(SAMPLE_PAGE)
                .insert_header("content-type", "text/html; charset=utf-8")
                .insert_header("cache-control", "max-age=300"),
        )
        .mount(&server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let url = format!("{}/", server.uri());
    let result = analyze(&url, &config_with_budget(20)).await.unwrap();

    assert_eq!(result.url, url);
    assert_eq!(result.domain, "127.0.0.1");
    assert_eq!(result.features.outline.title, "Sumi Lens Integration Test Page Title");
    assert_eq!(result.features.outline.h1_tags, vec!["Integration Testing"]);

    let technical = &result.features.technical;
    assert_eq!(technical.status_code, 200);
    assert!(!technical.has_ssl);
    assert!(technical.has_robots_txt);
    assert!(technical.has_sitemap);
    assert_eq!(technical.sitemap_url, Some(format!("{}/sitemap.xml", server.uri())));
    assert!(technical.is_responsive);
    assert!(technical.has_valid_structured_data);
    assert_eq!(technical.lang, "en");
    assert_eq!(technical.doctype, "<!DOCTYPE html>");
    assert_eq!(
        technical.http_headers.get("cache-control").map(String::as_str),
        Some("max-age=300")
    );

    // the nav link is still a link; only content text drops nav
    let links = &result.features.links;
    assert_eq!(links.internal, 2);
    assert_eq!(links.external, 1);
    assert_eq!(links.nofollow, 1);

    let images = &result.features.images;
    assert_eq!(images.total, 2);
    assert_eq!(images.missing_alt, 1);
    assert_eq!(images.oversized, 1);

    let performance = &result.features.performance;
    assert!(performance.minified_css);
    assert!(!performance.minified_js);
    assert!(performance.cache_headers);
    // document + script + stylesheet + 2 images
    assert_eq!(performance.requests, 5);

    assert!(result.features.social_meta.has_open_graph);
    assert!(result.features.social_meta.has_twitter_cards);

    let critical: Vec<&str> = result
        .detailed_findings
        .critical_issues
        .iter()
        .map(|f| f.title.as_str())
        .collect();
    assert_eq!(critical, vec!["SSL Certificate Missing"]);

    assert!(result.scores.overall <= 100);
    assert!(result.recommendations.len() <= 12);
}

#[tokio::test]
async fn test_probe_fallback_to_second_sitemap_candidate() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        ResponseTemplate::new(200).set_body_string("<html><body><h1>Test</h1></body></html>"),
    )
    .await;

    Mock::given(method("HEAD"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/sitemap_index.xml"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let budget = 10;
    let started = Instant::now();
    let result = analyze(&server.uri(), &config_with_budget(budget))
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_secs(budget));
    assert!(!result.features.technical.has_robots_txt);
    assert!(result.features.technical.has_sitemap);
    assert!(result
        .features
        .technical
        .sitemap_url
        .as_deref()
        .is_some_and(|url| url.ends_with("/sitemap_index.xml")));
}

#[tokio::test]
async fn test_server_error_aborts_analysis() {
    let server = MockServer::start().await;
    mount_page(&server, "/", ResponseTemplate::new(500)).await;

    let result = analyze(&server.uri(), &Config::default()).await;

    assert!(matches!(
        result,
        Err(LensError::Fetch {
            source: FetchError::ServerError { status: 500 },
            ..
        })
    ));
}

/// Serves one fixed raw response per connection
async fn serve_raw(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}/", addr)
}

#[tokio::test]
async fn test_nonstandard_status_above_599_aborts_analysis() {
    let url = serve_raw(
        "HTTP/1.1 600 Odd\r\ncontent-type: text/html\r\ncontent-length: 13\r\nconnection: close\r\n\r\n<h1>odd</h1>\n",
    )
    .await;

    let result = analyze(&url, &Config::default()).await;

    assert!(matches!(
        result,
        Err(LensError::Fetch {
            source: FetchError::ServerError { status: 600 },
            ..
        })
    ));
}

#[tokio::test]
async fn test_not_found_page_is_still_analyzed() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/missing",
        ResponseTemplate::new(404).set_body_string("<html><head><title>Not Found</title></head><body><h1>404</h1></body></html>"),
    )
    .await;

    let result = analyze(&format!("{}/missing", server.uri()), &Config::default())
        .await
        .unwrap();

    assert_eq!(result.features.technical.status_code, 404);
    assert_eq!(result.features.outline.title, "Not Found");
    // no status bonus, no SSL, no probes found
    assert!(result.scores.technical <= 30);
}

#[tokio::test]
async fn test_invalid_url_is_rejected() {
    let result = analyze("mailto:someone@example.com", &Config::default()).await;
    assert!(matches!(
        result,
        Err(LensError::Validation(UrlError::InvalidScheme(_)))
    ));

    let result = analyze("https://", &Config::default()).await;
    assert!(matches!(result, Err(LensError::Validation(_))));
}

#[tokio::test]
async fn test_overall_budget_exceeded() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        ResponseTemplate::new(200)
            .set_body_string("<html><body>slow</body></html>")
            .set_delay(Duration::from_secs(5)),
    )
    .await;

    let started = Instant::now();
    let result = analyze(&server.uri(), &config_with_budget(1)).await;

    assert!(matches!(
        result,
        Err(LensError::Timeout { budget_secs: 1, .. })
    ));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_redirects_are_followed() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/old",
        ResponseTemplate::new(301).insert_header("location", "/new/"),
    )
    .await;
    mount_page(
        &server,
        "/new/",
        ResponseTemplate::new(200).set_body_string(
            r#"<html><body><a href="page">Relative</a><a href="https://other.org/">Out</a></body></html>"#,
        ),
    )
    .await;

    let result = analyze(&format!("{}/old", server.uri()), &Config::default())
        .await
        .unwrap();

    assert_eq!(result.url, format!("{}/old", server.uri()));
    assert_eq!(result.final_url, format!("{}/new/", server.uri()));
    assert_eq!(result.features.links.internal, 1);
    assert_eq!(result.features.links.external, 1);
}

#[tokio::test]
async fn test_redirect_budget_exceeded() {
    let server = MockServer::start().await;
    mount_page(&server, "/a", ResponseTemplate::new(302).insert_header("location", "/b")).await;
    mount_page(&server, "/b", ResponseTemplate::new(302).insert_header("location", "/c")).await;
    mount_page(&server, "/c", ResponseTemplate::new(200).set_body_string("<p>end</p>")).await;

    let mut config = Config::default();
    config.fetch.max_redirects = 1;

    let result = analyze(&format!("{}/a", server.uri()), &config).await;
    assert!(matches!(
        result,
        Err(LensError::Fetch {
            source: FetchError::Redirect(_),
            ..
        })
    ));
}

#[tokio::test]
async fn test_json_report_shape() {
    let server = MockServer::start().await;
    mount_page(&server, "/", ResponseTemplate::new(200).set_body_string(SAMPLE_PAGE)).await;

    let result = analyze(&server.uri(), &Config::default()).await.unwrap();
    let json = sumi_lens::output::render(&result, sumi_lens::output::ReportFormat::Json, false)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["title"], "Sumi Lens Integration Test Page Title");
    assert_eq!(value["technicalSeo"]["hasSSL"], false);
    assert_eq!(value["technicalSeo"]["statusCode"], 200);
    assert!(value["pageContent"]["wordCount"].as_u64().unwrap() > 0);
    assert!(value["detailedFindings"]["criticalIssues"].is_array());
    assert!(value["scores"]["overall"].as_u64().unwrap() <= 100);
}
