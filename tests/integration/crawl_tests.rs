//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end over real HTTP.

use lemme_scrape::config::{Config, CrawlerConfig};
use lemme_scrape::crawler::{Crawler, Fetcher, HttpFetcher, RunContext};
use lemme_scrape::{CrawlError, FetchError};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with short timeouts
fn create_test_config(max_concurrency: usize, run_timeout_ms: u64, job_timeout_ms: u64) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_concurrency,
            run_timeout_ms,
            job_timeout_ms,
        },
        ..Config::default()
    }
}

fn html_page(title: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, body
        ))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_end_to_end_filters_links_and_fetches_in_scope() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // One off-origin link, one duplicate, one unique in-origin link
    mount_page(
        &mock_server,
        "/",
        html_page(
            "T",
            r#"<a href="https://other-origin.test/x">Elsewhere</a>
               <a href="/page">Page</a>
               <a href="/page">Page again</a>"#,
        ),
    )
    .await;
    mount_page(&mock_server, "/page", html_page("Linked Page", "content")).await;

    let config = create_test_config(4, 10_000, 2_000);
    let crawler = Crawler::from_config(&config).expect("Failed to build crawler");

    let outcome = crawler
        .crawl(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.seed_title, "T");
    assert_eq!(outcome.links.len(), 1);
    assert_eq!(outcome.links.as_slice(), [format!("{}/page", base_url)]);
    assert_eq!(outcome.report.ok, 1);
    assert_eq!(outcome.report.fail, 0);
    assert_eq!(outcome.report.results[0].title(), Some("Linked Page"));
}

#[tokio::test]
async fn test_mixed_outcomes_are_all_reported() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            r#"<a href="/ok">ok</a>
               <a href="/missing">missing</a>
               <a href="/broken">broken</a>
               <a href="/slow">slow</a>"#,
        ),
    )
    .await;
    mount_page(&mock_server, "/ok", html_page("Fine", "")).await;
    mount_page(&mock_server, "/missing", ResponseTemplate::new(404)).await;
    mount_page(&mock_server, "/broken", ResponseTemplate::new(500)).await;
    mount_page(
        &mock_server,
        "/slow",
        html_page("Too Slow", "").set_delay(Duration::from_secs(3)),
    )
    .await;

    let config = create_test_config(2, 10_000, 300);
    let crawler = Crawler::from_config(&config).expect("Failed to build crawler");

    let outcome = crawler
        .crawl(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.links.len(), 4);
    assert_eq!(outcome.report.ok, 1);
    assert_eq!(outcome.report.fail, 3);
    assert_eq!(outcome.report.ok + outcome.report.fail, outcome.links.len());

    // Arrival order is not stable; compare as sets
    let urls: HashSet<_> = outcome.report.results.iter().map(|r| r.url.clone()).collect();
    let expected: HashSet<_> = outcome.links.iter().cloned().collect();
    assert_eq!(urls, expected);

    let errors: Vec<_> = outcome.report.failures().filter_map(|r| r.error()).collect();
    assert!(errors
        .iter()
        .any(|e| matches!(e, FetchError::BadStatus { status: 404, .. })));
    assert!(errors
        .iter()
        .any(|e| matches!(e, FetchError::BadStatus { status: 500, .. })));
    assert!(errors.iter().any(|e| matches!(e, FetchError::Timeout { .. })));
}

#[tokio::test]
async fn test_seed_failure_aborts_run() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", ResponseTemplate::new(500)).await;

    let config = create_test_config(4, 10_000, 2_000);
    let crawler = Crawler::from_config(&config).expect("Failed to build crawler");

    let err = crawler
        .crawl(&format!("{}/", base_url))
        .await
        .expect_err("Seed failure should abort the run");

    assert!(matches!(
        err,
        CrawlError::SeedFetch(FetchError::BadStatus { status: 500, .. })
    ));

    // Only the seed was requested
    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording disabled");
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_seed_unreachable_is_request_error() {
    // Nothing listens on the discard port
    let config = create_test_config(4, 5_000, 1_000);
    let crawler = Crawler::from_config(&config).expect("Failed to build crawler");

    let err = crawler
        .crawl("http://127.0.0.1:9/")
        .await
        .expect_err("Unreachable seed should abort the run");

    match err {
        CrawlError::SeedFetch(fetch_err) => assert!(fetch_err.is_request_error()),
        other => panic!("Unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_fetcher_sends_identifying_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "LemmeScrapeIt/0.1"))
        .and(header_exists("accept"))
        .respond_with(html_page("Headers OK", ""))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::from_config(&Config::default()).expect("Failed to build fetcher");
    let run = RunContext::new(Duration::from_secs(5));

    let document = fetcher
        .fetch(&format!("{}/", mock_server.uri()), &run.job(Duration::from_secs(2)))
        .await
        .expect("Fetch failed");

    assert_eq!(document.find_title(), "Headers OK");
}

#[tokio::test]
async fn test_fetcher_classifies_bad_status() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/gone", ResponseTemplate::new(410)).await;
    mount_page(&mock_server, "/moved", ResponseTemplate::new(304)).await;

    let fetcher = HttpFetcher::from_config(&Config::default()).expect("Failed to build fetcher");
    let run = RunContext::new(Duration::from_secs(5));

    let url = format!("{}/gone", mock_server.uri());
    let err = fetcher
        .fetch(&url, &run.job(Duration::from_secs(2)))
        .await
        .expect_err("410 should fail");
    assert_eq!(err, FetchError::BadStatus { url, status: 410 });

    let err = fetcher
        .fetch(
            &format!("{}/moved", mock_server.uri()),
            &run.job(Duration::from_secs(2)),
        )
        .await
        .expect_err("304 should fail");
    assert!(matches!(err, FetchError::BadStatus { status: 304, .. }));
}

#[tokio::test]
async fn test_fetcher_undecodable_body_is_parse_error() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/gz",
        ResponseTemplate::new(200)
            .insert_header("content-type", "text/html")
            .insert_header("content-encoding", "gzip")
            .set_body_bytes(vec![1u8, 2, 3, 4, 5, 6, 7, 8, 9]),
    )
    .await;

    let fetcher = HttpFetcher::from_config(&Config::default()).expect("Failed to build fetcher");
    let run = RunContext::new(Duration::from_secs(5));

    let url = format!("{}/gz", mock_server.uri());
    let err = fetcher
        .fetch(&url, &run.job(Duration::from_secs(2)))
        .await
        .expect_err("Corrupt gzip body should fail");

    assert!(matches!(err, FetchError::Parse { .. }), "got {:?}", err);
    assert_eq!(err.url(), url);
    assert!(!err.is_request_error());
    assert!(err.cause().starts_with("parse error: "));
}

#[tokio::test]
async fn test_fetcher_job_timeout() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/slow",
        html_page("Slow", "").set_delay(Duration::from_secs(3)),
    )
    .await;

    let fetcher = HttpFetcher::from_config(&Config::default()).expect("Failed to build fetcher");
    let run = RunContext::new(Duration::from_secs(10));

    let started = Instant::now();
    let err = fetcher
        .fetch(
            &format!("{}/slow", mock_server.uri()),
            &run.job(Duration::from_millis(200)),
        )
        .await
        .expect_err("Slow page should time out");

    assert!(matches!(err, FetchError::Timeout { .. }));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_run_deadline_cancels_slow_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let anchors: String = (0..6)
        .map(|i| format!(r#"<a href="/slow/{}">slow {}</a>"#, i, i))
        .collect();
    mount_page(&mock_server, "/", html_page("Home", &anchors)).await;
    Mock::given(method("GET"))
        .and(wiremock::matchers::path_regex(r"^/slow/\d+$"))
        .respond_with(html_page("Slow", "").set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    // Job timeout is longer than the run, so the run deadline is what fires
    let config = create_test_config(2, 500, 10_000);
    let crawler = Crawler::from_config(&config).expect("Failed to build crawler");

    let started = Instant::now();
    let outcome = crawler
        .crawl(&format!("{}/", base_url))
        .await
        .expect("Seed fetch should succeed");

    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(outcome.links.len(), 6);
    assert_eq!(outcome.report.ok, 0);
    assert!(outcome.report.fail >= 1);
    assert!(outcome.report.fail <= 2);
    assert_eq!(
        outcome.report.fail + outcome.report.abandoned,
        outcome.links.len()
    );
    assert!(outcome
        .report
        .results
        .iter()
        .all(|r| matches!(r.error(), Some(FetchError::Cancelled { .. }))));
}

#[tokio::test]
async fn test_external_cancellation_still_reports() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page("Home", r#"<a href="/a">a</a><a href="/b">b</a><a href="/c">c</a>"#),
    )
    .await;
    Mock::given(method("GET"))
        .and(wiremock::matchers::path_regex(r"^/[abc]$"))
        .respond_with(html_page("Slow", "").set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let config = create_test_config(3, 30_000, 30_000);
    let crawler = Crawler::from_config(&config).expect("Failed to build crawler");
    let ctx = RunContext::new(config.crawler.run_timeout());

    let canceller = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        canceller.cancel();
    });

    let outcome = crawler
        .crawl_with(&format!("{}/", base_url), &ctx, &mut ())
        .await
        .expect("Seed fetch should succeed");

    assert_eq!(outcome.links.len(), 3);
    assert_eq!(outcome.report.ok, 0);
    assert_eq!(
        outcome.report.fail + outcome.report.abandoned,
        outcome.links.len()
    );
    assert!(outcome
        .report
        .results
        .iter()
        .all(|r| matches!(r.error(), Some(FetchError::Cancelled { .. }))));
}
