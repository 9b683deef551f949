//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use site_crawler::config::{Config, TraversalOrder};
use site_crawler::crawler::{crawl, Crawler, HttpFetcher, PageFetcher};
use site_crawler::output::{JsonWriter, MarkdownWriter, ResultWriter};
use site_crawler::state::PageState;
use site_crawler::url::CrawlTarget;
use site_crawler::CrawlError;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with short timeouts
fn create_test_config(concurrency: usize) -> Config {
    let mut config = Config::default();
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.crawler_version = "1.0.0".to_string();
    config.crawler.max_concurrent_fetches = concurrency;
    config.crawler.fetch_timeout_secs = 5;
    config.crawler.connect_timeout_secs = 2;
    config
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>Test</title></head><body>{}</body></html>", body),
        "text/html; charset=utf-8",
    )
}

async fn mount_page(server: &MockServer, page: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(response)
        .mount(server)
        .await;
}

fn target(server: &MockServer, page: &str) -> CrawlTarget {
    CrawlTarget::parse(&format!("{}{}", server.uri(), page)).unwrap()
}

#[tokio::test]
async fn test_fetcher_returns_html_page() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", html(r#"<a href="/about">About</a>"#)).await;

    let fetcher = HttpFetcher::new(&create_test_config(1)).unwrap();
    let page = fetcher.fetch(&target(&mock_server, "/")).await.unwrap();

    assert_eq!(page.status_code, 200);
    assert!(page.body.contains("/about"));
    assert_eq!(page.fingerprint.as_str().len(), 64);
}

#[tokio::test]
async fn test_fetcher_classifies_404_as_dead_link() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/gone", ResponseTemplate::new(404)).await;

    let fetcher = HttpFetcher::new(&create_test_config(1)).unwrap();
    let error = fetcher
        .fetch(&target(&mock_server, "/gone"))
        .await
        .unwrap_err();

    assert!(error.is_dead_link());
    assert_eq!(error.status_code(), Some(404));
}

#[tokio::test]
async fn test_fetcher_reports_server_error_status() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/broken", ResponseTemplate::new(500)).await;

    let fetcher = HttpFetcher::new(&create_test_config(1)).unwrap();
    let error = fetcher
        .fetch(&target(&mock_server, "/broken"))
        .await
        .unwrap_err();

    assert!(!error.is_dead_link());
    assert_eq!(error.status_code(), Some(500));
}

#[tokio::test]
async fn test_fetcher_accepts_non_html_without_body() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/data",
        ResponseTemplate::new(200).set_body_raw(r#"{"a": 1}"#, "application/json"),
    )
    .await;

    let fetcher = HttpFetcher::new(&create_test_config(1)).unwrap();
    let page = fetcher.fetch(&target(&mock_server, "/data")).await.unwrap();

    assert!(!page.is_html());
    assert!(page.body.is_empty());
    assert_eq!(page.content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_fetcher_reports_final_url_after_redirect() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/old",
        ResponseTemplate::new(301)
            .insert_header("location", format!("{}/new", mock_server.uri()).as_str()),
    )
    .await;
    mount_page(&mock_server, "/new", html("<p>moved</p>")).await;

    let fetcher = HttpFetcher::new(&create_test_config(1)).unwrap();
    let page = fetcher.fetch(&target(&mock_server, "/old")).await.unwrap();

    assert_eq!(page.final_url, format!("{}/new", mock_server.uri()));
}

#[tokio::test]
async fn test_fetcher_sends_user_agent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(wiremock::matchers::header("user-agent", "TestBot/1.0.0"))
        .respond_with(html("<p>hello</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&create_test_config(1)).unwrap();
    assert!(fetcher.fetch(&target(&mock_server, "/")).await.is_ok());
}

#[tokio::test]
async fn test_full_crawl_single_host() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(&format!(
            r#"<a href="{}/page1">Page 1</a>
               <a href="/page2/">Page 2</a>
               <a href="https://facebook.com/Example">Facebook</a>
               <img src="/images/logo.png">
               <script src="/app.js"></script>"#,
            base_url
        )),
    )
    .await;
    mount_page(
        &mock_server,
        "/page1",
        html(r#"<a href="/">Home</a><a href="/page1">Self</a><a href="/missing">Missing</a>"#),
    )
    .await;
    mount_page(
        &mock_server,
        "/page2",
        html(r#"<a href="/page1#top">Page 1</a><img src="photo.JPG">"#),
    )
    .await;
    mount_page(&mock_server, "/missing", ResponseTemplate::new(404)).await;

    let result = crawl(&base_url, &create_test_config(2)).await.unwrap();

    let internal: Vec<String> = result.link_urls.keys().cloned().collect();
    assert_eq!(
        internal,
        vec![format!("{}/page1", base_url), format!("{}/page2", base_url)]
    );
    assert!(result
        .external_urls
        .contains_key("https://facebook.com/Example"));
    assert!(result
        .media_urls
        .contains_key(&format!("{}/images/logo.png", base_url)));
    assert!(result
        .media_urls
        .contains_key(&format!("{}/photo.JPG", base_url)));
    assert_eq!(
        result.dead_links.get(&format!("{}/missing", base_url)),
        Some(&404)
    );
    assert_eq!(result.stats.count(PageState::Expanded), 3);
    assert_eq!(result.stats.count(PageState::DeadLink), 1);
}

#[tokio::test]
async fn test_each_page_fetched_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/a"></a><a href="/b"></a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html(r#"<a href="/b"></a><a href="/"></a><p>a</p>"#))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html(r#"<a href="/a"></a><p>b</p>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = crawl(&mock_server.uri(), &create_test_config(4))
        .await
        .unwrap();

    assert_eq!(result.link_urls.len(), 2);
    // expect(1) is verified when the server drops
}

#[tokio::test]
async fn test_duplicate_content_is_not_expanded() {
    let mock_server = MockServer::start().await;
    let mirrored = r#"<a href="/deep">Deep</a>"#;

    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="/original"></a><a href="/mirror"></a>"#),
    )
    .await;
    mount_page(&mock_server, "/original", html(mirrored)).await;
    mount_page(&mock_server, "/mirror", html(mirrored)).await;
    Mock::given(method("GET"))
        .and(path("/deep"))
        .respond_with(html("<p>deep</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = crawl(&mock_server.uri(), &create_test_config(1))
        .await
        .unwrap();

    assert_eq!(result.stats.count(PageState::DuplicateContent), 1);
    assert_eq!(result.link_urls.len(), 3);
}

#[tokio::test]
async fn test_non_html_link_stays_in_link_urls() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="/report.pdf">Report</a><a href="/about">About</a>"#),
    )
    .await;
    mount_page(
        &mock_server,
        "/report.pdf",
        ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"),
    )
    .await;
    mount_page(&mock_server, "/about", html("<p>About</p>")).await;

    let result = crawl(&mock_server.uri(), &create_test_config(1))
        .await
        .unwrap();

    let base = mock_server.uri();
    assert!(result.link_urls.contains_key(&format!("{}/report.pdf", base)));
    assert!(result.link_urls.contains_key(&format!("{}/about", base)));
    assert_eq!(result.stats.count(PageState::NonHtml), 1);
    assert_eq!(result.stats.count(PageState::Failed), 0);
}

#[tokio::test]
async fn test_off_host_redirect_is_not_expanded() {
    let site = MockServer::start().await;
    let partner = MockServer::start().await;

    mount_page(&site, "/", html(r#"<a href="/go">Partner</a>"#)).await;
    mount_page(
        &site,
        "/go",
        ResponseTemplate::new(302)
            .insert_header("location", format!("{}/home", partner.uri()).as_str()),
    )
    .await;
    mount_page(&partner, "/home", html(r#"<a href="/partner-login">Log in</a>"#)).await;
    Mock::given(method("GET"))
        .and(path("/partner-login"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&site)
        .await;

    let result = crawl(&site.uri(), &create_test_config(1)).await.unwrap();

    assert!(result.dead_links.is_empty());
    assert_eq!(
        result.link_urls.keys().cloned().collect::<Vec<_>>(),
        vec![format!("{}/go", site.uri())]
    );
    assert_eq!(result.stats.count(PageState::OffHostRedirect), 1);
}

#[tokio::test]
async fn test_server_errors_do_not_abort_crawl() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="/broken"></a><a href="/fine"></a>"#),
    )
    .await;
    mount_page(&mock_server, "/broken", ResponseTemplate::new(500)).await;
    mount_page(&mock_server, "/fine", html("<p>fine</p>")).await;

    let result = crawl(&mock_server.uri(), &create_test_config(1))
        .await
        .unwrap();

    let fine = format!("{}/fine", mock_server.uri());
    assert_eq!(result.link_urls.keys().collect::<Vec<_>>(), vec![&fine]);
    assert!(result.dead_links.is_empty());
    assert_eq!(result.stats.count(PageState::Failed), 1);
}

#[tokio::test]
async fn test_unreachable_seed_returns_empty_result() {
    // Nothing listens on port 9 on loopback
    let result = crawl("http://127.0.0.1:9/", &create_test_config(1))
        .await
        .unwrap();

    assert!(result.link_urls.is_empty());
    assert_eq!(result.stats.count(PageState::Failed), 1);
}

#[tokio::test]
async fn test_invalid_seed_is_rejected() {
    let error = crawl("not a url", &create_test_config(1)).await.unwrap_err();
    assert!(matches!(error, CrawlError::Url(_)));

    let error = crawl("ftp://example.com/", &create_test_config(1))
        .await
        .unwrap_err();
    assert!(matches!(error, CrawlError::Url(_)));
}

#[tokio::test]
async fn test_breadth_first_crawl_finds_same_links() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", html(r#"<a href="/a"></a><a href="/b"></a>"#)).await;
    mount_page(&mock_server, "/a", html(r#"<a href="/a/1"></a><p>a</p>"#)).await;
    mount_page(&mock_server, "/b", html(r#"<a href="/b/1"></a><p>b</p>"#)).await;
    mount_page(&mock_server, "/a/1", html("<p>a1</p>")).await;
    mount_page(&mock_server, "/b/1", html("<p>b1</p>")).await;

    let depth_first = crawl(&mock_server.uri(), &create_test_config(1))
        .await
        .unwrap();

    let mut config = create_test_config(3);
    config.crawler.traversal = TraversalOrder::BreadthFirst;
    let breadth_first = Crawler::from_config(&config)
        .unwrap()
        .crawl(&mock_server.uri())
        .await
        .unwrap();

    assert_eq!(depth_first.link_urls, breadth_first.link_urls);
    assert_eq!(breadth_first.link_urls.len(), 4);
}

#[tokio::test]
async fn test_writes_json_and_markdown_results() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="/z"></a><a href="/a"></a><a href="/gone"></a>"#),
    )
    .await;
    mount_page(&mock_server, "/a", html("<p>a</p>")).await;
    mount_page(&mock_server, "/z", html("<p>z</p>")).await;
    mount_page(&mock_server, "/gone", ResponseTemplate::new(404)).await;

    let result = crawl(&mock_server.uri(), &create_test_config(2))
        .await
        .unwrap();

    let dir = TempDir::new().unwrap();
    let results_dir = dir.path().join("results");

    let json_path = JsonWriter::new(&results_dir).write(&result).unwrap();
    assert!(json_path.exists());

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    let link_urls: Vec<&String> = written["linkUrls"].as_object().unwrap().keys().collect();
    assert_eq!(
        link_urls,
        vec![
            &format!("{}/a", mock_server.uri()),
            &format!("{}/z", mock_server.uri())
        ]
    );
    assert_eq!(
        written["deadLinks"][format!("{}/gone", mock_server.uri())],
        serde_json::json!(404)
    );

    let md_path = MarkdownWriter::new(&results_dir).write(&result).unwrap();
    let markdown = std::fs::read_to_string(md_path).unwrap();
    assert!(markdown.contains(&format!("{}/gone", mock_server.uri())));
}
