//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the web directory and run
//! complete root-category crawls end-to-end over HTTP.

use canopy_crawler::config::Config;
use canopy_crawler::crawler::Coordinator;
use canopy_crawler::output::{JsonLinesSink, SiteEntry};
use canopy_crawler::CanopyError;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.http.timeout_secs = 5;
    // Very short for testing
    config.backoff.initial_secs = 1;
    config.backoff.step_secs = 1;
    config
}

fn category_page(sites: &[(&str, &str)], subcategories: &[&str]) -> String {
    let sites: String = sites
        .iter()
        .map(|(name, url)| {
            format!(
                r#"<div class="site-item"><div class="site-title"><a target="_blank" href="{}">{}</a></div></div>"#,
                url, name
            )
        })
        .collect();
    let items: String = subcategories
        .iter()
        .map(|href| format!(r#"<div class="cat-item"><a href="{}">{}</a></div>"#, href, href))
        .collect();

    format!(
        r#"<html><head><title>Directory</title></head><body>
        <div id="doc">
            <section class="results sites">{}</section>
            <div class="cat-list results leaf-nodes">{}</div>
        </div>
        </body></html>"#,
        sites, items
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn read_results(path: &Path) -> Vec<SiteEntry> {
    std::fs::read_to_string(path)
        .expect("Failed to read results")
        .lines()
        .map(|line| serde_json::from_str(line).expect("Invalid JSON line"))
        .collect()
}

#[tokio::test]
async fn test_full_crawl_single_root() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/en/Business",
        category_page(
            &[
                ("Acme Ledger", "https://acme.example/"),
                ("Books & Co", "https://books.example/"),
            ],
            &[
                "/en/Business/Accounting",
                "/en/Business/Energy",
                "/en/Shopping/Clothing",
            ],
        ),
    )
    .await;

    mount_page(
        &mock_server,
        "/en/Business/Accounting",
        category_page(&[("Tally House", "https://tally.example/")], &[]),
    )
    .await;

    mount_page(
        &mock_server,
        "/en/Business/Energy",
        category_page(&[], &["/en/Business/Accounting"]),
    )
    .await;

    // Outside the requested root: must never be fetched
    Mock::given(method("GET"))
        .and(path("/en/Shopping/Clothing"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let sink = JsonLinesSink::new(dir.path().join("business.jsonl"));

    let mut coordinator = Coordinator::new(create_test_config(&mock_server.uri()))
        .expect("Failed to create coordinator");
    let report = coordinator
        .crawl_one_category("Business", &sink)
        .await
        .expect("Crawl failed");

    assert_eq!(report.categories_crawled, 3);
    assert_eq!(report.entries_written, 3);
    assert_eq!(report.duplicates_skipped, 1);
    assert_eq!(report.subcategories_rejected, 1);

    let results = read_results(sink.path());
    assert_eq!(
        results,
        vec![
            SiteEntry {
                name: "Acme Ledger".to_string(),
                url: "https://acme.example/".to_string(),
                category: "/en/Business".to_string(),
            },
            SiteEntry {
                name: "Books & Co".to_string(),
                url: "https://books.example/".to_string(),
                category: "/en/Business".to_string(),
            },
            SiteEntry {
                name: "Tally House".to_string(),
                url: "https://tally.example/".to_string(),
                category: "/en/Business/Accounting".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let mock_server = MockServer::start().await;

    // First request fails, the retry succeeds
    Mock::given(method("GET"))
        .and(path("/en/Arts"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/en/Arts",
        category_page(&[("Gallery", "https://gallery.example/")], &[]),
    )
    .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let sink = JsonLinesSink::new(dir.path().join("arts.jsonl"));

    let mut coordinator = Coordinator::new(create_test_config(&mock_server.uri()))
        .expect("Failed to create coordinator");
    let report = coordinator
        .crawl_one_category("Arts", &sink)
        .await
        .expect("Crawl failed");

    assert_eq!(report.fetch_retries, 1);
    assert_eq!(read_results(sink.path()).len(), 1);
}

#[tokio::test]
async fn test_page_without_content_is_retried() {
    let mock_server = MockServer::start().await;

    // A throttling page with no content container
    Mock::given(method("GET"))
        .and(path("/en/Science"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>Slow down</p></body></html>")
                .insert_header("content-type", "text/html"),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/en/Science",
        category_page(&[("Lab Notes", "https://lab.example/")], &[]),
    )
    .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let sink = JsonLinesSink::new(dir.path().join("science.jsonl"));

    let mut coordinator = Coordinator::new(create_test_config(&mock_server.uri()))
        .expect("Failed to create coordinator");
    let report = coordinator
        .crawl_one_category("Science", &sink)
        .await
        .expect("Crawl failed");

    assert_eq!(report.fetch_retries, 1);
    assert_eq!(report.categories_crawled, 1);
    assert_eq!(read_results(sink.path())[0].name, "Lab Notes");
}

#[tokio::test]
async fn test_session_rotation_during_crawl() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/en/Health",
        category_page(
            &[],
            &[
                "/en/Health/A",
                "/en/Health/B",
                "/en/Health/C",
                "/en/Health/D",
            ],
        ),
    )
    .await;
    for sub in ["A", "B", "C", "D"] {
        mount_page(
            &mock_server,
            &format!("/en/Health/{}", sub),
            category_page(&[(sub, "https://health.example/")], &[]),
        )
        .await;
    }

    let dir = TempDir::new().expect("Failed to create temp dir");
    let sink = JsonLinesSink::new(dir.path().join("health.jsonl"));

    let mut config = create_test_config(&mock_server.uri());
    config.http.session_max_requests = 2;

    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator
        .crawl_one_category("Health", &sink)
        .await
        .expect("Crawl failed");

    assert_eq!(report.categories_crawled, 5);
    assert_eq!(report.session_rotations, 2);
    assert_eq!(read_results(sink.path()).len(), 4);
}

#[tokio::test]
async fn test_second_root_appends_to_same_file() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/en/Business",
        category_page(&[("Acme Ledger", "https://acme.example/")], &[]),
    )
    .await;
    mount_page(
        &mock_server,
        "/en/Arts",
        category_page(&[("Gallery", "https://gallery.example/")], &[]),
    )
    .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let sink = JsonLinesSink::new(dir.path().join("all.jsonl"));

    let mut coordinator = Coordinator::new(create_test_config(&mock_server.uri()))
        .expect("Failed to create coordinator");
    coordinator
        .crawl_one_category("Business", &sink)
        .await
        .expect("Crawl failed");
    coordinator
        .crawl_one_category("Arts", &sink)
        .await
        .expect("Crawl failed");

    let names: Vec<String> = read_results(sink.path())
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, vec!["Acme Ledger", "Gallery"]);
}

#[tokio::test]
async fn test_unwritable_output_is_fatal() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/en/Business",
        category_page(&[("Acme Ledger", "https://acme.example/")], &["/en/Business/A"]),
    )
    .await;

    // The crawl stops at the first write failure
    Mock::given(method("GET"))
        .and(path("/en/Business/A"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let sink = JsonLinesSink::new(dir.path().join("missing-dir").join("out.jsonl"));

    let mut coordinator = Coordinator::new(create_test_config(&mock_server.uri()))
        .expect("Failed to create coordinator");
    let result = coordinator.crawl_one_category("Business", &sink).await;

    assert!(matches!(result, Err(CanopyError::Output(_))));
}
