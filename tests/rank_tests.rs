//! Integration tests for the ranking pipeline
//!
//! These tests use wiremock to stand in for the remote server and exercise
//! the full HEAD-then-GET flow end-to-end, including the failure taxonomy.

use kwrank::config::ScrapeConfig;
use kwrank::scrape::{FrequencyEntry, RankingService};
use kwrank::ScrapeError;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REFERENCE_PAGE: &str = r#"
    <html>
        <head>
            <meta name="keywords" content="test1, test2,test3,, test4,test3," />
        </head>
        <body>
            <h1>test1</h1>
            test2 test2
            <div id="test3">test3 test3</div>
        </body>
    </html>"#;

fn test_config() -> ScrapeConfig {
    ScrapeConfig::default()
}

fn entry(keyword: &str, frequency: usize) -> FrequencyEntry {
    FrequencyEntry {
        keyword: keyword.to_string(),
        frequency,
    }
}

/// Mounts a HEAD mock answering with the given content type and a GET mock
/// serving the given body
async fn serve_page(server: &MockServer, content_type: &str, body: &str) {
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", content_type))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", content_type),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_rank_reference_page() {
    let server = MockServer::start().await;
    serve_page(&server, "text/html", REFERENCE_PAGE).await;

    let service = RankingService::new(test_config());
    let ranking = service
        .rank(&format!("{}/", server.uri()))
        .await
        .expect("ranking failed");

    // test3 counts twice in text plus once in the div's id attribute.
    assert_eq!(
        ranking,
        vec![
            entry("test3", 3),
            entry("test2", 2),
            entry("test1", 1),
            entry("test4", 0),
        ]
    );
}

#[tokio::test]
async fn test_content_type_with_charset_is_accepted() {
    let server = MockServer::start().await;
    serve_page(&server, "text/html; charset=utf-8", REFERENCE_PAGE).await;

    let service = RankingService::new(test_config());
    let ranking = service
        .rank(&format!("{}/", server.uri()))
        .await
        .expect("ranking failed");

    assert_eq!(ranking.len(), 4);
}

#[tokio::test]
async fn test_non_html_content_type_rejected_without_get() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "image/jpeg"))
        .mount(&server)
        .await;

    // The body must never be fetched for a non-HTML page.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = RankingService::new(test_config());
    let err = service.rank(&format!("{}/", server.uri())).await.unwrap_err();

    match err {
        ScrapeError::InvalidContentType { content_type } => {
            assert_eq!(content_type.as_deref(), Some("image/jpeg"));
        }
        other => panic!("expected InvalidContentType, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_content_type_rejected_without_get() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = RankingService::new(test_config());
    let err = service.rank(&format!("{}/", server.uri())).await.unwrap_err();

    match err {
        ScrapeError::InvalidContentType { content_type } => assert_eq!(content_type, None),
        other => panic!("expected InvalidContentType, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_error_status_on_head() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = RankingService::new(test_config());
    let err = service.rank(&format!("{}/", server.uri())).await.unwrap_err();

    assert!(matches!(err, ScrapeError::Http { status: 404 }));
}

#[tokio::test]
async fn test_http_error_status_on_get() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let service = RankingService::new(test_config());
    let err = service.rank(&format!("{}/", server.uri())).await.unwrap_err();

    assert!(matches!(err, ScrapeError::Http { status: 500 }));
}

#[tokio::test]
async fn test_connection_refused() {
    // Bind a port, then drop the listener so connections are refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind failed");
    let port = listener.local_addr().expect("no local addr").port();
    drop(listener);

    let service = RankingService::new(test_config());
    let err = service
        .rank(&format!("http://127.0.0.1:{}/", port))
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::Connection(_)));
}

#[tokio::test]
async fn test_invalid_urls() {
    let service = RankingService::new(test_config());

    let err = service.rank("not a url at all").await.unwrap_err();
    assert!(matches!(err, ScrapeError::InvalidUrl(_)));

    let err = service.rank("ftp://example.com/file").await.unwrap_err();
    assert!(matches!(err, ScrapeError::InvalidUrl(_)));

    let err = service.rank("example.com/no-scheme").await.unwrap_err();
    assert!(matches!(err, ScrapeError::InvalidUrl(_)));
}

#[tokio::test]
async fn test_timeout_on_slow_head() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = ScrapeConfig {
        timeout: Duration::from_millis(100),
        ..ScrapeConfig::default()
    };
    let service = RankingService::new(config);
    let err = service.rank(&format!("{}/", server.uri())).await.unwrap_err();

    assert!(matches!(err, ScrapeError::Timeout));
}

#[tokio::test]
async fn test_page_without_meta_keywords() {
    let server = MockServer::start().await;
    serve_page(
        &server,
        "text/html",
        "<html><head><title>t</title></head><body>text</body></html>",
    )
    .await;

    let service = RankingService::new(test_config());
    let err = service.rank(&format!("{}/", server.uri())).await.unwrap_err();

    assert!(matches!(err, ScrapeError::MetaKeywordsNotFound));
}

#[tokio::test]
async fn test_empty_keywords_attribute_yields_empty_ranking() {
    let server = MockServer::start().await;
    serve_page(
        &server,
        "text/html",
        r#"<html><head><meta name="keywords" content="" /></head><body>text</body></html>"#,
    )
    .await;

    let service = RankingService::new(test_config());
    let ranking = service
        .rank(&format!("{}/", server.uri()))
        .await
        .expect("ranking failed");

    assert!(ranking.is_empty());
}

#[tokio::test]
async fn test_all_empty_segments_yield_empty_ranking() {
    let server = MockServer::start().await;
    serve_page(
        &server,
        "text/html",
        r#"<html><head><meta name="keywords" content=", , ," /></head><body>text</body></html>"#,
    )
    .await;

    let service = RankingService::new(test_config());
    let ranking = service
        .rank(&format!("{}/", server.uri()))
        .await
        .expect("ranking failed");

    assert!(ranking.is_empty());
}

#[tokio::test]
async fn test_tied_frequencies_keep_keyword_set_order() {
    let server = MockServer::start().await;
    serve_page(
        &server,
        "text/html",
        r#"<html><head><meta name="keywords" content="zebra, apple, mango" /></head>
           <body>zebra apple mango</body></html>"#,
    )
    .await;

    let service = RankingService::new(test_config());
    let ranking = service
        .rank(&format!("{}/", server.uri()))
        .await
        .expect("ranking failed");

    // All frequencies equal, so the lexicographic keyword-set order shows.
    assert_eq!(
        ranking,
        vec![entry("apple", 1), entry("mango", 1), entry("zebra", 1)]
    );
}

#[tokio::test]
async fn test_empty_body_yields_zero_frequencies() {
    let server = MockServer::start().await;
    serve_page(
        &server,
        "text/html",
        r#"<html><head><meta name="keywords" content="a, b" /></head><body></body></html>"#,
    )
    .await;

    let service = RankingService::new(test_config());
    let ranking = service
        .rank(&format!("{}/", server.uri()))
        .await
        .expect("ranking failed");

    assert_eq!(ranking, vec![entry("a", 0), entry("b", 0)]);
}

#[tokio::test]
async fn test_malformed_markup_does_not_crash() {
    let server = MockServer::start().await;
    serve_page(
        &server,
        "text/html",
        r#"<html><head><meta name="keywords" content="tag"><body><div>tag<p>tag"#,
    )
    .await;

    let service = RankingService::new(test_config());
    let ranking = service
        .rank(&format!("{}/", server.uri()))
        .await
        .expect("ranking failed");

    assert_eq!(ranking, vec![entry("tag", 2)]);
}
