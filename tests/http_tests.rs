//! Tests for HTTP module functionality.

mod common;

use abc::http::client::default_headers;
use abc::{create_http_client, probe, Error, HttpClientConfig, ProbeVerdict};
use common::helpers::*;
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use reqwest::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn url(server: &MockServer, route: &str) -> Url {
    Url::parse(&mock_url(server, route)).unwrap()
}

#[tokio::test]
async fn test_probe_reads_size_and_ranges() {
    let server = MockServer::start().await;
    mount_head(&server, "/file.bin", 1234, Some("bytes")).await;

    let client = create_http_client(HttpClientConfig::default()).unwrap();
    let info = probe(&client, &url(&server, "/file.bin")).await.unwrap();

    assert_eq!(info.total_size, Some(1234));
    assert_eq!(info.accept_ranges, "bytes");
    assert!(info.supports_ranges());
    assert_eq!(info.check_existing(1234).unwrap(), ProbeVerdict::AlreadyComplete);
}

#[tokio::test]
async fn test_probe_keeps_unknown_range_token() {
    let server = MockServer::start().await;
    mount_head(&server, "/file.bin", 10, Some("none")).await;

    let client = create_http_client(HttpClientConfig::default()).unwrap();
    let info = probe(&client, &url(&server, "/file.bin")).await.unwrap();

    assert_eq!(info.accept_ranges, "none");
    assert!(!info.supports_ranges());
}

#[tokio::test]
async fn test_probe_status_errors() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = create_http_client(HttpClientConfig::default()).unwrap();

    let missing = probe(&client, &url(&server, "/missing")).await.unwrap_err();
    assert!(matches!(missing, Error::HttpStatus { .. }));
    assert!(!missing.is_transient());

    let busy = probe(&client, &url(&server, "/busy")).await.unwrap_err();
    assert!(busy.is_transient());
}

#[tokio::test]
async fn test_probe_connection_refused_is_transient() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let target = Url::parse(&format!("http://127.0.0.1:{}/file.bin", port)).unwrap();

    let client = create_http_client(HttpClientConfig::default()).unwrap();
    let error = probe(&client, &target).await.unwrap_err();

    assert!(error.is_transient(), "{:?}", error);
}

#[tokio::test]
async fn test_probe_sends_client_headers() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/file.bin"))
        .and(header("user-agent", TEST_USER_AGENT))
        .and(header("referer", "https://example.com/"))
        .and(header("accept-language", "en-US"))
        .respond_with(head_response(5, Some("bytes")))
        .expect(1)
        .mount(&server)
        .await;

    let mut extra = HeaderMap::new();
    extra.insert(REFERER, HeaderValue::from_static("https://example.com/"));
    let client = create_http_client(HttpClientConfig {
        timeout: None,
        user_agent: Some(TEST_USER_AGENT.into()),
        headers: Some(extra),
    })
    .unwrap();

    let info = probe(&client, &url(&server, "/file.bin")).await.unwrap();
    assert_eq!(info.total_size, Some(5));
}

#[test]
fn test_request_agent_overrides_configured_agent() {
    let mut extra = HeaderMap::new();
    extra.insert(USER_AGENT, HeaderValue::from_static("configured"));
    let headers = default_headers(&HttpClientConfig {
        timeout: None,
        user_agent: Some("per-request".into()),
        headers: Some(extra),
    })
    .unwrap();

    assert_eq!(headers.get(USER_AGENT).unwrap(), "per-request");
}

#[test]
fn test_invalid_agent_is_rejected() {
    let result = create_http_client(HttpClientConfig {
        timeout: None,
        user_agent: Some("bad\nagent".into()),
        headers: None,
    });

    assert!(matches!(result, Err(Error::InvalidHeader(_))));
}
