//! Shared helpers for the integration tests: temporary files, request and
//! downloader factories, and mock servers.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use abc::{Backoff, DownloadOptions, DownloadRequest, DownloaderBuilder};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Common test constants
pub const TEST_USER_AGENT: &str = "abc-test-agent";
pub const FULL_CONTENT: &[u8] = b"AAABBBCCCDDD";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Asserts that a file has the expected content
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = fs::read(path).expect("Failed to read file");
    assert_eq!(content, expected, "File content mismatch at path: {:?}", path);
}

/// Asserts that a file has the expected size
pub fn assert_file_size(path: &Path, expected_size: u64) {
    let metadata = fs::metadata(path).expect("Failed to get file metadata");
    assert_eq!(
        metadata.len(),
        expected_size,
        "File size mismatch at path: {:?}",
        path
    );
}

// === Downloader Helpers ===

/// Backoff short enough to keep retry tests fast
pub fn fast_backoff() -> Backoff {
    Backoff::new(Duration::from_millis(1), Duration::from_millis(10))
}

/// Creates a downloader drawing nothing and retrying quickly
pub fn create_test_downloader_builder() -> DownloaderBuilder {
    DownloaderBuilder::hidden()
        .backoff(fast_backoff())
        .sample_interval(Duration::from_millis(10))
}

/// Options silencing every operator message
pub fn quiet_options() -> DownloadOptions {
    DownloadOptions {
        suppress_debug: true,
        suppress_progress: true,
        discard_existing: false,
    }
}

/// Creates a quiet request for `url` written to `destination`
pub fn create_test_request(url: &str, destination: &Path) -> DownloadRequest {
    DownloadRequest::new(url)
        .destination(destination)
        .user_agent(TEST_USER_AGENT)
        .options(quiet_options())
}

// === Mock Server Helpers ===

/// URL of `route` on the mock server
pub fn mock_url(server: &MockServer, route: &str) -> String {
    format!("{}{}", server.uri(), route)
}

/// Probe response declaring `len` bytes and the given range support
pub fn head_response(len: usize, accept_ranges: Option<&str>) -> ResponseTemplate {
    let template = ResponseTemplate::new(200).insert_header("Content-Length", len.to_string());
    match accept_ranges {
        Some(unit) => template.insert_header("Accept-Ranges", unit),
        None => template,
    }
}

/// Mounts a probe response on `route`
pub async fn mount_head(
    server: &MockServer,
    route: &str,
    len: usize,
    accept_ranges: Option<&str>,
) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(head_response(len, accept_ranges))
        .mount(server)
        .await;
}

/// Mounts a full-body response on `route`
pub async fn mount_get(server: &MockServer, route: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

/// Requests received by the server with the given method
pub async fn received(server: &MockServer, verb: &str) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == verb)
        .collect()
}

/// Value of the Range header of a request, if any
pub fn range_header(request: &wiremock::Request) -> Option<String> {
    request
        .headers
        .get("range")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

// === Raw Server Helpers ===

/// `Range` headers of the GET requests seen by a [`spawn_cutting_server`].
pub type SeenRanges = Arc<Mutex<Vec<Option<String>>>>;

/// Starts a server for `/file.bin` whose first full GET declares the whole
/// content but closes the connection after `cut` bytes. Range requests are
/// answered with `206` and the rest of the content.
pub async fn spawn_cutting_server(content: Vec<u8>, cut: usize) -> (String, SeenRanges) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read server address");
    let ranges: SeenRanges = Arc::default();
    let seen = ranges.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let (verb, range) = read_request_head(&mut socket).await;
            let total = content.len();
            let response = match (verb.as_str(), range_start(range.as_deref())) {
                ("HEAD", _) => format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nAccept-Ranges: bytes\r\nConnection: close\r\n\r\n",
                    total
                )
                .into_bytes(),
                (_, Some(start)) => {
                    let mut head = format!(
                        "HTTP/1.1 206 Partial Content\r\nContent-Length: {}\r\nContent-Range: bytes {}-{}/{}\r\nAccept-Ranges: bytes\r\nConnection: close\r\n\r\n",
                        total - start,
                        start,
                        total - 1,
                        total
                    )
                    .into_bytes();
                    head.extend_from_slice(&content[start..]);
                    head
                }
                (_, None) => {
                    let mut head = format!(
                        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nAccept-Ranges: bytes\r\nConnection: close\r\n\r\n",
                        total
                    )
                    .into_bytes();
                    head.extend_from_slice(&content[..cut]);
                    head
                }
            };
            if verb != "HEAD" {
                seen.lock().unwrap().push(range);
            }
            let _ = socket.write_all(&response).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{}/file.bin", addr), ranges)
}

/// Reads a request head and returns its method and `Range` header.
async fn read_request_head(socket: &mut TcpStream) -> (String, Option<String>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buf);
    let mut lines = head.lines();
    let verb = lines
        .next()
        .and_then(|l| l.split_whitespace().next())
        .unwrap_or_default()
        .to_string();
    let range = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("range"))
        .map(|(_, value)| value.trim().to_string());
    (verb, range)
}

/// First byte of an open-ended `bytes=<n>-` range.
fn range_start(range: Option<&str>) -> Option<usize> {
    range?.strip_prefix("bytes=")?.strip_suffix('-')?.parse().ok()
}
