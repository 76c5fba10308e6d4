//! HTTP client setup and middleware configuration.
//!
//! Every client carries the standard request headers (`Accept-Language` and
//! `Connection`, plus `User-Agent` when one is configured) as default
//! headers, so the probe and the body request present themselves
//! identically. Requests are traced through [`TracingMiddleware`].
//!
//! Retrying is not done here: the orchestrator owns a single retry budget
//! for the whole operation and re-validates the server state between
//! attempts.

use crate::error::{Error, Result};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

/// Value of the `Accept-Language` header sent with every request.
pub const ACCEPT_LANGUAGE_VALUE: &str = "en-US";

/// Value of the `Connection` header sent with every request.
pub const CONNECTION_VALUE: &str = "keep-alive";

/// Configuration for HTTP client setup.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Timeout applied to each request/response exchange, body included.
    pub timeout: Option<Duration>,
    /// Optional `User-Agent` header.
    pub user_agent: Option<String>,
    /// Extra headers to include with all requests.
    pub headers: Option<HeaderMap>,
}

/// Build the default header set for a client.
pub fn default_headers(config: &HttpClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
    headers.insert(CONNECTION, HeaderValue::from_static(CONNECTION_VALUE));

    if let Some(ref extra) = config.headers {
        headers.extend(extra.clone());
    }

    if let Some(ref agent) = config.user_agent {
        let value = HeaderValue::from_str(agent)
            .map_err(|_| Error::InvalidHeader(format!("User-Agent {:?}", agent)))?;
        headers.insert(USER_AGENT, value);
    }

    Ok(headers)
}

/// Creates an HTTP client with middleware configuration.
///
/// # Example
///
/// ```rust
/// use abc::http::client::{create_http_client, HttpClientConfig};
///
/// let client = create_http_client(HttpClientConfig::default()).unwrap();
/// ```
pub fn create_http_client(config: HttpClientConfig) -> Result<ClientWithMiddleware> {
    let mut inner_client_builder =
        reqwest::Client::builder().default_headers(default_headers(&config)?);

    if let Some(timeout) = config.timeout {
        inner_client_builder = inner_client_builder.timeout(timeout);
    }

    let inner_client = inner_client_builder.build()?;

    let client = ClientBuilder::new(inner_client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
        .build();

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert!(config.timeout.is_none());
        assert!(config.user_agent.is_none());
        assert!(config.headers.is_none());
    }

    #[test]
    fn test_standard_headers() {
        let headers = default_headers(&HttpClientConfig::default()).unwrap();
        assert_eq!(headers.get(ACCEPT_LANGUAGE).unwrap(), "en-US");
        assert_eq!(headers.get(CONNECTION).unwrap(), "keep-alive");
        assert!(headers.get(USER_AGENT).is_none());
    }

    #[test]
    fn test_user_agent_header() {
        let config = HttpClientConfig {
            user_agent: Some("abc-test-agent".into()),
            ..HttpClientConfig::default()
        };
        let headers = default_headers(&config).unwrap();
        assert_eq!(headers.get(USER_AGENT).unwrap(), "abc-test-agent");
    }

    #[test]
    fn test_invalid_user_agent_is_rejected() {
        let config = HttpClientConfig {
            user_agent: Some("bad\nagent".into()),
            ..HttpClientConfig::default()
        };
        assert!(matches!(
            create_http_client(config),
            Err(Error::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_create_http_client_with_timeout() {
        let config = HttpClientConfig {
            timeout: Some(Duration::from_secs(5)),
            ..HttpClientConfig::default()
        };
        assert!(create_http_client(config).is_ok());
    }
}
