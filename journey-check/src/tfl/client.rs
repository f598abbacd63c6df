//! TfL Unified API HTTP client.
//!
//! A thin transport: it issues a GET for a fully built journey URL and hands
//! back the status code and JSON body untouched. Interpreting the status is
//! the orchestrator's job.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::debug;

use crate::scenario::{JourneyTransport, TransportResponse};

use super::error::TflError;

/// Default base URL for the TfL Unified API.
pub const DEFAULT_BASE_URL: &str = "https://api.tfl.gov.uk";

/// Configuration for the TfL client.
#[derive(Debug, Clone)]
pub struct TflConfig {
    /// Base URL for the API (defaults to production TfL)
    pub base_url: String,
    /// Optional application key, sent as the `app_key` query parameter
    pub app_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TflConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_key: None,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the application key.
    pub fn with_app_key(mut self, key: impl Into<String>) -> Self {
        self.app_key = Some(key.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TflConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// TfL Unified API client.
#[derive(Debug, Clone)]
pub struct TflClient {
    http: reqwest::Client,
    base_url: String,
    app_key: Option<String>,
}

impl TflClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TflConfig) -> Result<Self, TflError> {
        url::Url::parse(&config.base_url)
            .map_err(|e| TflError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_key: config.app_key,
        })
    }

    /// The base URL journey requests should be built against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that the API root answers with `200 OK`.
    ///
    /// Only the status matters; the root may serve a landing page rather
    /// than JSON, so the body is never read.
    pub async fn is_available(&self) -> Result<bool, TflError> {
        let url = format!("{}/", self.base_url);
        let status = self.start(&url).send().await?.status();
        debug!(url, status = status.as_u16(), "availability probe");
        Ok(status == reqwest::StatusCode::OK)
    }

    fn start(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.http.get(url);
        match &self.app_key {
            Some(key) => request.query(&[("app_key", key.as_str())]),
            None => request,
        }
    }

    async fn get(&self, url: &str) -> Result<TransportResponse, TflError> {
        let response = self.start(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(TflError::Unauthorized);
        }

        let body = response.text().await?;
        debug!(url, status = status.as_u16(), bytes = body.len(), "journey API response");

        let body = parse_body(&body)?;

        Ok(TransportResponse {
            status: status.as_u16(),
            body,
        })
    }
}

impl JourneyTransport for TflClient {
    async fn request(&self, url: &str) -> Result<TransportResponse, TflError> {
        self.get(url).await
    }
}

/// Parse a response body, treating an empty body as JSON `null`.
fn parse_body(body: &str) -> Result<serde_json::Value, TflError> {
    if body.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(body).map_err(|e| TflError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = TflConfig::new()
            .with_base_url("http://localhost:8080")
            .with_app_key("secret")
            .with_timeout(60);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.app_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = TflConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.app_key, None);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = TflClient::new(TflConfig::new().with_base_url("http://localhost/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost");
    }

    #[test]
    fn client_rejects_relative_base() {
        let result = TflClient::new(TflConfig::new().with_base_url("api.tfl.gov.uk"));
        assert!(matches!(result, Err(TflError::InvalidBaseUrl(_))));
    }

    /// Serve one canned HTTP response on a local port.
    async fn serve_once(response: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn html_root_page_counts_as_available() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\n\
             content-type: text/html\r\n\
             content-length: 41\r\n\
             connection: close\r\n\r\n\
             <html><body>TfL Unified API</body></html>",
        )
        .await;
        let client = TflClient::new(TflConfig::new().with_base_url(base)).unwrap();

        assert!(client.is_available().await.unwrap());
    }

    #[tokio::test]
    async fn unavailable_root_is_reported_not_failed() {
        let base = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\n\
             content-length: 0\r\n\
             connection: close\r\n\r\n",
        )
        .await;
        let client = TflClient::new(TflConfig::new().with_base_url(base)).unwrap();

        assert!(!client.is_available().await.unwrap());
    }

    #[test]
    fn empty_body_is_null() {
        assert_eq!(parse_body("  ").unwrap(), serde_json::Value::Null);
        assert_eq!(parse_body("{\"a\":1}").unwrap()["a"], 1);
        assert!(matches!(parse_body("<html>"), Err(TflError::Json { .. })));
    }
}
