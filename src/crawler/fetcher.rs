//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the HTTP client with the configured user agent
//! - GET requests with a per-call timeout
//! - Failure classification (timeout, network, status, unparseable body)
//!
//! A fetch issues exactly one request. Retrying is left to the caller, and the
//! crawl controller never retries.

use crate::config::UserAgentConfig;
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Why a page could not be fetched
///
/// None of these abort a run: the crawl controller logs them and skips the
/// page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Unparseable body from {url}: {reason}")]
    Unparseable { url: String, reason: String },
}

impl FetchError {
    /// Short label used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Network { .. } => "network",
            Self::Status { .. } => "status",
            Self::Unparseable { .. } => "unparseable",
        }
    }

    fn from_reqwest(url: &Url, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if error.is_connect() {
            Self::Network {
                url: url.to_string(),
                message: "Connection refused".to_string(),
            }
        } else {
            Self::Network {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

/// Source of parsed pages
///
/// [`HttpFetcher`] is the real implementation; anything else (an in-memory
/// page map in tests, a cache) can stand in for it.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Fetches `url` and parses it as HTML, giving up after `timeout`
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<Html, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// No timeout is set on the client: each portal's timeout is applied per
/// request and bounds connecting as well. Redirects follow reqwest's default
/// policy.
///
/// # Example
///
/// ```no_run
/// use prensa::config::UserAgentConfig;
/// use prensa::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed [`PageFetcher`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<Html, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let body = std::str::from_utf8(&bytes).map_err(|_| FetchError::Unparseable {
            url: url.to_string(),
            reason: "body is not valid UTF-8".to_string(),
        })?;

        if body.trim().is_empty() {
            return Err(FetchError::Unparseable {
                url: url.to_string(),
                reason: "empty body".to_string(),
            });
        }

        Ok(Html::parse_document(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_config() -> UserAgentConfig {
        UserAgentConfig {
            raw: None,
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&create_test_config()).unwrap()
    }

    fn page_url(server: &MockServer, page: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), page)).unwrap()
    }

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&create_test_config()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_parses_html_and_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nota"))
            .and(header(
                "user-agent",
                "TestCrawler/1.0 (+https://example.com/about; admin@example.com)",
            ))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body><h1>Hola</h1></body></html>", "text/html"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let document = fetcher()
            .fetch(&page_url(&server, "/nota"), TIMEOUT)
            .await
            .unwrap();
        let h1 = Selector::parse("h1").unwrap();
        let text: String = document.select(&h1).flat_map(|e| e.text()).collect();
        assert_eq!(text, "Hola");
    }

    #[tokio::test]
    async fn test_fetch_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetcher()
            .fetch(&page_url(&server, "/missing"), TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert_eq!(err.kind(), "status");
    }

    #[tokio::test]
    async fn test_fetch_empty_body_is_unparseable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("  \n", "text/html"))
            .mount(&server)
            .await;

        let err = fetcher()
            .fetch(&page_url(&server, "/vacia"), TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Unparseable { .. }));
    }

    #[tokio::test]
    async fn test_fetch_invalid_utf8_is_unparseable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfe, 0x00, 0xc3]))
            .mount(&server)
            .await;

        let err = fetcher()
            .fetch(&page_url(&server, "/binario"), TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Unparseable { .. }));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<p>tarde</p>", "text/html")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let err = fetcher()
            .fetch(&page_url(&server, "/lenta"), Duration::from_millis(200))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_fetch_waits_up_to_portal_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<p>a tiempo</p>", "text/html")
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;

        let result = fetcher()
            .fetch(&page_url(&server, "/lenta"), Duration::from_secs(3))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap();

        let err = fetcher().fetch(&url, TIMEOUT).await.unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }));
    }
}
