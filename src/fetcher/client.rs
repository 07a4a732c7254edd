use crate::config::Config;
use crate::fetcher::{errors::FetchError, pipeline::process_response, types::PageResponse};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{info, instrument};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_REDIRECTS: usize = 10;
const BINARY_TYPE_PREFIXES: &[&str] = &["image/", "audio/", "video/", "font/"];
const BINARY_TYPES: &[&str] = &[
    "application/octet-stream",
    "application/pdf",
    "application/zip",
    "application/gzip",
];
pub const DEFAULT_USER_AGENT: &str = "PreviewTag/0.1 (+https://github.com/preview-tag)";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    build_client(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT).expect("Failed to build HTTP client")
});

fn build_client(user_agent: &str, timeout: Duration) -> reqwest::Result<Client> {
    ClientBuilder::new()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(timeout)
        .user_agent(user_agent)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                    .parse()
                    .unwrap(),
            );
            headers
        })
        .build()
}

/// Media types that can never hold markup. Everything else is parsed.
fn is_binary_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    BINARY_TYPE_PREFIXES
        .iter()
        .any(|prefix| mime.starts_with(prefix))
        || BINARY_TYPES.contains(&mime.as_str())
}

/// Anything that can turn a URL into a decoded HTML page.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<PageResponse, FetchError>;
}

/// [`PageSource`] backed by a real HTTP client.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let client = build_client(config.user_agent(), config.fetch_timeout())
            .map_err(|e| FetchError::Unknown(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
        }
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<PageResponse, FetchError> {
        fetch_with(&self.client, url).await
    }
}

/// Fetch a page with the shared default client.
pub async fn fetch(url: &str) -> Result<PageResponse, FetchError> {
    fetch_with(&HTTP_CLIENT, url).await
}

#[instrument(skip_all, fields(url = %url))]
async fn fetch_with(client: &Client, url: &str) -> Result<PageResponse, FetchError> {
    let parsed_url = url::Url::parse(url)?;

    let response = client
        .get(parsed_url)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    // Check content length before downloading
    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let final_url = response.url().clone();
    let status = response.status();
    let headers = response.headers().clone();

    if !status.is_success() {
        return Err(FetchError::Http { status });
    }

    let content_type = headers
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    if is_binary_content_type(&content_type) {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let body_bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Io(e.to_string()))?;

    // Content-Length may have been missing
    if body_bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    let page = process_response(final_url, status, headers, body_bytes, &content_type);
    info!(
        status = %page.status,
        charset = ?page.charset,
        size = page.body_raw.len(),
        "fetched page"
    );
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_content_types() {
        assert!(is_binary_content_type("image/jpeg"));
        assert!(is_binary_content_type("Video/MP4"));
        assert!(is_binary_content_type("application/pdf; name=a.pdf"));
        assert!(is_binary_content_type("application/octet-stream"));
    }

    #[test]
    fn test_text_content_types_are_parsed() {
        assert!(!is_binary_content_type("text/html; charset=utf-8"));
        assert!(!is_binary_content_type("text/plain"));
        assert!(!is_binary_content_type("application/xml"));
        assert!(!is_binary_content_type("application/xhtml+xml"));
        assert!(!is_binary_content_type(""));
    }
}
