//! HTTP client for Wikivoyage
//!
//! Page fetching and opensearch queries. The free functions build a fresh
//! `reqwest::Client` per call; [`Wiki`](crate::Wiki) keeps one around.

use crate::error::FetchError;
use crate::extract::Extractor;
use crate::types::{PageResult, SearchResult};
use crate::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Total request timeout unless overridden
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connect timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of search results requested and returned
pub const SEARCH_LIMIT: usize = 10;

/// Transport options passed through to the HTTP client
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Wiki origin for search; overrides the page origin for links
    pub base_url: Option<String>,
    /// Total request timeout
    pub timeout: Option<Duration>,
    /// Proxy URL applied to all schemes
    pub proxy: Option<String>,
}

impl FetchOptions {
    /// Get the effective wiki origin
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Origin used to resolve links on `page_url`.
    ///
    /// An explicit `base_url` wins; otherwise the page's own origin is used.
    pub fn link_origin(&self, page_url: &str) -> String {
        if let Some(ref base_url) = self.base_url {
            return base_url.clone();
        }
        match Url::parse(page_url).map(|url| url.origin()) {
            Ok(origin) if origin.is_tuple() => origin.ascii_serialization(),
            _ => DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Get the effective User-Agent
    pub fn effective_user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

/// opensearch response: `[query, [titles], [descriptions], [links]]`
#[derive(Debug, Deserialize)]
struct OpenSearchResponse(String, Vec<String>, IgnoredAny, Vec<String>);

/// Fetch a page and extract its sections
pub async fn get(url: &str) -> Result<PageResult, FetchError> {
    get_with_options(url, &FetchOptions::default()).await
}

/// Fetch a page with custom options
pub async fn get_with_options(
    url: &str,
    options: &FetchOptions,
) -> Result<PageResult, FetchError> {
    validate_url(url)?;
    let client = build_client(options)?;
    fetch_page(&client, url, &options.link_origin(url)).await
}

/// Search page titles, returning at most [`SEARCH_LIMIT`] `(title, link)` pairs
pub async fn search(query: &str) -> Result<SearchResult, FetchError> {
    search_with_options(query, &FetchOptions::default()).await
}

/// Search with custom options
pub async fn search_with_options(
    query: &str,
    options: &FetchOptions,
) -> Result<SearchResult, FetchError> {
    let client = build_client(options)?;
    fetch_search(&client, options.effective_base_url(), query).await
}

pub(crate) fn validate_url(url: &str) -> Result<(), FetchError> {
    if url.is_empty() {
        return Err(FetchError::MissingUrl);
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(FetchError::InvalidUrlScheme);
    }

    Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
    Ok(())
}

pub(crate) fn build_client(options: &FetchOptions) -> Result<reqwest::Client, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(options.effective_user_agent())
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
    );

    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(options.timeout.unwrap_or(DEFAULT_TIMEOUT));

    if let Some(ref proxy) = options.proxy {
        let proxy = reqwest::Proxy::all(proxy.as_str()).map_err(FetchError::ClientBuildError)?;
        builder = builder.proxy(proxy);
    }

    builder.build().map_err(FetchError::ClientBuildError)
}

pub(crate) async fn fetch_page(
    client: &reqwest::Client,
    url: &str,
    origin: &str,
) -> Result<PageResult, FetchError> {
    debug!(url, "Fetching page");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(FetchError::from_reqwest)?;
    let html = read_success_body(response, url).await?;

    // Html is !Send; parse only after the last await
    Ok(Extractor::new(origin).extract_page(url, &html))
}

pub(crate) async fn fetch_search(
    client: &reqwest::Client,
    base_url: &str,
    query: &str,
) -> Result<SearchResult, FetchError> {
    let endpoint = search_url(base_url, query)?;
    debug!(query, endpoint = %endpoint, "Searching");

    let response = client
        .get(endpoint.clone())
        .send()
        .await
        .map_err(FetchError::from_reqwest)?;
    let body = read_success_body(response, endpoint.as_str()).await?;

    parse_opensearch(&body)
}

async fn read_success_body(response: reqwest::Response, url: &str) -> Result<String, FetchError> {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(FetchError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    response.text().await.map_err(FetchError::from_reqwest)
}

/// Build the opensearch API URL for `query`
fn search_url(base_url: &str, query: &str) -> Result<Url, FetchError> {
    let api = format!("{}/w/api.php", base_url.trim_end_matches('/'));
    let limit = SEARCH_LIMIT.to_string();
    Url::parse_with_params(
        &api,
        &[
            ("action", "opensearch"),
            ("format", "json"),
            ("formatversion", "2"),
            ("search", query),
            ("namespace", "0"),
            ("limit", limit.as_str()),
        ],
    )
    .map_err(|e| FetchError::InvalidUrl(e.to_string()))
}

/// Pair titles with links; unequal arrays are truncated to the shorter one
fn parse_opensearch(body: &str) -> Result<SearchResult, FetchError> {
    let OpenSearchResponse(query, titles, _, links) =
        serde_json::from_str(body).map_err(FetchError::Decode)?;

    if titles.len() != links.len() {
        warn!(
            query = %query,
            titles = titles.len(),
            links = links.len(),
            "Search titles and links differ in length, truncating"
        );
    }

    Ok(titles.into_iter().zip(links).take(SEARCH_LIMIT).collect())
}
