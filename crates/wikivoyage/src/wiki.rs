//! Configured wiki handle

use crate::client::{build_client, fetch_page, fetch_search, validate_url, FetchOptions};
use crate::error::FetchError;
use crate::extract::Extractor;
use crate::types::{PageResult, SearchResult};
use std::time::Duration;

/// Builder for configuring a [`Wiki`]
#[derive(Debug, Clone, Default)]
pub struct WikiBuilder {
    options: FetchOptions,
}

impl WikiBuilder {
    /// Create a builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.options.user_agent = Some(ua.into());
        self
    }

    /// Set the wiki origin, e.g. `https://de.wikivoyage.org`
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.options.base_url = Some(base_url.into());
        self
    }

    /// Set the total request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Route all requests through a proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.options.proxy = Some(proxy.into());
        self
    }

    /// Build the wiki handle
    pub fn build(self) -> Result<Wiki, FetchError> {
        let client = build_client(&self.options)?;
        Ok(Wiki {
            client,
            options: self.options,
        })
    }
}

/// A wiki handle reusing one HTTP client across calls
#[derive(Debug, Clone)]
pub struct Wiki {
    client: reqwest::Client,
    options: FetchOptions,
}

impl Wiki {
    /// Create a new wiki builder
    pub fn builder() -> WikiBuilder {
        WikiBuilder::new()
    }

    /// Options this handle was built with
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Extractor bound to this wiki's origin
    pub fn extractor(&self) -> Extractor {
        Extractor::new(self.options.effective_base_url())
    }

    /// Fetch a page and extract its sections
    pub async fn get(&self, url: &str) -> Result<PageResult, FetchError> {
        validate_url(url)?;
        fetch_page(&self.client, url, &self.options.link_origin(url)).await
    }

    /// Search page titles
    pub async fn search(&self, query: &str) -> Result<SearchResult, FetchError> {
        fetch_search(&self.client, self.options.effective_base_url(), query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_USER_AGENT;

    #[test]
    fn test_wiki_builder() {
        let wiki = Wiki::builder()
            .user_agent("TestAgent/1.0")
            .base_url("https://fr.wikivoyage.org")
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap();

        let options = wiki.options();
        assert_eq!(options.user_agent, Some("TestAgent/1.0".to_string()));
        assert_eq!(options.effective_base_url(), "https://fr.wikivoyage.org");
        assert_eq!(options.timeout, Some(Duration::from_secs(3)));
        assert_eq!(wiki.extractor().origin(), "https://fr.wikivoyage.org");
    }

    #[test]
    fn test_wiki_defaults() {
        let wiki = Wiki::builder().build().unwrap();
        assert_eq!(wiki.options().effective_user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(wiki.extractor().origin(), "https://en.wikivoyage.org");
    }

    #[tokio::test]
    async fn test_wiki_get_validates_url() {
        let wiki = Wiki::builder().build().unwrap();
        assert!(matches!(wiki.get("").await, Err(FetchError::MissingUrl)));
        assert!(matches!(
            wiki.get("wikivoyage.org/wiki/Paris").await,
            Err(FetchError::InvalidUrlScheme)
        ));
    }
}
