//! Crawler that fetches every selected source concurrently
//!
//! Sources run in parallel with each other, but pages within one paginated
//! source are fetched sequentially in ascending order. A failure in one
//! source is caught at its boundary and contributes nothing; it never aborts
//! the run or its siblings.

use crate::proxy::filter::AddressFilter;
use crate::proxy::sources::Source;
use crate::Result;
use futures::future::join_all;
use reqwest::Client;
use std::collections::BTreeSet;
use std::time::Duration;

/// Default timeout for HTTP requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent for HTTP requests
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Timeout for each HTTP request
    pub timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: String,
    /// Validate octet and port ranges when filtering plain-text bodies
    pub strict: bool,
    /// Stop paginating a source after the first page that yields no tokens
    pub stop_on_empty_page: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            strict: false,
            stop_on_empty_page: false,
        }
    }
}

impl CrawlerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_stop_on_empty_page(mut self, stop: bool) -> Self {
        self.stop_on_empty_page = stop;
        self
    }
}

/// Crawler holding the shared HTTP client
pub struct Crawler {
    config: CrawlerConfig,
    client: Client,
    filter: AddressFilter,
}

impl Crawler {
    /// Create a new crawler with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(CrawlerConfig::default())
    }

    /// Create a new crawler with custom configuration
    pub fn with_config(config: CrawlerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;
        let filter = if config.strict {
            AddressFilter::strict()
        } else {
            AddressFilter::new()
        };

        Ok(Self {
            config,
            client,
            filter,
        })
    }

    /// Fetch one source, driving its pages in ascending order.
    ///
    /// Pages are sequential on purpose: re-issuing a source's pages in
    /// parallel trips anti-scraping defenses, and some sites key later pages
    /// off earlier responses.
    pub async fn fetch_source(&self, source: &Source) -> Result<Vec<String>> {
        let mut tokens = Vec::new();
        for page in source.page_range() {
            let url = source.url_for(page);
            let body = self.client.get(&url).send().await?.text().await?;
            let page_tokens = source.extract.tokens(&body, source.kind, &self.filter);
            if self.config.stop_on_empty_page && page_tokens.is_empty() {
                break;
            }
            tokens.extend(page_tokens);
        }
        Ok(tokens)
    }

    /// Fetch all sources concurrently and return the flattened token list.
    ///
    /// Each source is isolated: an error is swallowed at the boundary and
    /// the source simply contributes nothing. The call waits for every
    /// source to finish.
    pub async fn scrape_all(&self, sources: &[&Source], verbose: bool) -> Vec<String> {
        let tasks = sources.iter().map(|source| async move {
            if verbose {
                println!("Looking {}...", source.display_url());
            }
            match self.fetch_source(source).await {
                Ok(tokens) => tokens,
                Err(err) => {
                    if verbose {
                        eprintln!("Skipping {}: {}", source.name, err);
                    }
                    Vec::new()
                }
            }
        });

        join_all(tasks).await.into_iter().flatten().collect()
    }

    /// Fetch all sources and reduce the result to a deduplicated set.
    ///
    /// `BTreeSet` gives exact case-sensitive string dedup and a sorted,
    /// reproducible iteration order for the output file.
    pub async fn harvest(&self, sources: &[&Source], verbose: bool) -> BTreeSet<String> {
        self.scrape_all(sources, verbose).await.into_iter().collect()
    }
}
