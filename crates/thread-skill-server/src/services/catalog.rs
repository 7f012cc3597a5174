use reqwest::Client;
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::CatalogConfig;
use crate::models::{CatalogEntry, CatalogPayload, Thread};
use crate::utils::error::SkillError;
use crate::utils::text::{normalize_spaces, rendered_text};

/// Source of raw catalog entries, in feed order.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogFeed: Send + Sync {
    async fn fetch(&self) -> Result<Vec<CatalogEntry>, SkillError>;
}

/// Catalog feed served over HTTP.
#[derive(Clone)]
pub struct HttpCatalogFeed {
    client: Client,
    url: String,
}

impl HttpCatalogFeed {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SkillError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SkillError::from_reqwest("threads", e))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait::async_trait]
impl CatalogFeed for HttpCatalogFeed {
    async fn fetch(&self) -> Result<Vec<CatalogEntry>, SkillError> {
        debug!("Pulling catalog from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SkillError::from_reqwest("threads", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SkillError::Fetch {
                resource: "threads",
                status: status.as_u16(),
            });
        }

        let payload: CatalogPayload = response
            .json()
            .await
            .map_err(|e| SkillError::from_reqwest("threads", e))?;

        Ok(payload.threads)
    }
}

/// Fetches, filters and ranks the thread list. Every call re-fetches.
pub struct ThreadCatalog {
    feed: Arc<dyn CatalogFeed>,
    blocked_title_prefixes: Vec<String>,
    skip_first_n: usize,
}

impl ThreadCatalog {
    pub fn new(feed: Arc<dyn CatalogFeed>, blocked_title_prefixes: Vec<String>, skip_first_n: usize) -> Self {
        Self {
            feed,
            blocked_title_prefixes: blocked_title_prefixes
                .into_iter()
                .map(|prefix| prefix.to_lowercase())
                .collect(),
            skip_first_n,
        }
    }

    pub fn from_config(feed: Arc<dyn CatalogFeed>, config: &CatalogConfig) -> Self {
        Self::new(feed, config.blocked_title_prefixes.clone(), config.skip_first_n)
    }

    /// Ranked threads, longest first when `descending`.
    pub async fn list(&self, descending: bool) -> Result<Vec<Thread>, SkillError> {
        self.list_skipping(descending, self.skip_first_n).await
    }

    pub async fn list_skipping(&self, descending: bool, skip_first_n: usize) -> Result<Vec<Thread>, SkillError> {
        let entries = self.feed.fetch().await?;
        let n_entries = entries.len();

        let visible: Vec<CatalogEntry> = entries
            .into_iter()
            .filter(|entry| !self.is_blocked(&entry.comment))
            .collect();

        let mut threads = Thread::from_entries(visible);

        threads.sort_by(|a, b| {
            let ordering = a
                .post_count
                .cmp(&b.post_count)
                .then(a.freshness.partial_cmp(&b.freshness).unwrap_or(Ordering::Equal));
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });

        let threads: Vec<Thread> = threads.into_iter().skip(skip_first_n).collect();

        info!(
            fetched = n_entries,
            listed = threads.len(),
            "Thread catalog refreshed"
        );
        if let Some(top) = threads.first() {
            debug!(id = top.id, posts = top.post_count, "Top thread: {}", top.header());
        }

        Ok(threads)
    }

    fn is_blocked(&self, markup: &str) -> bool {
        if self.blocked_title_prefixes.is_empty() {
            return false;
        }

        let text = normalize_spaces(rendered_text(markup).to_lowercase().trim());
        self.blocked_title_prefixes
            .iter()
            .any(|prefix| text.starts_with(prefix.as_str()))
    }
}
