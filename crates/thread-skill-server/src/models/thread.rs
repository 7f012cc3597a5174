use serde::Deserialize;

use crate::utils::text::{headline, html_to_text};

const MAX_HEADER_LENGTH: usize = 100;

// ===== FEED MODELS =====

/// Catalog feed payload: `{"threads": [...]}`.
#[derive(Debug, Deserialize)]
pub struct CatalogPayload {
    #[serde(default)]
    pub threads: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub posts_count: i64,
    pub num: i64,
}

/// Thread feed payload: every element of `threads` is a topic.
#[derive(Debug, Deserialize)]
pub struct ThreadPayload {
    #[serde(default)]
    pub threads: Vec<Topic>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Topic {
    #[serde(default)]
    pub posts: Vec<TopicPost>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopicPost {
    #[serde(default)]
    pub comment: String,
}

impl Topic {
    pub fn comments(&self) -> impl Iterator<Item = &str> {
        self.posts.iter().map(|post| post.comment.as_str())
    }
}

// ===== DOMAIN MODEL =====

/// A catalog thread. Freshness is `1 - rank / n` over feed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Thread {
    pub id: i64,
    pub title_markup: String,
    pub post_count: i64,
    pub freshness: f64,
}

impl Thread {
    pub fn new(id: i64, title_markup: impl Into<String>, post_count: i64, freshness: f64) -> Self {
        Self {
            id,
            title_markup: title_markup.into(),
            post_count,
            freshness,
        }
    }

    /// Build threads from feed entries, ranking freshness by feed position.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Vec<Thread> {
        let n_entries = entries.len() as f64;

        entries
            .into_iter()
            .enumerate()
            .map(|(rank, entry)| {
                Thread::new(
                    entry.num,
                    entry.comment,
                    entry.posts_count,
                    1.0 - rank as f64 / n_entries,
                )
            })
            .collect()
    }

    pub fn title_text(&self) -> String {
        html_to_text(&self.title_markup)
    }

    pub fn header(&self) -> String {
        headline(&self.title_markup, MAX_HEADER_LENGTH)
    }

    /// Permalink of the thread page on `board_url`.
    pub fn link(&self, board_url: &str) -> String {
        format!("{}/res/{}.html", board_url.trim_end_matches('/'), self.id)
    }
}
