use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::models::{Thread, ThreadPayload, Topic};
use crate::utils::error::SkillError;
use crate::utils::text::{html_to_text, normalize};

/// Fetches the topics of a thread given its permalink.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CommentSource: Send + Sync {
    async fn fetch_topics(&self, link: &str) -> Result<Vec<Topic>, SkillError>;
}

/// Reads the JSON rendition of a thread page (`.../res/{id}.json`).
#[derive(Clone)]
pub struct HttpCommentSource {
    client: Client,
}

impl HttpCommentSource {
    pub fn new(timeout: Duration) -> Result<Self, SkillError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SkillError::from_reqwest("comments", e))?;

        Ok(Self { client })
    }

    fn json_url(link: &str) -> String {
        match link.strip_suffix(".html") {
            Some(stem) => format!("{}.json", stem),
            None => link.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl CommentSource for HttpCommentSource {
    async fn fetch_topics(&self, link: &str) -> Result<Vec<Topic>, SkillError> {
        let url = Self::json_url(link);
        debug!("Pulling comments from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SkillError::from_reqwest("comments", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SkillError::Fetch {
                resource: "comments",
                status: status.as_u16(),
            });
        }

        let payload: ThreadPayload = response
            .json()
            .await
            .map_err(|e| SkillError::from_reqwest("comments", e))?;

        Ok(payload.threads)
    }
}

/// Post list of a thread: its title followed by every topic's comments.
pub fn build_post_list(thread: &Thread, topics: &[Topic]) -> Vec<String> {
    std::iter::once(normalize(&thread.title_text()))
        .chain(
            topics
                .iter()
                .flat_map(|topic| topic.comments())
                .map(|comment| normalize(&html_to_text(comment))),
        )
        .collect()
}
