/// dispatcher.rs
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::PlatformConfig;
use crate::models::Thread;
use crate::platforms::PlatformAdapter;
use crate::services::catalog::ThreadCatalog;
use crate::services::comments::{build_post_list, CommentSource};
use crate::utils::error::SkillError;
use crate::utils::text::{char_len, normalize, truncate_chars};

use super::cache::PostCache;
use super::intent::{prepare, Command, Intent, IntentVocabulary};
use super::sessions::SessionTable;
use super::types::{Position, Reply, Session, SessionState};
use super::window::{slice, Chunk, WindowBudget};

pub const HELP_TEXT: &str =
    "Я могу озвучивать треды с двача. Просто назовите номер заинтересовавшего вас треда";
pub const FAREWELL_TEXT: &str = "Завершаю показ тредов";
pub const NO_MORE_COMMENTS_TEXT: &str = "Больше не осталось комментариев";
pub const NO_THREADS_TEXT: &str = "Сейчас нет доступных тредов";
pub const FAILURE_TEXT: &str = "Не получилось загрузить треды, попробуйте позже";

/// Pagination knobs of one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Threads per listing page.
    pub page_size: usize,
    pub budget: WindowBudget,
}

impl From<&PlatformConfig> for Pagination {
    fn from(config: &PlatformConfig) -> Self {
        Self {
            page_size: config.page_size,
            budget: WindowBudget {
                chars: config.char_budget_per_response,
                separator_overhead: config.post_separator_overhead_chars,
                overlap: config.overlap_count,
            },
        }
    }
}

/// Shared collaborators, one set per process.
#[derive(Clone)]
pub struct Backends {
    pub catalog: Arc<ThreadCatalog>,
    pub comments: Arc<dyn CommentSource>,
    pub posts: Arc<PostCache>,
    pub board_url: String,
}

/// Drives the per-user navigation of one platform.
pub struct Dispatcher {
    adapter: Arc<dyn PlatformAdapter>,
    backends: Backends,
    pagination: Pagination,
    sessions: SessionTable,
}

impl Dispatcher {
    pub fn new(adapter: Arc<dyn PlatformAdapter>, backends: Backends, pagination: Pagination) -> Self {
        info!(
            platform = adapter.name(),
            page_size = pagination.page_size,
            budget = pagination.budget.chars,
            overlap = pagination.budget.overlap,
            "Dispatcher ready"
        );

        Self {
            adapter,
            backends,
            pagination,
            sessions: SessionTable::new(),
        }
    }

    pub fn platform(&self) -> &'static str {
        self.adapter.name()
    }

    pub fn active_users(&self) -> usize {
        self.sessions.len()
    }

    /// Answer one platform request. Upstream failures become a spoken
    /// apology; only a request without a user id is rejected.
    pub async fn handle(&self, request: &Value) -> Result<Value, SkillError> {
        let user_id = self.adapter.user_id(request).ok_or(SkillError::MissingUserId)?;
        let utterance = self.adapter.utterance(request).unwrap_or_default();

        let reply = match self.handle_turn(&user_id, &utterance).await {
            Ok(reply) => reply,
            Err(err) if err.is_upstream() => {
                warn!(platform = self.platform(), user = %user_id, "Turn failed: {}", err);
                Reply::text(FAILURE_TEXT)
            }
            Err(err) => return Err(err),
        };

        Ok(match reply {
            Reply::Text { text, interactive } => {
                self.adapter.make_response(request, &text, None, interactive)
            }
            Reply::Posts(posts) => self.adapter.posts_to_response(request, &posts),
        })
    }

    /// Run one turn of `user_id`. Turns of the same user are serialized.
    pub async fn handle_turn(&self, user_id: &str, utterance: &str) -> Result<Reply, SkillError> {
        let utterance = prepare(utterance);
        info!(platform = self.platform(), user = %user_id, "Got utterance \"{}\"", utterance);

        if self.vocabulary().matches(Command::Help, &utterance) {
            return Ok(Reply::text(HELP_TEXT));
        }

        let slot = self.sessions.slot(user_id);
        let mut state = slot.lock().await;

        let intent = self.classify(&state, &utterance);
        debug!(user = %user_id, ?intent, "Classified utterance");

        self.apply(&mut state, intent).await
    }

    fn vocabulary(&self) -> &IntentVocabulary {
        self.adapter.vocabulary()
    }

    /// First matching rule wins. Help is answered before this runs.
    /// Repeat/continue/rewind only apply while a thread is open, a selection
    /// only within the last page.
    pub fn classify(&self, state: &SessionState, utterance: &str) -> Intent {
        let vocabulary = self.vocabulary();

        let session = match state {
            SessionState::Active(session) if !vocabulary.matches(Command::Reset, utterance) => session,
            _ => return Intent::Reset,
        };
        let viewing = session.viewing().is_some();

        if vocabulary.matches(Command::Stop, utterance) {
            return Intent::Stop;
        }
        if viewing && vocabulary.matches(Command::Repeat, utterance) {
            return Intent::Repeat;
        }
        if viewing && vocabulary.matches(Command::Continue, utterance) {
            return Intent::Continue;
        }
        if viewing && vocabulary.matches(Command::Rewind, utterance) {
            return Intent::Rewind;
        }
        if vocabulary.matches(Command::Forward, utterance) {
            return Intent::Forward;
        }
        if vocabulary.matches(Command::Back, utterance) {
            return Intent::Back;
        }

        match vocabulary.infer_index(utterance) {
            Some(index) if index < session.last_batch_size => Intent::Select(index),
            _ => Intent::Default,
        }
    }

    async fn apply(&self, state: &mut SessionState, intent: Intent) -> Result<Reply, SkillError> {
        if !state.is_started() {
            let threads = self.backends.catalog.list(true).await?;
            *state = SessionState::Active(Session::new(threads));
            return Ok(self.render_listing(state.active_mut()?));
        }

        let session = state.active_mut()?;

        match intent {
            Intent::Reset => {
                *session = Session::new(self.backends.catalog.list(true).await?);
                Ok(self.render_listing(session))
            }
            Intent::Stop => Ok(Reply::farewell(FAREWELL_TEXT)),
            Intent::Repeat => {
                let (index, _) = session.viewing().ok_or(SkillError::UninitializedSession)?;
                let distance = session.last_distance + 1;

                match self.window(session, index, Some(distance)).await? {
                    Some(chunk) => Ok(Reply::Posts(chunk.lines)),
                    None => Ok(Reply::text(NO_MORE_COMMENTS_TEXT)),
                }
            }
            Intent::Continue | Intent::Rewind => {
                let (index, distance) = session.viewing().ok_or(SkillError::UninitializedSession)?;
                let resume = if intent == Intent::Continue {
                    distance + 1
                } else {
                    (distance - 1).max(0)
                };

                match self.window(session, index, Some(resume)).await? {
                    Some(chunk) => {
                        session.last_distance = distance;
                        session.position = Position::Viewing {
                            index,
                            distance: chunk.next_distance,
                        };
                        Ok(Reply::Posts(chunk.lines))
                    }
                    None => Ok(Reply::text(NO_MORE_COMMENTS_TEXT)),
                }
            }
            Intent::Forward => {
                let mut last_batch_size = session.last_batch_size;
                let index = match session.index() {
                    None => 0,
                    Some(current) => {
                        let index = (current + 1).min(session.n_threads() - session.offset - 1);
                        if index >= last_batch_size as i64 {
                            last_batch_size += 1;
                        }
                        index
                    }
                };

                let reply = self.open(session, index).await?;
                session.last_batch_size = last_batch_size;
                Ok(reply)
            }
            Intent::Back => {
                let index = match session.index() {
                    None => 0,
                    Some(current) => (current - 1).max(-session.offset),
                };

                self.open(session, index).await
            }
            Intent::Select(index) => self.open(session, index as i64).await,
            Intent::Default => {
                session.position = Position::Listing;
                let furthest = session.n_threads() - self.pagination.page_size as i64;
                session.offset = furthest.min(session.offset + session.last_batch_size as i64).max(0);
                Ok(self.render_listing(session))
            }
        }
    }

    /// Open the thread at `offset + index` with a fresh window.
    async fn open(&self, session: &mut Session, index: i64) -> Result<Reply, SkillError> {
        let target = session.offset + index;

        if session.thread_at(target).is_none() {
            warn!(target, threads = session.n_threads(), "Navigation left the thread list");
            session.position = Position::Listing;
            return Ok(self.render_listing(session));
        }

        let chunk = self
            .window(session, index, None)
            .await?
            .ok_or(SkillError::UninitializedSession)?;

        session.last_distance = 0;
        session.position = Position::Viewing {
            index,
            distance: chunk.next_distance,
        };

        Ok(Reply::Posts(chunk.lines))
    }

    /// Window over the posts of the thread at `offset + index`.
    async fn window(&self, session: &Session, index: i64, distance: Option<i64>) -> Result<Option<Chunk>, SkillError> {
        let thread = session
            .thread_at(session.offset + index)
            .ok_or(SkillError::UninitializedSession)?;
        let posts = self.posts_of(thread).await?;

        Ok(slice(&posts, distance, &self.pagination.budget))
    }

    async fn posts_of(&self, thread: &Thread) -> Result<Arc<Vec<String>>, SkillError> {
        let link = thread.link(&self.backends.board_url);
        let comments = self.backends.comments.clone();

        self.backends
            .posts
            .get_or_load(thread.id, || async move {
                let topics = comments.fetch_topics(&link).await?;
                Ok(build_post_list(thread, &topics))
            })
            .await
    }

    /// Numbered titles from `offset`, as many as fit the page and budget.
    fn render_listing(&self, session: &mut Session) -> Reply {
        let budget = self.pagination.budget.chars;
        let mut lines: Vec<String> = Vec::new();
        let mut total = 0;

        for i in 0..self.pagination.page_size {
            let Some(thread) = session.thread_at(session.offset + i as i64) else {
                break;
            };

            let mut line = format!("Тред номер {}. {}.", i + 1, normalize(&thread.title_text()));
            let len = char_len(&line);

            if !lines.is_empty() {
                if total + len > budget {
                    break;
                }
            } else if len > budget {
                line = truncate_chars(&line, budget).to_string();
            }

            total += char_len(&line);
            lines.push(line);
        }

        session.last_batch_size = lines.len();

        if lines.is_empty() {
            return Reply::text(NO_THREADS_TEXT);
        }

        Reply::Posts(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::thread::TopicPost;
    use crate::models::{CatalogEntry, Topic};
    use crate::platforms::VkAdapter;
    use crate::services::catalog::MockCatalogFeed;
    use crate::services::comments::MockCommentSource;
    use std::time::Duration;

    /// Catalog of `n` threads with equal length, so feed order is kept.
    fn entries(n: i64) -> Vec<CatalogEntry> {
        (1..=n)
            .map(|num| CatalogEntry {
                comment: format!("Thread {}", num),
                posts_count: 10,
                num,
            })
            .collect()
    }

    /// Every thread has comments `c1..=c{comments}`, each `len` chars long.
    fn dispatcher(n_threads: i64, comments: usize, pagination: Pagination) -> Dispatcher {
        let mut feed = MockCatalogFeed::new();
        feed.expect_fetch().returning(move || Ok(entries(n_threads)));

        let mut source = MockCommentSource::new();
        source.expect_fetch_topics().returning(move |_| {
            Ok(vec![Topic {
                posts: (1..=comments)
                    .map(|i| TopicPost {
                        comment: format!("c{}", i),
                    })
                    .collect(),
            }])
        });

        let backends = Backends {
            catalog: Arc::new(ThreadCatalog::new(Arc::new(feed), vec![], 0)),
            comments: Arc::new(source),
            posts: Arc::new(PostCache::new(Duration::from_secs(3600))),
            board_url: "https://board.test/b".to_string(),
        };

        Dispatcher::new(Arc::new(VkAdapter::new()), backends, pagination)
    }

    fn pagination(page_size: usize, chars: usize, overlap: usize) -> Pagination {
        Pagination {
            page_size,
            budget: WindowBudget {
                chars,
                separator_overhead: 0,
                overlap,
            },
        }
    }

    fn posts(reply: Reply) -> Vec<String> {
        match reply {
            Reply::Posts(posts) => posts,
            other => panic!("expected posts, got {:?}", other),
        }
    }

    async fn session_of(dispatcher: &Dispatcher, user: &str) -> Session {
        let slot = dispatcher.sessions.slot(user);
        let state = slot.lock().await;
        let session = state.active().unwrap().clone();
        session
    }

    #[tokio::test]
    async fn test_first_turn_lists_threads() {
        let d = dispatcher(12, 3, pagination(5, 1000, 1));
        let lines = posts(d.handle_turn("u", "привет").await.unwrap());

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Тред номер 1. Thread 1.");
        assert_eq!(lines[4], "Тред номер 5. Thread 5.");

        let session = session_of(&d, "u").await;
        assert_eq!(session.last_batch_size, 5);
        assert_eq!(session.offset, 0);
        assert_eq!(session.position, Position::Listing);
    }

    #[tokio::test]
    async fn test_help_leaves_session_alone() {
        let d = dispatcher(3, 3, pagination(5, 1000, 1));
        let reply = d.handle_turn("u", "Что ты умеешь?").await.unwrap();
        assert_eq!(reply, Reply::text(HELP_TEXT));
        assert!(d.sessions.slot("u").lock().await.active().is_err());
    }

    #[tokio::test]
    async fn test_default_advances_page_and_clamps() {
        let d = dispatcher(12, 3, pagination(5, 1000, 1));
        d.handle_turn("u", "старт").await.unwrap();

        let lines = posts(d.handle_turn("u", "ещё треды").await.unwrap());
        assert_eq!(lines[0], "Тред номер 1. Thread 6.");
        assert_eq!(session_of(&d, "u").await.offset, 5);

        // 12 threads, page of 5: the last page starts at 7.
        let lines = posts(d.handle_turn("u", "ещё").await.unwrap());
        assert_eq!(lines[0], "Тред номер 1. Thread 8.");
        assert_eq!(lines.len(), 5);
        assert_eq!(session_of(&d, "u").await.offset, 7);
    }

    #[tokio::test]
    async fn test_selection_opens_thread() {
        let d = dispatcher(6, 3, pagination(5, 1000, 1));
        d.handle_turn("u", "старт").await.unwrap();

        let lines = posts(d.handle_turn("u", "второй").await.unwrap());
        assert_eq!(lines, vec!["Thread 2", "c1", "c2", "c3"]);

        let session = session_of(&d, "u").await;
        assert_eq!(session.position, Position::Viewing { index: 1, distance: 3 });
        assert_eq!(session.last_distance, 0);
    }

    #[tokio::test]
    async fn test_selection_beyond_page_falls_to_default() {
        let d = dispatcher(10, 3, pagination(3, 1000, 1));
        d.handle_turn("u", "старт").await.unwrap();
        assert_eq!(session_of(&d, "u").await.last_batch_size, 3);

        let lines = posts(d.handle_turn("u", "четвертый").await.unwrap());
        assert_eq!(lines[0], "Тред номер 1. Thread 4.");
        assert_eq!(session_of(&d, "u").await.offset, 3);
    }

    #[tokio::test]
    async fn test_continue_until_exhausted() {
        // "Thread 1" is 8 chars, comments are 2 chars: 3 posts per turn.
        let d = dispatcher(3, 6, pagination(5, 13, 1));
        d.handle_turn("u", "старт").await.unwrap();

        let first = posts(d.handle_turn("u", "первый").await.unwrap());
        assert_eq!(first, vec!["Thread 1", "c1"]);

        let mut heard = first.clone();
        for _ in 0..10 {
            match d.handle_turn("u", "дальше").await.unwrap() {
                Reply::Posts(lines) => heard.extend(lines),
                Reply::Text { text, .. } => {
                    assert_eq!(text, NO_MORE_COMMENTS_TEXT);
                    break;
                }
            }
        }

        for i in 1..=6 {
            assert!(heard.contains(&format!("c{}", i)), "c{} never read", i);
        }

        // Exhaustion keeps the cursor where it was.
        let before = session_of(&d, "u").await;
        let reply = d.handle_turn("u", "дальше").await.unwrap();
        assert_eq!(reply, Reply::text(NO_MORE_COMMENTS_TEXT));
        assert_eq!(session_of(&d, "u").await.position, before.position);
    }

    #[tokio::test]
    async fn test_repeat_is_idempotent() {
        let d = dispatcher(3, 8, pagination(5, 15, 1));
        d.handle_turn("u", "старт").await.unwrap();
        d.handle_turn("u", "первый").await.unwrap();
        let heard = posts(d.handle_turn("u", "дальше").await.unwrap());

        let before = session_of(&d, "u").await;
        let once = posts(d.handle_turn("u", "поиграем").await.unwrap());
        let twice = posts(d.handle_turn("u", "поиграем").await.unwrap());
        assert_eq!(once, heard);
        assert_eq!(once, twice);

        let after = session_of(&d, "u").await;
        assert_eq!(after.position, before.position);
        assert_eq!(after.last_distance, before.last_distance);
    }

    #[tokio::test]
    async fn test_rewind_replays_then_continue_resumes() {
        let d = dispatcher(3, 8, pagination(5, 15, 1));
        d.handle_turn("u", "старт").await.unwrap();

        let opened = posts(d.handle_turn("u", "первый").await.unwrap());
        assert_eq!(opened, vec!["Thread 1", "c1", "c2"]);

        let rewound = posts(d.handle_turn("u", "включи").await.unwrap());
        assert_eq!(rewound, opened);

        // The last post of the previous turn is heard again.
        let resumed = posts(d.handle_turn("u", "дальше").await.unwrap());
        assert_eq!(resumed.first().map(String::as_str), Some("c2"));
        assert_eq!(resumed.last().map(String::as_str), Some("c8"));
    }

    #[tokio::test]
    async fn test_forward_and_back_move_between_threads() {
        let d = dispatcher(6, 2, pagination(3, 1000, 1));
        d.handle_turn("u", "старт").await.unwrap();

        // From the listing, forward opens the first thread.
        let lines = posts(d.handle_turn("u", "вперед").await.unwrap());
        assert_eq!(lines[0], "Thread 1");

        posts(d.handle_turn("u", "вперед").await.unwrap());
        let lines = posts(d.handle_turn("u", "вперед").await.unwrap());
        assert_eq!(lines[0], "Thread 3");
        assert_eq!(session_of(&d, "u").await.last_batch_size, 3);

        // One step past the announced page grows the batch.
        let lines = posts(d.handle_turn("u", "вперед").await.unwrap());
        assert_eq!(lines[0], "Thread 4");
        assert_eq!(session_of(&d, "u").await.last_batch_size, 4);

        let lines = posts(d.handle_turn("u", "назад").await.unwrap());
        assert_eq!(lines[0], "Thread 3");
        let session = session_of(&d, "u").await;
        assert_eq!(session.last_distance, 0);
        assert_eq!(session.index(), Some(2));
    }

    #[tokio::test]
    async fn test_default_on_short_list_stays_at_start() {
        let d = dispatcher(3, 2, pagination(5, 1000, 1));
        d.handle_turn("u", "старт").await.unwrap();

        let lines = posts(d.handle_turn("u", "ещё").await.unwrap());
        assert_eq!(
            lines,
            vec![
                "Тред номер 1. Thread 1.",
                "Тред номер 2. Thread 2.",
                "Тред номер 3. Thread 3."
            ]
        );
        assert_eq!(session_of(&d, "u").await.offset, 0);
    }

    #[tokio::test]
    async fn test_forward_stops_at_last_thread() {
        let d = dispatcher(2, 2, pagination(3, 1000, 1));
        d.handle_turn("u", "старт").await.unwrap();

        let mut opened = Vec::new();
        for _ in 0..4 {
            let lines = posts(d.handle_turn("u", "вперед").await.unwrap());
            opened.push(lines[0].clone());
        }
        assert_eq!(opened, vec!["Thread 1", "Thread 2", "Thread 2", "Thread 2"]);

        let session = session_of(&d, "u").await;
        assert_eq!(session.index(), Some(1));
        assert_eq!(session.last_batch_size, 2);
        assert_eq!(session.last_distance, 0);
    }

    #[tokio::test]
    async fn test_back_may_cross_page_start() {
        let d = dispatcher(10, 2, pagination(3, 1000, 1));
        d.handle_turn("u", "старт").await.unwrap();
        d.handle_turn("u", "ещё").await.unwrap();
        assert_eq!(session_of(&d, "u").await.offset, 3);

        d.handle_turn("u", "первый").await.unwrap();
        let lines = posts(d.handle_turn("u", "назад").await.unwrap());
        assert_eq!(lines[0], "Thread 3");
        assert_eq!(session_of(&d, "u").await.index(), Some(-1));

        for _ in 0..5 {
            d.handle_turn("u", "назад").await.unwrap();
        }
        let session = session_of(&d, "u").await;
        assert_eq!(session.index(), Some(-3));
        assert_eq!(session.offset + session.index().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_stop_keeps_state_and_reset_restarts() {
        let d = dispatcher(6, 2, pagination(3, 1000, 1));
        d.handle_turn("u", "старт").await.unwrap();
        d.handle_turn("u", "второй").await.unwrap();

        let reply = d.handle_turn("u", "стоп").await.unwrap();
        assert_eq!(reply, Reply::farewell(FAREWELL_TEXT));
        assert_eq!(session_of(&d, "u").await.index(), Some(1));

        let lines = posts(d.handle_turn("u", "хочу треды").await.unwrap());
        assert_eq!(lines[0], "Тред номер 1. Thread 1.");
        let session = session_of(&d, "u").await;
        assert_eq!(session.position, Position::Listing);
        assert_eq!(session.offset, 0);
        assert_eq!(session.last_distance, 0);
    }

    #[tokio::test]
    async fn test_continue_without_open_thread_falls_through() {
        let d = dispatcher(10, 2, pagination(3, 1000, 1));
        d.handle_turn("u", "старт").await.unwrap();

        // Not viewing: "дальше" is not a command here, so the page advances.
        let lines = posts(d.handle_turn("u", "дальше").await.unwrap());
        assert_eq!(lines[0], "Тред номер 1. Thread 4.");
    }

    #[tokio::test]
    async fn test_listing_truncates_first_line_and_respects_budget() {
        let d = dispatcher(5, 2, pagination(5, 30, 1));
        let lines = posts(d.handle_turn("u", "старт").await.unwrap());

        // Each line is 23 chars: only one fits in 30.
        assert_eq!(lines.len(), 1);
        assert_eq!(session_of(&d, "u").await.last_batch_size, 1);

        let d = dispatcher(5, 2, pagination(5, 10, 1));
        let lines = posts(d.handle_turn("u", "старт").await.unwrap());
        assert_eq!(lines, vec!["Тред номер".to_string()]);
    }

    #[tokio::test]
    async fn test_users_are_independent() {
        let d = dispatcher(6, 2, pagination(3, 1000, 1));
        d.handle_turn("a", "старт").await.unwrap();
        d.handle_turn("b", "старт").await.unwrap();
        d.handle_turn("a", "второй").await.unwrap();

        assert_eq!(session_of(&d, "a").await.index(), Some(1));
        assert_eq!(session_of(&d, "b").await.index(), None);
        assert_eq!(d.active_users(), 2);
    }

    #[tokio::test]
    async fn test_catalog_failure_is_spoken_and_state_untouched() {
        let mut feed = MockCatalogFeed::new();
        feed.expect_fetch().returning(|| {
            Err(SkillError::Fetch {
                resource: "threads",
                status: 500,
            })
        });
        let backends = Backends {
            catalog: Arc::new(ThreadCatalog::new(Arc::new(feed), vec![], 0)),
            comments: Arc::new(MockCommentSource::new()),
            posts: Arc::new(PostCache::new(Duration::from_secs(3600))),
            board_url: "https://board.test/b".to_string(),
        };
        let d = Dispatcher::new(Arc::new(VkAdapter::new()), backends, pagination(3, 1000, 1));

        let request = serde_json::json!({
            "session": {"user": {"user_id": "u"}},
            "request": {"original_utterance": "привет"},
            "version": "1.0"
        });
        let response = d.handle(&request).await.unwrap();
        assert_eq!(response["response"]["text"], FAILURE_TEXT);
        assert!(!d.sessions.slot("u").lock().await.is_started());
    }

    #[tokio::test]
    async fn test_missing_user_id_is_rejected() {
        let d = dispatcher(3, 2, pagination(3, 1000, 1));
        let err = d.handle(&serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, SkillError::MissingUserId));
    }
}
