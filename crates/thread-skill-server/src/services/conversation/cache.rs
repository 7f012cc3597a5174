use parking_lot::Mutex as SyncMutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::utils::error::SkillError;

/// Post list of one thread as fetched at `fetched_at`.
#[derive(Debug, Clone)]
struct CacheEntry {
    posts: Arc<Vec<String>>,
    fetched_at: Instant,
}

/// Thread id -> normalized post list.
///
/// Readers never check age: an entry lives until the janitor evicts it, so a
/// read may return posts up to `ttl + sweep_interval` old. A single lock
/// covers lookup, load-and-insert and the sweep, which also means two
/// different threads are never loaded at the same time.
pub struct PostCache {
    entries: Mutex<HashMap<i64, CacheEntry>>,
    ttl: Duration,
}

impl PostCache {
    pub fn new(ttl: Duration) -> Self {
        info!("Initializing post cache (ttl: {:?})", ttl);
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Cached posts of `thread_id`, or the result of `loader` (run at most
    /// once per miss) which is stored before being returned. A failed load
    /// leaves the table untouched.
    pub async fn get_or_load<F, Fut>(&self, thread_id: i64, loader: F) -> Result<Arc<Vec<String>>, SkillError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<String>, SkillError>>,
    {
        let mut entries = self.entries.lock().await;

        if let Some(entry) = entries.get(&thread_id) {
            debug!(
                "Post cache hit for thread {} (age: {:?})",
                thread_id,
                entry.fetched_at.elapsed()
            );
            return Ok(entry.posts.clone());
        }

        debug!("Post cache miss for thread {}, loading", thread_id);
        let posts = Arc::new(loader().await?);

        entries.insert(
            thread_id,
            CacheEntry {
                posts: posts.clone(),
                fetched_at: Instant::now(),
            },
        );

        Ok(posts)
    }

    /// Evict entries older than the ttl. Returns number of entries removed.
    pub async fn evict_expired(&self) -> usize {
        self.evict_expired_at(Instant::now()).await
    }

    pub async fn evict_expired_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock().await;
        let start_len = entries.len();
        let ttl = self.ttl;

        entries.retain(|_, entry| now.saturating_duration_since(entry.fetched_at) <= ttl);

        let count = start_len.saturating_sub(entries.len());
        if count > 0 {
            info!("Evicted {} stale post lists", count);
        }

        count
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Start the periodic sweep. It runs until [`Janitor::stop`] is called.
    pub fn spawn_janitor(self: &Arc<Self>, sweep_interval: Duration) -> Janitor {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let cache = Arc::clone(self);

        info!("Starting post cache janitor (interval: {:?})", sweep_interval);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(sweep_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        cache.evict_expired().await;
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Post cache janitor stopped");
        });

        Janitor {
            stop_tx,
            task: SyncMutex::new(Some(task)),
        }
    }
}

/// Handle of the background sweep task.
pub struct Janitor {
    stop_tx: watch::Sender<bool>,
    task: SyncMutex<Option<JoinHandle<()>>>,
}

impl Janitor {
    /// Signal the sweep to stop and wait for it to finish.
    pub async fn stop(&self) {
        let _ = self.stop_tx.send(true);

        let task = self.task.lock().take();
        if let Some(task) = task {
            let _ = task.await;
        }
    }
}
