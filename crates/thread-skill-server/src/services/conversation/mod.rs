//! Conversation module
//!
//! Per-user navigation over the thread list:
//! - Per-user sessions behind their own locks (DashMap)
//! - Intent classification by keyword containment
//! - Character-budgeted windows over the posts of a thread
//! - TTL cache of fetched post lists shared by all users

mod cache;
pub mod dispatcher;
mod intent;
mod sessions;
pub mod types;
mod window;

pub use cache::{Janitor, PostCache};
pub use dispatcher::{Backends, Dispatcher, Pagination};
pub use intent::{prepare, Command, Intent, IntentVocabulary};
pub use sessions::SessionTable;
pub use types::{Position, Reply, Session, SessionState};
pub use window::{slice, Chunk, WindowBudget};
