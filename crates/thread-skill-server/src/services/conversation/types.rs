use crate::models::Thread;
use crate::utils::error::SkillError;

/// Where the user currently is inside the loaded thread list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Looking at a listing page.
    Listing,
    /// Reading the thread at `offset + index`; `distance` is the cursor
    /// returned by the last window.
    Viewing { index: i64, distance: i64 },
}

/// Navigation state of a user with a loaded thread list.
#[derive(Debug, Clone)]
pub struct Session {
    pub threads: Vec<Thread>,
    /// Threads skipped before the current listing page.
    pub offset: i64,
    pub position: Position,
    /// Cursor used by the previous window, replayed by "repeat".
    pub last_distance: i64,
    /// Lines shown on the last listing page; selections must stay below it.
    pub last_batch_size: usize,
}

impl Session {
    pub fn new(threads: Vec<Thread>) -> Self {
        Self {
            threads,
            offset: 0,
            position: Position::Listing,
            last_distance: 0,
            last_batch_size: 0,
        }
    }

    pub fn n_threads(&self) -> i64 {
        self.threads.len() as i64
    }

    /// Thread at an absolute position of the list.
    pub fn thread_at(&self, target: i64) -> Option<&Thread> {
        usize::try_from(target)
            .ok()
            .and_then(|target| self.threads.get(target))
    }

    pub fn viewing(&self) -> Option<(i64, i64)> {
        match self.position {
            Position::Viewing { index, distance } => Some((index, distance)),
            Position::Listing => None,
        }
    }

    pub fn index(&self) -> Option<i64> {
        self.viewing().map(|(index, _)| index)
    }
}

/// Per-user state, created lazily on the first turn.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    NotStarted,
    Active(Session),
}

impl SessionState {
    pub fn is_started(&self) -> bool {
        matches!(self, SessionState::Active(_))
    }

    pub fn active(&self) -> Result<&Session, SkillError> {
        match self {
            SessionState::Active(session) => Ok(session),
            SessionState::NotStarted => Err(SkillError::UninitializedSession),
        }
    }

    pub fn active_mut(&mut self) -> Result<&mut Session, SkillError> {
        match self {
            SessionState::Active(session) => Ok(session),
            SessionState::NotStarted => Err(SkillError::UninitializedSession),
        }
    }
}

/// What the dispatcher hands back to the platform adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A single phrase.
    Text { text: String, interactive: bool },
    /// Posts or listing lines, rendered by the platform.
    Posts(Vec<String>),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            interactive: true,
        }
    }

    pub fn farewell(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            interactive: false,
        }
    }
}
