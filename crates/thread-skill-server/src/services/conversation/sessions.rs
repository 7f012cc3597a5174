use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::types::SessionState;

/// User id -> session, one lock per user so turns of the same user run one
/// at a time while different users proceed in parallel.
#[derive(Default)]
pub struct SessionTable {
    slots: DashMap<String, Arc<Mutex<SessionState>>>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock slot of `user_id`, created on first use.
    pub fn slot(&self, user_id: &str) -> Arc<Mutex<SessionState>> {
        if let Some(slot) = self.slots.get(user_id) {
            return slot.value().clone();
        }

        self.slots
            .entry(user_id.to_string())
            .or_default()
            .value()
            .clone()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
