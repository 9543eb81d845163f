//! In-memory per-learner conversation sessions.
//!
//! One `ConversationState` per learner with an explicit TTL, instead of an
//! unbounded dictionary that only ever grows. Entries expire on read and
//! stale ones are swept whenever a new session is stored.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use vocab_core::ConversationState;

struct Entry {
    state: ConversationState,
    expires_at: DateTime<Utc>,
}

/// Session store keyed by learner ID.
pub struct SessionStore {
    ttl: Duration,
    inner: Mutex<HashMap<Uuid, Entry>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Default 30-minute session lifetime.
    pub fn with_default_ttl() -> Self {
        Self::new(Duration::minutes(30))
    }

    /// Store (or replace) the learner's conversation state.
    pub fn put(&self, learner_id: Uuid, state: ConversationState) {
        let now = Utc::now();
        let mut sessions = self.inner.lock().expect("session store poisoned");
        sessions.retain(|_, entry| entry.expires_at > now);
        sessions.insert(
            learner_id,
            Entry {
                state,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Remove and return the learner's conversation state, if still live.
    pub fn take(&self, learner_id: Uuid) -> Option<ConversationState> {
        let now = Utc::now();
        let mut sessions = self.inner.lock().expect("session store poisoned");
        let entry = sessions.remove(&learner_id)?;
        if entry.expires_at > now {
            Some(entry.state)
        } else {
            None
        }
    }

    /// Drop the learner's session, if any.
    pub fn clear(&self, learner_id: Uuid) {
        let mut sessions = self.inner.lock().expect("session store poisoned");
        sessions.remove(&learner_id);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().expect("session store poisoned").len()
    }
}
