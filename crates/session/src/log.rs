//! The message log — the ordered conversation history.
//!
//! Owns message identity (time-derived, monotonically increasing ids) and
//! ordering (non-decreasing timestamp, regardless of the order the store
//! listed keys). The in-memory log is authoritative; each append is
//! mirrored to the store best-effort under `chat:<id>`.

use askdesk_core::language::Language;
use askdesk_core::message::{Message, MessageId};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::persistence::{Persistence, MESSAGE_KEY_PREFIX};

/// A serialized copy of the log, ready for the export collaborator.
#[derive(Debug, Clone)]
pub struct ExportSnapshot {
    /// Suggested artifact name, dated by the current day:
    /// `chat-history-<YYYY-MM-DD>.json`.
    pub file_name: String,

    /// The ordered log as pretty-printed JSON.
    pub json: String,
}

/// The ordered, persistence-mirrored message log.
pub struct MessageLog {
    entries: RwLock<Vec<Message>>,
    last_id: AtomicU64,
    store: Persistence,
}

impl MessageLog {
    pub fn new(store: Persistence) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            last_id: AtomicU64::new(0),
            store,
        }
    }

    /// Allocate the next message id: the current time in Unix milliseconds,
    /// bumped past the last issued id so rapid successive creation still
    /// yields strictly increasing, unique ids.
    fn allocate_id(&self) -> MessageId {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let mut prev = self.last_id.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self.last_id.compare_exchange_weak(
                prev,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return MessageId(candidate),
                Err(observed) => prev = observed,
            }
        }
    }

    fn message_key(id: MessageId) -> String {
        format!("{MESSAGE_KEY_PREFIX}{id}")
    }

    /// Load all persisted messages: list the `chat:` keys, fetch and parse
    /// each, drop corrupt entries, and sort ascending by timestamp. An
    /// unavailable or empty store yields a single synthesized greeting in
    /// the given language.
    pub async fn load_all(&self, language: Language) {
        let keys = self.store.list(MESSAGE_KEY_PREFIX).await;

        let mut loaded: Vec<Message> = Vec::with_capacity(keys.len());
        for key in &keys {
            let Some(raw) = self.store.get(key).await else {
                debug!(key, "Persisted message absent, skipping");
                continue;
            };
            match serde_json::from_str::<Message>(&raw) {
                Ok(msg) => loaded.push(msg),
                Err(e) => warn!(key, error = %e, "Skipping corrupt stored message"),
            }
        }

        loaded.sort_by_key(|m| (m.timestamp, m.id));

        if let Some(max_id) = loaded.iter().map(|m| m.id.0).max() {
            self.last_id.fetch_max(max_id, Ordering::Relaxed);
        }

        if loaded.is_empty() {
            loaded.push(self.greeting(language));
            debug!("No persisted messages, starting with greeting");
        } else {
            debug!(count = loaded.len(), "Loaded persisted messages");
        }

        *self.entries.write().await = loaded;
    }

    fn greeting(&self, language: Language) -> Message {
        Message::bot(self.allocate_id(), language.greeting(), language)
    }

    /// Append a user message and mirror it to the store best-effort.
    pub async fn append_user(&self, text: impl Into<String>, language: Language) -> Message {
        let msg = Message::user(self.allocate_id(), text, language);
        self.append(msg).await
    }

    /// Append a bot message and mirror it to the store best-effort.
    pub async fn append_bot(&self, text: impl Into<String>, language: Language) -> Message {
        let msg = Message::bot(self.allocate_id(), text, language);
        self.append(msg).await
    }

    async fn append(&self, msg: Message) -> Message {
        self.entries.write().await.push(msg.clone());

        // Best-effort mirror; the in-memory log keeps the message either way.
        match serde_json::to_string(&msg) {
            Ok(raw) => {
                self.store.set(&Self::message_key(msg.id), &raw).await;
            }
            Err(e) => warn!(id = %msg.id, error = %e, "Failed to serialize message"),
        }

        msg
    }

    /// Delete every persisted message under the session prefix (continuing
    /// past individual failures) and reset the log to a single fresh
    /// greeting in the given language.
    pub async fn clear(&self, language: Language) {
        let keys = self.store.list(MESSAGE_KEY_PREFIX).await;
        for key in &keys {
            self.store.delete(key).await;
        }
        debug!(deleted = keys.len(), "Cleared persisted messages");

        *self.entries.write().await = vec![self.greeting(language)];
    }

    /// The transcript lines of the last `n` messages, chronological.
    pub async fn recent_window(&self, n: usize) -> Vec<String> {
        let entries = self.entries.read().await;
        let start = entries.len().saturating_sub(n);
        entries[start..].iter().map(|m| m.transcript_line()).collect()
    }

    /// An ordered copy of the in-memory log.
    pub async fn messages(&self) -> Vec<Message> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Serialize the current log for the export collaborator. Does not
    /// mutate state.
    pub async fn export_snapshot(&self) -> ExportSnapshot {
        let entries = self.entries.read().await;
        let json = serde_json::to_string_pretty(&*entries)
            .unwrap_or_else(|_| "[]".to_string());
        ExportSnapshot {
            file_name: format!("chat-history-{}.json", Utc::now().format("%Y-%m-%d")),
            json,
        }
    }
}
