//! The session orchestrator — sequences the log, knowledge store, context
//! builder, and completion client on each user action.
//!
//! One session lives for one widget mount: create it, `mount()` it, drive
//! it, drop it. There are no ambient singletons.
//!
//! Concurrency model: the in-flight flag is the sole guard and enforces at
//! most one outstanding send per session. A second send while one is
//! outstanding is rejected at the guard, not queued. Knowledge edits and
//! history clears are not excluded against an in-flight send — the send
//! already holds an owned snapshot of everything it needs.

use askdesk_core::completion::{CompletionClient, CompletionRequest};
use askdesk_core::error::KnowledgeError;
use askdesk_core::language::Language;
use askdesk_core::message::Message;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::context::{PromptContext, HISTORY_WINDOW};
use crate::knowledge::{CommitOutcome, KnowledgeStore};
use crate::log::{ExportSnapshot, MessageLog};
use crate::persistence::Persistence;

const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_MAX_TOKENS: u32 = 1000;

/// The two orchestrator states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
}

/// What happened to a `send` call.
#[derive(Debug, Clone)]
pub enum SendOutcome {
    /// A round trip completed; carries the appended bot message (which is
    /// the fixed apology if the completion endpoint failed).
    Replied(Message),

    /// The guard rejected the send: empty input, or another send was
    /// already in flight. Nothing was appended.
    Ignored,
}

/// One conversation session.
pub struct ChatSession {
    client: Arc<dyn CompletionClient>,
    log: MessageLog,
    knowledge: KnowledgeStore,
    language: RwLock<Language>,
    model: String,
    max_tokens: u32,
    in_flight: AtomicBool,
}

impl ChatSession {
    /// Create a new session over the given completion client and store.
    pub fn new(client: Arc<dyn CompletionClient>, store: Persistence) -> Self {
        Self {
            client,
            log: MessageLog::new(store.clone()),
            knowledge: KnowledgeStore::new(store),
            language: RwLock::new(Language::default()),
            model: DEFAULT_MODEL.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the per-reply token budget.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    /// Set the initial response language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = RwLock::new(language);
        self
    }

    /// Load persisted state: the knowledge text and the message log.
    /// Call once after creation; never fails.
    pub async fn mount(&self) {
        self.knowledge.load().await;
        let language = *self.language.read().await;
        self.log.load_all(language).await;
    }

    /// The current orchestrator state.
    pub fn state(&self) -> SessionState {
        if self.in_flight.load(Ordering::Acquire) {
            SessionState::Sending
        } else {
            SessionState::Idle
        }
    }

    /// The active response language.
    pub async fn language(&self) -> Language {
        *self.language.read().await
    }

    /// Switch the response language. Stored messages are not retranslated;
    /// only newly synthesized greetings and apologies are affected.
    pub async fn set_language(&self, language: Language) {
        *self.language.write().await = language;
    }

    /// Submit a user question: append it, build the prompt from a snapshot
    /// of the knowledge text and the trailing window taken *before* the
    /// append, call the completion endpoint, and append the reply (or the
    /// fixed apology on any failure).
    pub async fn send(&self, input: &str) -> SendOutcome {
        let question = input.trim();
        if question.is_empty() {
            debug!("Ignoring empty input");
            return SendOutcome::Ignored;
        }

        // At most one outstanding send per session.
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Ignoring send: another send is in flight");
            return SendOutcome::Ignored;
        }

        let language = *self.language.read().await;

        // Snapshot before appending the question, so the window never
        // contains it and a concurrent edit cannot touch this request.
        let knowledge = self.knowledge.active().await;
        let window = self.log.recent_window(HISTORY_WINDOW).await;

        self.log.append_user(question, language).await;

        let context = PromptContext::build(knowledge, window, question, language);
        let request = CompletionRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            prompt: context.render(),
        };

        let text = match self.client.complete(request).await {
            Ok(reply) => reply.text,
            Err(e) => {
                warn!(error = %e, "Completion failed, replying with apology");
                language.apology().to_string()
            }
        };

        let bot = self.log.append_bot(text, language).await;
        self.in_flight.store(false, Ordering::Release);
        SendOutcome::Replied(bot)
    }

    /// Commit a replacement knowledge text. Permitted in either state.
    pub async fn train(&self, text: &str) -> Result<CommitOutcome, KnowledgeError> {
        self.knowledge.commit(text).await
    }

    /// Stage a candidate knowledge text without activating it.
    pub async fn stage(&self, text: impl Into<String>) {
        self.knowledge.stage(text).await;
    }

    /// The currently staged candidate, if any.
    pub async fn staged(&self) -> Option<String> {
        self.knowledge.staged().await
    }

    /// The active knowledge text.
    pub async fn knowledge(&self) -> String {
        self.knowledge.active().await
    }

    /// Clear the history. Permitted in either state; an in-flight send
    /// still appends its reply afterwards (it holds its own snapshot).
    pub async fn clear(&self) {
        let language = *self.language.read().await;
        self.log.clear(language).await;
    }

    /// Serialize the log for the export collaborator.
    pub async fn export(&self) -> ExportSnapshot {
        self.log.export_snapshot().await
    }

    /// An ordered copy of the conversation.
    pub async fn messages(&self) -> Vec<Message> {
        self.log.messages().await
    }

    pub async fn message_count(&self) -> usize {
        self.log.len().await
    }
}
