//! # askdesk Session
//!
//! The conversation session manager — the core of the widget. It maintains
//! the ordered message log, builds the bounded context window sent to the
//! completion endpoint, coordinates persistence with graceful fallback, and
//! enforces size/validity constraints on the knowledge text.
//!
//! In-memory state is authoritative: every mutation lands in memory first
//! and is then persisted best-effort. A missing or failing store degrades
//! the session to in-memory-only operation, never to an error.

pub mod context;
pub mod knowledge;
pub mod log;
pub mod persistence;
pub mod session;

pub use context::{HISTORY_WINDOW, PromptContext};
pub use knowledge::{CommitOutcome, KnowledgeStore, HARD_LIMIT, SOFT_LIMIT};
pub use log::{ExportSnapshot, MessageLog};
pub use persistence::{Persistence, KNOWLEDGE_KEY, MESSAGE_KEY_PREFIX};
pub use session::{ChatSession, SendOutcome, SessionState};
