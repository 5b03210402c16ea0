//! The knowledge store — the caller-supplied corpus the assistant answers
//! from.
//!
//! Exactly one value is active at a time; updates are whole-document
//! replacements. A candidate replacement can be staged during editing
//! without affecting ongoing conversations until committed. Commits update
//! the in-memory value first and persist best-effort afterwards, so a
//! storage failure can never undo a commit.

use askdesk_core::error::KnowledgeError;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::persistence::{Persistence, KNOWLEDGE_KEY};

/// Above this many characters a commit succeeds but carries an advisory.
pub const SOFT_LIMIT: usize = 50_000;

/// Above this many characters a commit is rejected outright.
pub const HARD_LIMIT: usize = 100_000;

/// The built-in corpus used when nothing has been persisted or committed.
pub const DEFAULT_CORPUS: &str = "\
ORGANIZATION INFORMATION

About:
Example University is a premier institution established in 1990, offering quality education in various disciplines.

Courses Offered:
- B.Tech Computer Science - 4 years - ₹80,000/year
- B.Tech Electronics - 4 years - ₹75,000/year
- MBA - 2 years - ₹1,50,000/year
- BBA - 3 years - ₹60,000/year

Admission Process:
1. Online application (April 1 - May 31)
2. Entrance examination (June 15)
3. Personal interview (June 20-25)
4. Merit list announcement (July 1)

Scholarships:
- Merit Scholarship: Top 10% students get 50% fee waiver
- Sports Quota: 30% fee waiver
- Need-based: Family income <₹2 lakhs - 40% fee waiver

Facilities:
- Central Library with 50,000+ books
- Modern computer labs
- Separate hostels for boys and girls
- Sports complex
- Cafeteria

Contact:
Email: admissions@example.edu
Phone: +91-XXX-XXX-XXXX";

/// Outcome of a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOutcome {
    /// Whether the best-effort persist after the commit actually happened.
    /// `false` is a soft advisory, not a failure: the commit stands and the
    /// session uses the new text either way.
    pub persisted: bool,

    /// Whether the committed text exceeds [`SOFT_LIMIT`] characters.
    pub over_soft_limit: bool,
}

/// Holds the active knowledge text and an optional staged candidate.
pub struct KnowledgeStore {
    active: RwLock<String>,
    staged: RwLock<Option<String>>,
    store: Persistence,
}

impl KnowledgeStore {
    pub fn new(store: Persistence) -> Self {
        Self {
            active: RwLock::new(DEFAULT_CORPUS.to_string()),
            staged: RwLock::new(None),
            store,
        }
    }

    /// Load the persisted knowledge text, falling back to the built-in
    /// default corpus on absence or any storage failure. Never errors.
    ///
    /// Also seeds the staging buffer so an editor opens pre-filled with
    /// the loaded value.
    pub async fn load(&self) {
        let text = self
            .store
            .get(KNOWLEDGE_KEY)
            .await
            .unwrap_or_else(|| DEFAULT_CORPUS.to_string());
        *self.staged.write().await = Some(text.clone());
        *self.active.write().await = text;
    }

    /// An owned snapshot of the active knowledge text.
    pub async fn active(&self) -> String {
        self.active.read().await.clone()
    }

    /// Hold a candidate replacement without affecting the active value.
    pub async fn stage(&self, text: impl Into<String>) {
        *self.staged.write().await = Some(text.into());
    }

    /// The currently staged candidate, if any.
    pub async fn staged(&self) -> Option<String> {
        self.staged.read().await.clone()
    }

    /// Validate and activate a replacement text.
    ///
    /// Rejects empty (after trimming) input and input over [`HARD_LIMIT`]
    /// characters, leaving the active value unchanged. On success the new
    /// text becomes active in memory immediately and is then persisted
    /// best-effort; a persistence failure is reported through
    /// [`CommitOutcome::persisted`], not as an error.
    pub async fn commit(&self, text: &str) -> Result<CommitOutcome, KnowledgeError> {
        if text.trim().is_empty() {
            return Err(KnowledgeError::EmptyInput);
        }
        let len = text.chars().count();
        if len > HARD_LIMIT {
            return Err(KnowledgeError::TooLarge {
                len,
                max: HARD_LIMIT,
            });
        }

        let over_soft_limit = len > SOFT_LIMIT;
        if over_soft_limit {
            warn!(len, soft_limit = SOFT_LIMIT, "Knowledge text exceeds soft limit");
        }

        // In-memory first — the commit stands regardless of what storage does.
        *self.active.write().await = text.to_string();
        *self.staged.write().await = Some(text.to_string());

        let persisted = self.store.set(KNOWLEDGE_KEY, text).await;
        if persisted {
            info!(len, "Knowledge text committed and persisted");
        } else {
            warn!(len, "Knowledge text committed in memory only");
        }

        Ok(CommitOutcome {
            persisted,
            over_soft_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askdesk_storage::{InMemoryStore, UnavailableStore};
    use std::sync::Arc;

    fn with_memory() -> (KnowledgeStore, Persistence) {
        let p = Persistence::new(Arc::new(InMemoryStore::new()));
        (KnowledgeStore::new(p.clone()), p)
    }

    #[tokio::test]
    async fn load_falls_back_to_default_corpus() {
        let (ks, _) = with_memory();
        ks.load().await;
        assert_eq!(ks.active().await, DEFAULT_CORPUS);
        // Staging buffer seeded with the loaded value
        assert_eq!(ks.staged().await.as_deref(), Some(DEFAULT_CORPUS));
    }

    #[tokio::test]
    async fn load_prefers_persisted_value() {
        let (ks, p) = with_memory();
        p.set(KNOWLEDGE_KEY, "FAQ:\nOpening hours are 9-5.").await;
        ks.load().await;
        assert_eq!(ks.active().await, "FAQ:\nOpening hours are 9-5.");
    }

    #[tokio::test]
    async fn load_never_errors_without_store() {
        let ks = KnowledgeStore::new(Persistence::none());
        ks.load().await;
        assert_eq!(ks.active().await, DEFAULT_CORPUS);
    }

    #[tokio::test]
    async fn stage_does_not_touch_active() {
        let (ks, _) = with_memory();
        ks.load().await;
        ks.stage("draft text").await;
        assert_eq!(ks.staged().await.as_deref(), Some("draft text"));
        assert_eq!(ks.active().await, DEFAULT_CORPUS);
    }

    #[tokio::test]
    async fn commit_rejects_empty_input() {
        let (ks, _) = with_memory();
        ks.load().await;
        assert_eq!(ks.commit("").await.unwrap_err(), KnowledgeError::EmptyInput);
        assert_eq!(
            ks.commit("   \n\t").await.unwrap_err(),
            KnowledgeError::EmptyInput
        );
        // Active value unchanged
        assert_eq!(ks.active().await, DEFAULT_CORPUS);
    }

    #[tokio::test]
    async fn commit_enforces_hard_limit_boundary() {
        let (ks, _) = with_memory();
        ks.load().await;

        let too_large = "x".repeat(HARD_LIMIT + 1);
        let err = ks.commit(&too_large).await.unwrap_err();
        assert_eq!(
            err,
            KnowledgeError::TooLarge {
                len: HARD_LIMIT + 1,
                max: HARD_LIMIT
            }
        );
        assert_eq!(ks.active().await, DEFAULT_CORPUS);

        // Exactly at the limit succeeds
        let at_limit = "x".repeat(HARD_LIMIT);
        let outcome = ks.commit(&at_limit).await.unwrap();
        assert!(outcome.persisted);
        assert!(outcome.over_soft_limit);
        assert_eq!(ks.active().await, at_limit);
    }

    #[tokio::test]
    async fn commit_counts_characters_not_bytes() {
        let (ks, _) = with_memory();
        // Multi-byte characters: HARD_LIMIT chars of 'न' is > HARD_LIMIT bytes
        let text = "न".repeat(HARD_LIMIT);
        assert!(ks.commit(&text).await.is_ok());
    }

    #[tokio::test]
    async fn commit_survives_persistence_failure() {
        let ks = KnowledgeStore::new(Persistence::new(Arc::new(UnavailableStore)));
        let outcome = ks.commit("HOURS:\nOpen daily.").await.unwrap();
        assert!(!outcome.persisted);
        assert!(!outcome.over_soft_limit);
        // The commit stands
        assert_eq!(ks.active().await, "HOURS:\nOpen daily.");
    }

    #[tokio::test]
    async fn commit_persists_when_store_works() {
        let (ks, p) = with_memory();
        let outcome = ks.commit("FAQ: yes").await.unwrap();
        assert!(outcome.persisted);
        assert_eq!(p.get(KNOWLEDGE_KEY).await.as_deref(), Some("FAQ: yes"));
    }
}
