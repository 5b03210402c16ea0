//! The context builder — derives the bounded prompt payload for one
//! completion call.
//!
//! The payload carries the full active knowledge text verbatim, the
//! trailing window of at most [`HISTORY_WINDOW`] prior transcript lines,
//! the literal question, and the target language's display name. The
//! window is taken *before* the current question is appended to the log,
//! so the question never appears twice.
//!
//! The knowledge text is not truncated or summarized: if it plus the
//! transcript exceeds the model's input budget, the request simply fails
//! downstream. That is a known scaling limit, not a designed boundary.

use askdesk_core::language::Language;

/// How many prior transcript lines a prompt may carry.
pub const HISTORY_WINDOW: usize = 5;

/// A frozen snapshot of everything one completion call needs.
///
/// All fields are owned: a concurrent knowledge edit or history clear
/// cannot change a context that has already been built.
#[derive(Debug, Clone)]
pub struct PromptContext {
    knowledge: String,
    transcript: Vec<String>,
    question: String,
    language: Language,
}

impl PromptContext {
    /// Snapshot the inputs for one call. `transcript` must already be the
    /// trailing window (chronological, at most [`HISTORY_WINDOW`] lines);
    /// anything longer is cut down to the last [`HISTORY_WINDOW`] entries.
    pub fn build(
        knowledge: impl Into<String>,
        transcript: Vec<String>,
        question: impl Into<String>,
        language: Language,
    ) -> Self {
        let mut transcript = transcript;
        if transcript.len() > HISTORY_WINDOW {
            transcript.drain(..transcript.len() - HISTORY_WINDOW);
        }
        Self {
            knowledge: knowledge.into(),
            transcript,
            question: question.into(),
            language,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// Render the full prompt sent as the single user message.
    pub fn render(&self) -> String {
        let language = self.language.display_name();
        format!(
            "You are a helpful assistant chatbot. Answer user questions ONLY using the knowledge text provided below.\n\
             \n\
             KNOWLEDGE TEXT:\n\
             {knowledge}\n\
             \n\
             Previous conversation:\n\
             {transcript}\n\
             \n\
             Current language: {language}\n\
             \n\
             User's question: {question}\n\
             \n\
             Instructions:\n\
             - Answer ONLY based on the knowledge text provided above\n\
             - If information is not available, politely say \"I don't have that specific information. Please contact the support team.\"\n\
             - Be friendly, helpful, and concise\n\
             - Respond in {language}",
            knowledge = self.knowledge,
            transcript = self.transcript.join("\n"),
            question = self.question,
        )
    }
}
