//! # askdesk Core
//!
//! Domain types, traits, and error definitions for the askdesk embeddable
//! chat widget. This crate has **zero framework dependencies** — it defines
//! the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod completion;
pub mod error;
pub mod language;
pub mod message;
pub mod storage;

// Re-export key types at crate root for ergonomics
pub use completion::{CompletionClient, CompletionReply, CompletionRequest};
pub use error::{Error, Result};
pub use language::Language;
pub use message::{Message, MessageId, Sender};
pub use storage::KeyValueStore;
