//! Key-value storage backends for askdesk.

pub mod file_store;
pub mod in_memory;
pub mod unavailable;

pub use file_store::FileStore;
pub use in_memory::InMemoryStore;
pub use unavailable::UnavailableStore;
