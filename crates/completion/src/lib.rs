//! Completion endpoint clients for askdesk.

pub mod anthropic;

pub use anthropic::AnthropicClient;
