pub mod chat;
pub mod export;
pub mod onboard;
pub mod status;
