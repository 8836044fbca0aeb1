pub mod chat;
pub mod chips;
pub mod client;
pub mod config;
pub mod error;
pub mod language;
pub mod state;
pub mod trigger;

// Re-export main types for convenience
pub use chat::{answer_text, AnswerKind, ChatRequest, ChatResponse, Payload, FALLBACK_ANSWER};
pub use chips::{default_chips, Chip};
pub use client::{ChatClient, ChatService};
pub use config::Config;
pub use error::ChatError;
pub use language::Language;
pub use state::TriggerState;
pub use trigger::{ChatSurface, ChatTrigger, Completion, PendingChat, PENDING_INDICATOR};
