//! Conversation audit log
//!
//! [`JsonlConversationLogger`] implements the
//! [`ConversationLogger`](triage_application::ConversationLogger) port by
//! appending one JSON object per event to a file.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
