//! LLM provider adapters

pub mod anthropic;

pub use anthropic::{AnthropicGateway, AnthropicSession, AnthropicSettings};
