//! Infrastructure layer for triage-quorum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration and dataset file I/O.

pub mod config;
pub mod dataset;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use dataset::{DatasetError, load_dataset, load_report, parse_dataset, save_report};
pub use logging::JsonlConversationLogger;
pub use providers::{AnthropicGateway, AnthropicSettings};
