//! clipkeep — clipboard history core library
//!
//! Watches the OS clipboard through a fixed-interval poller, classifies and
//! deduplicates captures, and persists text/image clip records with user
//! metadata. The UI layer consumes the service facade and a payload-less
//! change notification; it never touches the store directly.

pub mod config;
pub mod core;
pub mod error;
pub mod infrastructure;
pub mod interface;
pub mod payload;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use error::{AppError, Result};
pub use infrastructure::storage::history::{ClipHistoryStore, RecordPatch};
pub use payload::{ClipKind, ClipPayload};
pub use services::ClipboardHistoryService;
