pub mod clipboard_service;

pub use clipboard_service::ClipboardHistoryService;
