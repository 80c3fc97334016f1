pub mod clipboard;
pub mod event;
pub mod storage;
