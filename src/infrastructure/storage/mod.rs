pub mod db;
pub mod history;

pub use history::{ClipHistoryStore, RecordPatch};
