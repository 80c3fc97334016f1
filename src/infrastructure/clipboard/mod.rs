pub mod poller;
mod rs_clipboard;

pub use poller::ClipboardPoller;
pub use rs_clipboard::RsClipboard;
