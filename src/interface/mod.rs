pub mod clock;
pub mod system_clipboard;

pub use clock::{Clock, SystemClock};
pub use system_clipboard::SystemClipboard;
