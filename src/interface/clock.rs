//! Time source port, injectable so tests control record timestamps.

pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Wall-clock time via chrono.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
