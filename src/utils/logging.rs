//! Logger setup for host binaries and tests.

use std::io::Write;

use log::LevelFilter;

use crate::utils::env::is_development;

/// Initialize env_logger with the project format: timestamp, colored level,
/// file:line, target, message. Safe to call more than once.
pub fn init() {
    let default_level = if is_development() {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level.as_str()),
    )
    .format(|buf, record| {
        let level_color = match record.level() {
            log::Level::Error => "\x1b[31;1m",
            log::Level::Warn => "\x1b[33m",
            log::Level::Info => "\x1b[32m",
            log::Level::Debug => "\x1b[34m",
            log::Level::Trace => "\x1b[36m",
        };
        let reset = "\x1b[0m";

        let file = record.file().unwrap_or("unknown");
        let line = record.line().unwrap_or(0);

        writeln!(
            buf,
            "{} {}{}{} [{}:{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            level_color,
            record.level(),
            reset,
            file,
            line,
            record.target(),
            record.args()
        )
    })
    .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
