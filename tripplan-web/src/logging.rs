//! `log` sink writing to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::dom;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.target(), record.args());
        match record.level() {
            Level::Error => dom::console_error(&line),
            Level::Warn => dom::console_warn(&line),
            Level::Info => dom::console_info(&line),
            Level::Debug | Level::Trace => dom::console_debug(&line),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger at `level`.
///
/// # Errors
/// Returns an error if another logger has already been installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
