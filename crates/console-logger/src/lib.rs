//! Console Logger
//!
//! `log` backend for the browser: every record is written to the matching
//! `console` channel and the most recent lines are kept in memory so they can
//! be shown or attached to a bug report.

mod history;

use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

pub use history::LineHistory;

/// Default number of lines kept in memory.
pub const DEFAULT_CAPACITY: usize = 200;

static LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();

pub struct ConsoleLogger {
    level: LevelFilter,
    history: Mutex<LineHistory>,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter, capacity: usize) -> Self {
        Self {
            level,
            history: Mutex::new(LineHistory::new(capacity)),
        }
    }

    /// Lines currently held in memory, oldest first.
    pub fn recent(&self) -> Vec<String> {
        self.history
            .lock()
            .map(|h| h.lines())
            .unwrap_or_default()
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record.level(), record.target(), &record.args().to_string());
        emit(record.level(), &line);
        if let Ok(mut history) = self.history.lock() {
            history.push(line);
        }
    }

    fn flush(&self) {}
}

/// Install the logger as the global `log` backend. Calling it twice returns
/// the error from `log::set_logger`.
pub fn init(level: LevelFilter, capacity: usize) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ConsoleLogger::new(level, capacity));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Recent lines of the installed logger, empty before [`init`].
pub fn recent() -> Vec<String> {
    LOGGER.get().map(ConsoleLogger::recent).unwrap_or_default()
}

/// `[LEVEL target] message`
pub fn format_record(level: Level, target: &str, message: &str) -> String {
    format!("[{} {}] {}", level, target, message)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let value = JsValue::from_str(line);
    match level {
        Level::Error => console::error_1(&value),
        Level::Warn => console::warn_1(&value),
        Level::Info => console::info_1(&value),
        Level::Debug | Level::Trace => console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, _line: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_record() {
        assert_eq!(
            format_record(Level::Warn, "suomisf_ui::boot", "no entries"),
            "[WARN suomisf_ui::boot] no entries"
        );
    }

    #[test]
    fn test_logger_filters_by_level() {
        let logger = ConsoleLogger::new(LevelFilter::Info, 10);
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("t")
                .args(format_args!("hidden"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Error)
                .target("t")
                .args(format_args!("shown"))
                .build(),
        );
        assert_eq!(logger.recent(), vec!["[ERROR t] shown".to_string()]);
    }
}
