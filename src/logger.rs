//! Custom logging module.
//!
//! This module provides a logger implementation that captures log entries in
//! a bounded buffer shared with the application state for display in the UI.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Entries kept before the oldest are dropped.
pub const LOG_CAPACITY: usize = 500;

/// Formatted log lines, oldest first.
pub type LogBuffer = Arc<Mutex<VecDeque<String>>>;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {:<5} {}", timestamp, level_str, record.args())
}

/// Logger that captures records from this crate into a [`LogBuffer`].
///
pub struct CustomLogger {
    level: LevelFilter,
    buffer: LogBuffer,
}

impl CustomLogger {
    pub fn new(level: LevelFilter, buffer: LogBuffer) -> Self {
        CustomLogger { level, buffer }
    }

    /// Install a logger as the global `log` sink and return the buffer it
    /// writes to.
    ///
    pub fn init(level: LevelFilter) -> Result<LogBuffer, AppError> {
        let buffer: LogBuffer = Arc::new(Mutex::new(VecDeque::with_capacity(LOG_CAPACITY)));
        let logger: &'static CustomLogger =
            Box::leak(Box::new(CustomLogger::new(level, Arc::clone(&buffer))));
        log::set_logger(logger).map_err(|e| AppError::Logger(e.to_string()))?;
        log::set_max_level(level);
        Ok(buffer)
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // Dependencies (hyper, reqwest) are too chatty below warn.
        metadata.level() <= self.level
            && (metadata.target().starts_with("sight_lipa") || metadata.level() <= Level::Warn)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut buffer) = self.buffer.lock() {
            if buffer.len() == LOG_CAPACITY {
                buffer.pop_front();
            }
            buffer.push_back(format_log(record));
        }
    }

    fn flush(&self) {}
}
