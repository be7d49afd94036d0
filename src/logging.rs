//! File logging for searchfield
//!
//! One global logger, set up once by the binaries. Before `init` every call
//! is a no-op, so library code and tests can log freely.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Global logger instance
static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Main logger struct
pub struct Logger {
    file: Option<File>,
    min_level: LogLevel,
}

impl Logger {
    fn new(path: &Path, min_level: LogLevel) -> Self {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true) // Start fresh each run
            .open(path)
            .ok();

        Self { file, min_level }
    }

    fn log(&mut self, level: LogLevel, module: &str, message: &str) {
        if level < self.min_level {
            return;
        }

        let entry = format_entry(
            &chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            level,
            module,
            message,
        );

        if let Some(ref mut file) = self.file {
            let _ = file.write_all(entry.as_bytes());
        }
    }
}

fn format_entry(timestamp: &str, level: LogLevel, module: &str, message: &str) -> String {
    format!("[{}] [{:5}] [{}] {}\n", timestamp, level.to_string(), module, message)
}

/// Default log file path (same directory as executable)
pub fn default_log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("searchfield.log")
}

/// Initialize the global logger. Later calls are ignored.
pub fn init(path: Option<&Path>, min_level: LogLevel) {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_log_path);
    let _ = LOGGER.set(Mutex::new(Logger::new(&path, min_level)));
}

fn log(level: LogLevel, module: &str, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.lock().log(level, module, message);
    }
}

/// Log debug message
pub fn debug(module: &str, message: &str) {
    log(LogLevel::Debug, module, message);
}

/// Log info message
pub fn info(module: &str, message: &str) {
    log(LogLevel::Info, module, message);
}

/// Log warning message
pub fn warn(module: &str, message: &str) {
    log(LogLevel::Warn, module, message);
}

/// Log error message
pub fn error(module: &str, message: &str) {
    log(LogLevel::Error, module, message);
}

/// Flush the log file
pub fn flush() {
    if let Some(logger) = LOGGER.get() {
        if let Some(ref mut file) = logger.lock().file {
            let _ = file.flush();
        }
    }
}

/// Write a separator line for readability
pub fn separator(label: &str) {
    let msg = format!("========== {} ==========", label);
    info("---", &msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_layout() {
        let entry = format_entry("2026-01-01 00:00:00.000", LogLevel::Warn, "PAGE", "gone");
        assert_eq!(entry, "[2026-01-01 00:00:00.000] [WARN ] [PAGE] gone\n");
    }

    #[test]
    fn levels_are_ordered() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn logger_filters_below_min_level() {
        let path = std::env::temp_dir().join(format!("searchfield-log-{}.log", std::process::id()));
        let mut logger = Logger::new(&path, LogLevel::Warn);
        logger.log(LogLevel::Info, "TEST", "dropped");
        logger.log(LogLevel::Error, "TEST", "kept");
        drop(logger);

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(!text.contains("dropped"));
        assert!(text.contains("[ERROR] [TEST] kept"));
    }
}
