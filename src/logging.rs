// logging.rs
// Timestamped log lines for the bingo server and caller.

use std::fmt;

use chrono::Local;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        })
    }
}

/// "<local time> - <LEVEL> - <message>"
pub fn format_message(level: LogLevel, message: &str) -> String {
    format!("{} - {level} - {message}", Local::now().format(TIMESTAMP_FORMAT))
}

pub fn log_message(level: LogLevel, message: &str) {
    println!("{}", format_message(level, message));
}

pub fn log_info(message: &str) {
    log_message(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_message(LogLevel::Warning, message);
}

/// Request-level failures, written with the rest of the request log.
pub fn log_error(message: &str) {
    log_message(LogLevel::Error, message);
}

/// Failures outside a request (bind, accept, connection errors) go to stderr.
pub fn log_error_stderr(message: &str) {
    eprintln!("{}", format_message(LogLevel::Error, message));
}
