use chrono::{DateTime, Local};
use colored::*;
use lazy_static::lazy_static;
use std::collections::VecDeque;
use std::fmt::Display;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use crate::{information_entry, warning_entry, error_entry, critical_entry, emergency_entry};
pub use crate::{logging_information, logging_warning, logging_error, logging_critical, logging_emergency, logging_entry, logging_console};

lazy_static! {
    static ref LOGGER: RwLock<Logger> = RwLock::new(Logger::new());
}

#[derive(Copy, Clone)]
pub enum LogLevel {
    Information,
    Warning,
    Error,
    Critical,
    Emergency,
}

impl LogLevel {
    pub fn to_plain_string(&self) -> String {
        match self {
            LogLevel::Information => "Information".to_string(),
            LogLevel::Warning => "Warning    ".to_string(),
            LogLevel::Error => "Error      ".to_string(),
            LogLevel::Critical => "Critical   ".to_string(),
            LogLevel::Emergency => "Emergency  ".to_string(),
        }
    }

    pub fn to_colored_string(&self) -> ColoredString {
        match self {
            LogLevel::Information => "Information".to_string().bright_blue(),
            LogLevel::Warning => "Warning    ".to_string().yellow(),
            LogLevel::Error => "Error      ".to_string().bright_red(),
            LogLevel::Critical => "Critical   ".to_string().bright_yellow(),
            LogLevel::Emergency => "Emergency  ".to_string().magenta(),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}

#[derive(Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub debug_info: String,
}

impl LogEntry {
    pub fn new<T: Into<String>, U: Into<String>>(level: LogLevel, message: T, debug_info: U) -> Self {
        Self {
            level,
            timestamp: Local::now(),
            message: message.into(),
            debug_info: debug_info.into(),
        }
    }

    pub fn to_plain_string(&self) -> String {
        let level = self.level.to_plain_string();
        let timestamp = self.timestamp.format("%Y/%m/%d %H:%M:%S").to_string();
        if self.debug_info.is_empty() {
            format!("[{}] {} {}", level, timestamp, self.message)
        } else {
            format!("[{}] {} {}\n{}", level, timestamp, self.message, self.debug_info)
        }
    }

    pub fn to_colored_string(&self) -> String {
        let level = self.level.to_colored_string();
        let timestamp = self.timestamp.format("%Y/%m/%d %H:%M:%S").to_string();
        if self.debug_info.is_empty() {
            format!("[{}] {} {}", level, timestamp, self.message.white())
        } else {
            format!("[{}] {} {}\n{}", level, timestamp, self.message.white(), self.debug_info.bright_black())
        }
    }
}

impl Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}

pub struct Logger {
    system_log: VecDeque<LogEntry>,
}

impl Logger {
    fn new() -> Self {
        let mut system_log = VecDeque::new();
        system_log.push_back(LogEntry::new(LogLevel::Information, "Logger online", ""));
        Self {
            system_log,
        }
    }

    pub async fn instance() -> RwLockReadGuard<'static, Logger> {
        LOGGER.read().await
    }

    pub async fn instance_mut() -> RwLockWriteGuard<'static, Logger> {
        LOGGER.write().await
    }

    pub async fn add_system_log(log_entry: LogEntry) {
        logging_console(log_entry.clone());
        Self::instance_mut().await.system_log.push_back(log_entry);
    }

    pub async fn get_system_logs() -> VecDeque<LogEntry> {
        Self::instance().await.system_log.clone()
    }
}

pub fn logging_console(log_entry: LogEntry) {
    println!("{}", log_entry.to_colored_string());
}

#[macro_export]
macro_rules! information_entry {
    ($message:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Information, $message, "")
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Information, $message, format!("{}:{} {}", file!(), line!(), $debug_info))
    };
}

#[macro_export]
macro_rules! warning_entry {
    ($message:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Warning, $message, "")
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Warning, $message, format!("{}:{} {}", file!(), line!(), $debug_info))
    };
}

#[macro_export]
macro_rules! error_entry {
    ($message:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Error, $message, "")
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Error, $message, format!("{}:{} {}", file!(), line!(), $debug_info))
    };
}

#[macro_export]
macro_rules! critical_entry {
    ($message:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Critical, $message, "")
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Critical, $message, format!("{}:{} {}", file!(), line!(), $debug_info))
    };
}

#[macro_export]
macro_rules! emergency_entry {
    ($message:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Emergency, $message, "")
    };
    ($message:expr, $debug_info:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Emergency, $message, format!("{}:{} {}", file!(), line!(), $debug_info))
    };
}

#[macro_export]
macro_rules! logging_information {
    ($($args:expr),*) => {
        $crate::utils::logging::Logger::add_system_log($crate::information_entry!($($args),*)).await
    };
}

#[macro_export]
macro_rules! logging_warning {
    ($($args:expr),*) => {
        $crate::utils::logging::Logger::add_system_log($crate::warning_entry!($($args),*)).await
    };
}

#[macro_export]
macro_rules! logging_error {
    ($($args:expr),*) => {
        $crate::utils::logging::Logger::add_system_log($crate::error_entry!($($args),*)).await
    };
}

#[macro_export]
macro_rules! logging_critical {
    ($($args:expr),*) => {
        $crate::utils::logging::Logger::add_system_log($crate::critical_entry!($($args),*)).await
    };
}

#[macro_export]
macro_rules! logging_emergency {
    ($($args:expr),*) => {
        $crate::utils::logging::Logger::add_system_log($crate::emergency_entry!($($args),*)).await
    };
}

#[macro_export]
macro_rules! logging_entry {
    ($log_entry:expr) => {
        $crate::utils::logging::Logger::add_system_log($log_entry).await
    };
}

#[macro_export]
macro_rules! logging_console {
    ($log_entry:expr) => {
        $crate::utils::logging::logging_console($log_entry)
    };
}
