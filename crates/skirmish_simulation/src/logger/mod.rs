//! Глобальный logger (injectable sink)
//!
//! Core никогда не печатает в консоль напрямую: всё идёт через `LogPrinter`.
//! Headless режим ставит `ConsoleLogger`, движок ставит свой printer,
//! тесты ставят capturing printer и проверяют warnings.

use once_cell::sync::Lazy;
use std::sync::Mutex;

// Потокобезопасный глобальный logger (Option — до init_logger ничего не пишем)
static LOGGER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

pub static LOGGER_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

pub fn set_logger(logger: Box<dyn LogPrinter>) {
    // Poisoned mutex не должен ронять frame loop
    let mut slot = LOGGER.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *slot = Some(logger);
}

pub fn set_log_level(level: LogLevel) {
    let mut slot = LOGGER_LEVEL
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *slot = level;
}

pub fn set_logger_if_needed(logger: Box<dyn LogPrinter>) {
    let mut slot = LOGGER.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if slot.is_none() {
        *slot = Some(logger);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    let min_level = *LOGGER_LEVEL
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if level < min_level {
        return;
    }

    // Timestamp добавляем здесь, printer получает готовую строку
    let slot = LOGGER.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(logger) = slot.as_ref() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        logger.log(level, &format!("[{}] {}", timestamp, message));
    }
}

pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}

/// Capturing printer для тестов: складывает строки в общий буфер.
#[cfg(test)]
pub(crate) mod capture {
    use super::{set_logger, LogLevel, LogPrinter};
    use once_cell::sync::Lazy;
    use std::sync::{Arc, Mutex, Once};

    static LINES: Lazy<Arc<Mutex<Vec<(LogLevel, String)>>>> =
        Lazy::new(|| Arc::new(Mutex::new(Vec::new())));
    static INSTALL: Once = Once::new();

    struct CaptureLogger(Arc<Mutex<Vec<(LogLevel, String)>>>);

    impl LogPrinter for CaptureLogger {
        fn log(&self, level: LogLevel, message: &str) {
            if let Ok(mut lines) = self.0.lock() {
                lines.push((level, message.to_string()));
            }
        }
    }

    /// Ставит capture sink (один раз на процесс). Тесты идут параллельно,
    /// поэтому ищем строки по уникальному маркеру (entity id), а не по индексу.
    pub fn install() {
        INSTALL.call_once(|| set_logger(Box::new(CaptureLogger(LINES.clone()))));
    }

    pub fn warnings_containing(needle: &str) -> usize {
        LINES
            .lock()
            .map(|lines| {
                lines
                    .iter()
                    .filter(|(level, line)| *level == LogLevel::Warning && line.contains(needle))
                    .count()
            })
            .unwrap_or(0)
    }
}
