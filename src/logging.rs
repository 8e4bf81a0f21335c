// src/logging.rs
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

pub const LOG_LEVEL_ENV: &str = "DIRVIEW_LOG";

enum LogTarget {
    Stderr,
    File(Mutex<File>),
}

pub struct Logger {
    level: LevelFilter,
    target: LogTarget,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = format_record(record);

        match &self.target {
            LogTarget::Stderr => eprintln!("{msg}"),
            LogTarget::File(file) => {
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(file, "{msg}");
                }
            }
        }
    }

    fn flush(&self) {
        if let LogTarget::File(file) = &self.target {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

fn format_record(record: &Record<'_>) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    format!("{} {} [{}] {}", timestamp, record.level(), record.target(), record.args())
}

fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn)
}

fn level_from_env() -> LevelFilter {
    parse_level(std::env::var(LOG_LEVEL_ENV).ok().as_deref())
}

pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("dirview")
        .join("dirview.log")
}

pub fn init_stderr() -> Result<(), SetLoggerError> {
    install(Logger { level: level_from_env(), target: LogTarget::Stderr })
}

/// Logs to `path` so the terminal UI keeps the screen; falls back to stderr
/// if the file cannot be opened.
pub fn init_file(path: &Path) -> Result<(), SetLoggerError> {
    let level = level_from_env();
    let file = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|_| OpenOptions::new().create(true).append(true).open(path));

    match file {
        Ok(file) => install(Logger { level, target: LogTarget::File(Mutex::new(file)) }),
        Err(_) => install(Logger { level, target: LogTarget::Stderr }),
    }
}

fn install(logger: Logger) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<Logger> = OnceLock::new();

    // Only the first call installs; later calls keep the original level.
    let init_call = LOGGER.get().is_none();
    let logger = LOGGER.get_or_init(|| logger);

    if init_call {
        log::set_logger(logger)?;
        log::set_max_level(logger.level);
    }

    Ok(())
}
