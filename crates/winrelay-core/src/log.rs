//! File logger with size-based rotation.
//!
//! Lines go to `~/.config/winrelay/logs/winrelay.log`, tagged with the
//! module that emitted them. When the file reaches the configured size
//! it is renamed to `winrelay.log.1` (one backup kept) and a fresh file
//! is started. Until [`init`] succeeds every macro is a no-op.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

const LOG_FILE_NAME: &str = "winrelay.log";

/// Logging configuration, the `[logging]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Minimum log level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Maximum log file size in megabytes before rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Parses a level name; unknown names fall back to `Info`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

struct Logger {
    file: File,
    path: PathBuf,
    min_level: Level,
    max_bytes: u64,
    written: u64,
}

impl Logger {
    fn open(path: PathBuf, config: &LogConfig) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(Self {
            file,
            path,
            min_level: Level::parse(&config.level),
            max_bytes: config.max_file_mb.saturating_mul(1024 * 1024),
            written,
        })
    }

    fn write(&mut self, level: Level, target: &str, args: fmt::Arguments<'_>) -> io::Result<()> {
        if level < self.min_level {
            return Ok(());
        }
        let line = format!("{} [{}] {target}: {args}\n", timestamp(), level.as_str());
        self.file.write_all(line.as_bytes())?;
        self.written += line.len() as u64;

        if self.max_bytes > 0 && self.written >= self.max_bytes {
            self.rotate()?;
        }
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        let backup = backup_path(&self.path);
        let _ = fs::remove_file(&backup);
        fs::rename(&self.path, &backup)?;
        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

/// `winrelay.log` -> `winrelay.log.1`
fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".1");
    PathBuf::from(name)
}

/// Returns the log file path: `~/.config/winrelay/logs/winrelay.log`.
pub fn log_path() -> Option<PathBuf> {
    crate::config::config_dir().map(|d| d.join("logs").join(LOG_FILE_NAME))
}

/// Initialises the global logger. Call once at host startup.
///
/// Returns `true` if file logging is active afterwards. Does nothing
/// when `config.enabled` is `false`.
pub fn init(config: &LogConfig) -> bool {
    if !config.enabled {
        return false;
    }
    let Some(path) = log_path() else {
        return false;
    };
    match Logger::open(path, config) {
        Ok(logger) => LOGGER.set(Mutex::new(logger)).is_ok(),
        Err(e) => {
            eprintln!("Warning: could not open log file: {e}");
            false
        }
    }
}

/// Writes a log line if the level is at or above the configured minimum.
///
/// Write failures are swallowed; logging never interrupts the caller.
pub fn write(level: Level, target: &str, args: fmt::Arguments<'_>) {
    let Some(mutex) = LOGGER.get() else {
        return;
    };
    let Ok(mut logger) = mutex.lock() else {
        return;
    };
    let _ = logger.write(level, target, args);
}

/// UTC wall-clock time of day as `HH:MM:SS`.
fn timestamp() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let day = secs % 86_400;
    format!("{:02}:{:02}:{:02}", day / 3600, day / 60 % 60, day % 60)
}

/// Logs at DEBUG level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::log::write($crate::log::Level::Debug, module_path!(), format_args!($($arg)*))
    };
}

/// Logs at INFO level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::log::write($crate::log::Level::Info, module_path!(), format_args!($($arg)*))
    };
}

/// Logs at WARN level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::log::write($crate::log::Level::Warn, module_path!(), format_args!($($arg)*))
    };
}

/// Logs at ERROR level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::log::write($crate::log::Level::Error, module_path!(), format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "winrelay-log-{}-{name}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir.join(LOG_FILE_NAME)
    }

    #[test]
    fn level_parse_falls_back_to_info() {
        assert_eq!(Level::parse("DEBUG"), Level::Debug);
        assert_eq!(Level::parse(" warn "), Level::Warn);
        assert_eq!(Level::parse("verbose"), Level::Info);
    }

    #[test]
    fn lines_below_min_level_are_skipped() {
        // Arrange
        let path = scratch_path("filter");
        let config = LogConfig {
            enabled: true,
            level: "warn".into(),
            max_file_mb: 0,
        };
        let mut logger = Logger::open(path.clone(), &config).unwrap();

        // Act
        logger.write(Level::Info, "t", format_args!("hidden")).unwrap();
        logger.write(Level::Error, "t", format_args!("shown")).unwrap();

        // Assert
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("hidden"));
        assert!(content.contains("[ERROR] t: shown"));
    }

    #[test]
    fn rotation_moves_full_file_to_backup() {
        // Arrange
        let path = scratch_path("rotate");
        let config = LogConfig {
            enabled: true,
            level: "debug".into(),
            max_file_mb: 1,
        };
        let mut logger = Logger::open(path.clone(), &config).unwrap();
        logger.max_bytes = 64;

        // Act
        for i in 0..4 {
            logger.write(Level::Info, "t", format_args!("line {i}")).unwrap();
        }

        // Assert
        let backup = backup_path(&path);
        assert!(backup.exists());
        assert!(logger.written < 64);
    }

    #[test]
    fn backup_path_appends_suffix() {
        let path = PathBuf::from("logs").join("winrelay.log");

        assert_eq!(backup_path(&path), PathBuf::from("logs").join("winrelay.log.1"));
    }
}
