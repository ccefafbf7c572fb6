//! Rolling file logging for the campus core.
//!
//! Events are single-line key=value records
//! (`event=... module=... status=...`) and carry ids and counts only,
//! never names or school numbers.
//!
//! # Invariants
//! - One logger per process. Repeating `init_logging` with the same
//!   settings is a no-op; different settings are an error.
//! - Initialization reports failures as `Err` and never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Once;

const LOG_BASENAME: &str = "campus";
const ROTATE_AT_BYTES: u64 = 8 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 7;
const PANIC_MESSAGE_LIMIT: usize = 200;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: Once = Once::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!(
                "log level `{other}` is not one of trace, debug, info, warn, error"
            )),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed `init_logging` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LoggingConfig {
    level: LogLevel,
    dir: PathBuf,
}

impl LoggingConfig {
    fn parse(level: &str, log_dir: &str) -> Result<Self, String> {
        let level = level.parse::<LogLevel>()?;
        let raw_dir = log_dir.trim();
        if raw_dir.is_empty() {
            return Err("log directory is empty".to_string());
        }
        let dir = PathBuf::from(raw_dir);
        if dir.is_relative() {
            return Err(format!("log directory `{raw_dir}` is not an absolute path"));
        }
        Ok(Self { level, dir })
    }

    fn start_backend(&self) -> Result<LoggerHandle, String> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|err| format!("cannot create log directory `{}`: {err}", self.dir.display()))?;

        Logger::try_with_str(self.level.as_str())
            .map_err(|err| format!("logger rejected level `{}`: {err}", self.level))?
            .log_to_file(FileSpec::default().directory(&self.dir).basename(LOG_BASENAME))
            .rotate(
                Criterion::Size(ROTATE_AT_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| format!("logger backend failed to start: {err}"))
    }
}

struct ActiveLogger {
    config: LoggingConfig,
    _handle: LoggerHandle,
}

impl ActiveLogger {
    fn accept(&self, requested: &LoggingConfig) -> Result<(), String> {
        if self.config == *requested {
            return Ok(());
        }
        Err(format!(
            "logging already active (level={} dir={}); cannot switch to level={} dir={}",
            self.config.level,
            self.config.dir.display(),
            requested.level,
            requested.dir.display()
        ))
    }
}

/// Starts the rolling file logger under `log_dir` at `level`.
///
/// `level` is one of `trace|debug|info|warn|error` (case-insensitive).
/// `log_dir` must be absolute; it is created when missing.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let requested = LoggingConfig::parse(level, log_dir)?;

    let active = ACTIVE.get_or_try_init(|| -> Result<ActiveLogger, String> {
        let handle = requested.start_backend()?;
        install_panic_hook();
        info!(
            "event=logging_init module=logging status=ok os={} profile={} core_version={} level={} dir={}",
            std::env::consts::OS,
            if cfg!(debug_assertions) { "debug" } else { "release" },
            env!("CARGO_PKG_VERSION"),
            requested.level,
            requested.dir.display()
        );
        Ok(ActiveLogger {
            config: requested.clone(),
            _handle: handle,
        })
    })?;

    active.accept(&requested)
}

/// Active `(level, log_dir)`, if logging has been started.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE
        .get()
        .map(|active| (active.config.level.as_str(), active.config.dir.clone()))
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        LogLevel::Debug.as_str()
    } else {
        LogLevel::Info.as_str()
    }
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let chained = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic| {
            let location = panic
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            let payload = panic
                .payload()
                .downcast_ref::<&str>()
                .map(|message| (*message).to_string())
                .or_else(|| panic.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "<non-string payload>".to_string());
            error!(
                "event=panic module=logging status=error location={} payload={}",
                location,
                single_line(&payload, PANIC_MESSAGE_LIMIT)
            );
            chained(panic);
        }));
    });
}

/// Flattens `value` onto one line and caps it at `limit` chars.
fn single_line(value: &str, limit: usize) -> String {
    let flat: String = value
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.chars().count() <= limit {
        return flat;
    }
    let mut capped: String = flat.chars().take(limit).collect();
    capped.push_str("...");
    capped
}
