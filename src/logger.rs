use chrono::{DateTime, Utc};
use colored::*;
use log::{Level, Metadata, Record};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::config::RunnerConfig;

static RUNNER_LOGGER: Lazy<RunnerLogger> = Lazy::new(RunnerLogger::new);

/// Identifies every log line emitted by one invocation.
static RUN_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

pub fn init_with_config(config: LoggerConfig) -> Result<(), String> {
    let filter = config.min_level.to_log_level().to_level_filter();
    RUNNER_LOGGER.update_config(config);

    log::set_logger(&*RUNNER_LOGGER).map_err(|e| format!("Failed to set logger: {:?}", e))?;
    log::set_max_level(filter);
    Ok(())
}

pub fn run_id() -> &'static str {
    RUN_ID.as_str()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn color(&self) -> Color {
        match self {
            LogLevel::Trace => Color::Cyan,
            LogLevel::Debug => Color::Blue,
            LogLevel::Info => Color::Green,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Error => Color::Red,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            LogLevel::Trace => "🔍",
            LogLevel::Debug => "🐛",
            LogLevel::Info => "💡",
            LogLevel::Warn => "⚠️",
            LogLevel::Error => "❌",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Case-insensitive parse of a level name, `None` for anything unknown.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn to_log_level(&self) -> Level {
        match self {
            LogLevel::Trace => Level::Trace,
            LogLevel::Debug => Level::Debug,
            LogLevel::Info => Level::Info,
            LogLevel::Warn => Level::Warn,
            LogLevel::Error => Level::Error,
        }
    }

    pub fn from_log_level(level: Level) -> Self {
        match level {
            Level::Trace => LogLevel::Trace,
            Level::Debug => LogLevel::Debug,
            Level::Info => LogLevel::Info,
            Level::Warn => LogLevel::Warn,
            Level::Error => LogLevel::Error,
        }
    }
}

/// How each diagnostic line is rendered on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub run_id: String,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub module: String,
    pub line: u32,
    pub message: String,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub context: HashMap<String, serde_json::Value>,
}

impl LogEntry {
    pub fn new(level: LogLevel, module: &str, line: u32, message: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            run_id: run_id().to_string(),
            timestamp: Utc::now(),
            level,
            module: module.to_string(),
            line,
            message,
            context: HashMap::new(),
        }
    }

    pub fn with_context(mut self, key: &str, value: serde_json::Value) -> Self {
        self.context.insert(key.to_string(), value);
        self
    }
}

/// All output goes to stderr; stdout carries the result line only.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub format: LogFormat,
    pub show_colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Warn,
            format: LogFormat::Pretty,
            show_colors: io::stderr().is_terminal(),
        }
    }
}

impl LoggerConfig {
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        if format == LogFormat::Json {
            self.show_colors = false;
        }
        self
    }
}

pub struct RunnerLogger {
    config: Mutex<LoggerConfig>,
    start_time: Instant,
}

impl RunnerLogger {
    pub fn new() -> Self {
        Self {
            config: Mutex::new(LoggerConfig::default()),
            start_time: Instant::now(),
        }
    }

    pub fn update_config(&self, new_config: LoggerConfig) {
        if let Ok(mut config) = self.config.lock() {
            *config = new_config;
        }
    }

    fn render(&self, entry: &LogEntry, config: &LoggerConfig) -> String {
        match config.format {
            LogFormat::Json => serde_json::to_string(entry).unwrap_or_default(),
            LogFormat::Pretty => render_pretty(entry, config.show_colors),
        }
    }
}

fn render_pretty(entry: &LogEntry, colors: bool) -> String {
    let timestamp = entry.timestamp.format(TIMESTAMP_FORMAT).to_string();
    let level = format!("[{} {}]", entry.level.emoji(), entry.level.as_str());
    let context = if entry.context.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&entry.context).unwrap_or_default())
    };

    if !colors {
        let mut parts = vec![timestamp, level, format!("{}: {}", entry.module, entry.message)];
        parts.extend(context);
        return parts.join(" ");
    }

    let mut parts = vec![
        timestamp.bright_black().to_string(),
        level.color(entry.level.color()).bold().to_string(),
        format!("{}: {}", entry.module.bright_blue(), entry.message.bold()),
    ];
    parts.extend(context.map(|c| c.bright_cyan().to_string()));
    parts.join(" ")
}

impl Default for RunnerLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl log::Log for RunnerLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match self.config.lock() {
            Ok(config) => metadata.level() <= config.min_level.to_log_level(),
            Err(_) => true,
        }
    }

    fn log(&self, record: &Record) {
        let Ok(config) = self.config.lock() else {
            return;
        };
        if record.level() > config.min_level.to_log_level() {
            return;
        }

        let mut entry = LogEntry::new(
            LogLevel::from_log_level(record.level()),
            record.module_path().unwrap_or("unknown"),
            record.line().unwrap_or(0),
            record.args().to_string(),
        );
        if config.min_level <= LogLevel::Debug {
            entry = entry.with_context(
                "uptime_ms",
                serde_json::json!(self.start_time.elapsed().as_millis() as u64),
            );
        }

        eprintln!("{}", self.render(&entry, &config));
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Measures one operation. Dropping it unstopped reports the operation as abandoned.
pub struct Timer {
    start: Instant,
    name: String,
    finished: Option<Duration>,
}

impl Timer {
    pub fn new(name: &str) -> Self {
        log::debug!("⏱️  Starting timer: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
            finished: None,
        }
    }

    pub fn stop(&mut self) -> Duration {
        if let Some(duration) = self.finished {
            return duration;
        }
        let duration = self.start.elapsed();
        self.finished = Some(duration);
        log::info!("{}", self.summary());
        duration
    }

    pub fn summary(&self) -> String {
        match self.finished {
            Some(duration) => format!(
                "⏱️  '{}' completed in {}ms",
                self.name,
                duration.as_millis()
            ),
            None => format!(
                "⏱️  '{}' abandoned after {}ms",
                self.name,
                self.start.elapsed().as_millis()
            ),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if self.finished.is_none() {
            log::debug!("{}", self.summary());
        }
    }
}

pub fn timer(name: &str) -> Timer {
    Timer::new(name)
}

/// Log what this invocation is about to do.
pub fn log_run_info(config: &RunnerConfig) {
    log::info!(
        "🚀 Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    log::info!("🌐 Endpoint: {}", config.endpoint);
    log::debug!("🪪 Run id: {}", run_id());
}
