//! Logging for motivatr crates
//!
//! Leveled macros writing to stderr, configured once from the environment.
//!
//! ```rust
//! use motivatr_log::{debug, error, info};
//!
//! info!("validating {} fields", 3);
//! debug!(target: "motivatr::validation", "field {} failed", "email");
//! error!("cannot validate the {} field", "birthday");
//! ```
//!
//! # Environment Variables
//!
//! - `MOTIVATR_DEBUG=1` - Enable debug logging
//! - `MOTIVATR_LOG_LEVEL=trace|debug|info|warn|error|off` - Minimum level
//! - `MOTIVATR_LOG_FORMAT=pretty|compact|json` - Output format (default `json`)
//! - `MOTIVATR_LOG_TIMESTAMPS=1|0` - Include timestamps
//! - `MOTIVATR_LOG_MODULE=1|0` - Include the target module

use once_cell::sync::Lazy;
use std::env;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Log level, most verbose first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl Level {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            _ => Level::Off,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Full timestamp, padded level, bracketed target
    Pretty,
    /// Time of day and level initial
    Compact,
    /// One JSON object per line
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);
static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);
static CONFIG: Lazy<LogConfig> = Lazy::new(|| {
    let config = LogConfig::from_env();
    DEBUG_ENABLED.store(config.debug, Ordering::SeqCst);
    LOG_LEVEL.store(config.level as u8, Ordering::SeqCst);
    config
});

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub debug: bool,
    pub level: Level,
    pub format: Format,
    pub timestamps: bool,
    pub module_path: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Json,
            timestamps: true,
            module_path: true,
        }
    }
}

fn flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl LogConfig {
    /// Read configuration from `MOTIVATR_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let debug = flag("MOTIVATR_DEBUG").unwrap_or(defaults.debug);

        let level = env::var("MOTIVATR_LOG_LEVEL")
            .ok()
            .and_then(|s| Level::parse(&s))
            .unwrap_or(if debug { Level::Debug } else { defaults.level });

        let format = env::var("MOTIVATR_LOG_FORMAT")
            .ok()
            .and_then(|s| Format::parse(&s))
            .unwrap_or(defaults.format);

        Self {
            debug,
            level,
            format,
            timestamps: flag("MOTIVATR_LOG_TIMESTAMPS").unwrap_or(defaults.timestamps),
            module_path: flag("MOTIVATR_LOG_MODULE").unwrap_or(defaults.module_path),
        }
    }
}

/// Load configuration eagerly instead of on the first log line.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// Get the global configuration.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

#[inline]
pub fn is_debug_enabled() -> bool {
    init();
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    init();
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn current_level() -> Level {
    init();
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Override the level read from the environment.
pub fn set_level(level: Level) {
    init();
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Toggle debug mode, lowering the level to `Debug` when enabling.
pub fn set_debug(enabled: bool) {
    init();
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        set_level(Level::Debug);
    }
}

#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    let config = config();
    let line = render(config, level, target, message);
    let _ = writeln!(std::io::stderr().lock(), "{}", line);
}

fn render(config: &LogConfig, level: Level, target: &str, message: &str) -> String {
    let show_target = config.module_path && !target.is_empty();
    match config.format {
        Format::Pretty => {
            let mut line = String::new();
            if config.timestamps {
                line.push_str(&chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f ").to_string());
            }
            line.push_str(&format!("{:5} ", level.as_str()));
            if show_target {
                line.push_str(&format!("[{}] ", target));
            }
            line.push_str(message);
            line
        }
        Format::Compact => {
            let mut line = String::new();
            if config.timestamps {
                line.push_str(&chrono::Local::now().format("%H:%M:%S ").to_string());
            }
            line.push(level.as_str().chars().next().unwrap_or('?'));
            line.push(' ');
            if show_target {
                line.push_str(&format!("{}: ", target));
            }
            line.push_str(message);
            line
        }
        Format::Json => render_json(config, level, target, message),
    }
}

#[cfg(feature = "json")]
fn render_json(config: &LogConfig, level: Level, target: &str, message: &str) -> String {
    #[derive(serde::Serialize)]
    struct Entry<'a> {
        #[serde(skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
        level: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<&'a str>,
        message: &'a str,
    }

    let entry = Entry {
        timestamp: config.timestamps.then(|| chrono::Utc::now().to_rfc3339()),
        level: level.as_str(),
        target: (config.module_path && !target.is_empty()).then_some(target),
        message,
    };
    serde_json::to_string(&entry).unwrap_or_else(|_| message.to_string())
}

#[cfg(not(feature = "json"))]
fn render_json(config: &LogConfig, level: Level, target: &str, message: &str) -> String {
    let mut line = String::from("{");
    if config.timestamps {
        line.push_str(&format!(r#""timestamp":"{}","#, chrono::Utc::now().to_rfc3339()));
    }
    line.push_str(&format!(r#""level":"{}","#, level.as_str()));
    if config.module_path && !target.is_empty() {
        line.push_str(&format!(r#""target":"{}","#, escape_json(target)));
    }
    line.push_str(&format!(r#""message":"{}"}}"#, escape_json(message)));
    line
}

/// Escape a string for use inside a JSON string literal.
#[cfg_attr(feature = "json", allow(dead_code))]
fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result
}

/// Log a trace message.
#[macro_export]
macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Trace) {
            $crate::log($crate::Level::Trace, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::trace!(target: module_path!(), $($arg)+)
    };
}

/// Log a debug message.
///
/// Enabled by `MOTIVATR_DEBUG=1` or a level of `debug` or lower.
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_debug_enabled() || $crate::is_level_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::debug!(target: module_path!(), $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Info) {
            $crate::log($crate::Level::Info, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::info!(target: module_path!(), $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Warn) {
            $crate::log($crate::Level::Warn, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::warn!(target: module_path!(), $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Error) {
            $crate::log($crate::Level::Error, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::error!(target: module_path!(), $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet(format: Format) -> LogConfig {
        LogConfig {
            format,
            timestamps: false,
            ..LogConfig::default()
        }
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Error < Level::Off);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("DEBUG"), Some(Level::Debug));
        assert_eq!(Level::parse("warning"), Some(Level::Warn));
        assert_eq!(Level::parse(" off "), Some(Level::Off));
        assert_eq!(Level::parse("loud"), None);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(Format::parse("compact"), Some(Format::Compact));
        assert_eq!(Format::parse("xml"), None);
    }

    #[test]
    fn test_render_pretty_and_compact() {
        assert_eq!(
            render(&quiet(Format::Pretty), Level::Warn, "motivatr", "slow rule"),
            "WARN  [motivatr] slow rule"
        );
        assert_eq!(
            render(&quiet(Format::Compact), Level::Error, "motivatr", "boom"),
            "E motivatr: boom"
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_render_json() {
        let line = render(&quiet(Format::Json), Level::Info, "motivatr", "say \"hi\"");
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["target"], "motivatr");
        assert_eq!(parsed["message"], "say \"hi\"");
        assert!(parsed.get("timestamp").is_none());
    }

    #[test]
    fn test_escape_json() {
        assert_eq!(escape_json("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_json("a\\b\nc"), "a\\\\b\\nc");
        assert_eq!(escape_json("\u{1}"), "\\u0001");
        assert_eq!(escape_json("привет"), "привет");
    }

    #[cfg(not(feature = "json"))]
    #[test]
    fn test_render_json_fallback() {
        let line = render(&quiet(Format::Json), Level::Info, "motivatr", "say \"hi\"\tпривет");
        assert_eq!(
            line,
            "{\"level\":\"INFO\",\"target\":\"motivatr\",\"message\":\"say \\\"hi\\\"\\tпривет\"}"
        );
    }

    #[test]
    fn test_level_overrides() {
        let original = current_level();
        let original_debug = is_debug_enabled();

        set_level(Level::Error);
        assert!(!is_level_enabled(Level::Warn));
        assert!(is_level_enabled(Level::Error));

        set_debug(true);
        assert_eq!(current_level(), Level::Debug);

        set_debug(original_debug);
        set_level(original);
    }

    #[test]
    fn test_macros_compile() {
        trace!("trace message");
        debug!("debug {}", 1);
        info!(target: "test", "with target");
        warn!("warn message");
        error!(target: "test", "error {}", "message");
    }
}
