use std::{fmt::Display, fs::File, path::PathBuf, str::FromStr, sync::Mutex};

use anyhow::Context;
use chrono::Local;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::config::LoggerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Short colored tag, used when echoing the active configuration.
    pub fn tag(&self) -> ColoredString {
        match self {
            LogLevel::Debug => "DBG".bright_cyan(),
            LogLevel::Info => "INF".bright_green(),
            LogLevel::Warn => "WAR".yellow(),
            LogLevel::Error => "ERR".bright_red(),
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "info" | "inf" => Ok(LogLevel::Info),
            "warn" | "warning" | "war" => Ok(LogLevel::Warn),
            "error" | "err" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "Debug"),
            LogLevel::Info => write!(f, "Info"),
            LogLevel::Warn => write!(f, "Warn"),
            LogLevel::Error => write!(f, "Error"),
        }
    }
}

/// Where log files of a run go, one file per run.
pub fn log_file_path() -> PathBuf {
    PathBuf::from(format!(
        "./logs/fa_run_{}.txt",
        Local::now().format("%Y-%m-%d_%H-%M-%S")
    ))
}

/// Installs the global tracing subscriber described by `config`.
///
/// Logs go to stderr, or into a fresh file under `./logs` if `log_file` is
/// set. Returns the log file path, if any. Does nothing when logging is
/// disabled.
pub fn init_tracing(config: &LoggerConfig) -> anyhow::Result<Option<PathBuf>> {
    if !*config.get_enabled() {
        return Ok(None);
    }

    let builder = tracing_subscriber::fmt()
        .with_max_level(config.get_log_level().level_filter())
        .with_target(false);

    let (result, path) = if *config.get_log_file() {
        let path = log_file_path();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
        }

        let file = File::create(&path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;

        let result = builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();

        (result, Some(path))
    } else {
        (builder.with_writer(std::io::stderr).try_init(), None)
    };

    result.map_err(|error| anyhow::anyhow!("failed to install tracing subscriber: {error}"))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_aliases() {
        assert_eq!("DBG".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Error.to_string(), "Error");
        assert_eq!(LogLevel::Info.level_filter(), LevelFilter::INFO);
    }

    #[test]
    fn disabled_logger_installs_nothing() {
        let config = LoggerConfig::default().with_enabled(false);

        assert!(init_tracing(&config).unwrap().is_none());
    }
}
