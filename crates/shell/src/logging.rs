//! Logging to files with `ftlog`.

use std::path::PathBuf;

use ftlog::{
    appender::{FileAppender, Period},
    LevelFilter, LoggerGuard,
};

/// The levels of log messages.
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum LogLevel {
    /// Only errors.
    #[clap(name = "error")]
    Error,
    /// Warnings and errors.
    #[clap(name = "warn")]
    Warn,
    /// Progress messages.
    #[clap(name = "info")]
    Info,
    /// Sizes of trees and lookups.
    #[clap(name = "debug")]
    Debug,
    /// Every split of every tree.
    #[clap(name = "trace")]
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

/// Configures `ftlog` to write to `logs/<file_name>.log` in the working
/// directory, rotating daily.
///
/// The logger stops when the returned guard is dropped.
///
/// # Errors
///
/// * If the `logs` directory cannot be created.
/// * If a logger has already been installed.
pub fn configure_logger(file_name: &str, level: LogLevel) -> Result<(LoggerGuard, PathBuf), String> {
    let root_dir = PathBuf::from(".").canonicalize().map_err(|e| e.to_string())?;
    let logs_dir = root_dir.join("logs");
    if !logs_dir.exists() {
        std::fs::create_dir(&logs_dir).map_err(|e| e.to_string())?;
    }
    let log_path = logs_dir.join(format!("{file_name}.log"));

    let writer = FileAppender::builder().path(&log_path).rotate(Period::Day).build();

    let err_path = log_path.with_extension("err.log");

    let guard = ftlog::Builder::new()
        // global max log level
        .max_log_level(level.into())
        // root appender, writing to `log_path`
        .root(writer)
        // `Warn` and `Error` logs of the appender itself go to `err_path`
        .filter("ftlog::appender", "ftlog-appender", LevelFilter::Warn)
        .appender("ftlog-appender", FileAppender::new(err_path))
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok((guard, log_path))
}
