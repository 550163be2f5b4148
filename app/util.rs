use config::ConfigError;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{time::LocalTime, writer::MakeWriterExt},
};

use crate::{
    config::Logger,
    errors::{AppError, AppResult},
};

const LOG_FILE_PREFIX: &str = "nvr_rtsp.log";

pub(crate) fn parse_log_level(level: &str) -> AppResult<tracing::Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(tracing::Level::TRACE),
        "debug" => Ok(tracing::Level::DEBUG),
        "info" => Ok(tracing::Level::INFO),
        "warn" => Ok(tracing::Level::WARN),
        "error" => Ok(tracing::Level::ERROR),
        other => Err(AppError::ConfigError(ConfigError::Message(format!(
            "got unexpected log level: {}",
            other
        )))),
    }
}

/// Logs to stdout and a daily rolling file, `LOG_LEVEL` overrides the configured level.
///
/// The returned guard flushes the file writer when dropped.
pub(crate) fn init_logger(config: &Logger) -> AppResult<WorkerGuard> {
    let level = parse_log_level(&config.level)?;
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&config.dir, LOG_FILE_PREFIX));

    let subscriber = tracing_subscriber::fmt()
        .with_timer(LocalTime::new(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]"
        )))
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_target(true)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .with_writer(std::io::stdout.and(file_writer))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| AppError::LoggerError(err.to_string()))?;
    Ok(guard)
}
