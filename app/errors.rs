use config::ConfigError;
use rtsp_server::errors::RtspServerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("rtsp server error: {0}")]
    RtspServerError(#[from] RtspServerError),
    #[error("logger init failed: {0}")]
    LoggerError(String),
}

pub(crate) type AppResult<T> = Result<T, AppError>;
