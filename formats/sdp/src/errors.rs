use thiserror::Error;

#[derive(Debug, Error)]
pub enum SDPError {
    #[error("parse url failed: {0}")]
    ParseUrlFailed(#[from] url::ParseError),
    #[error("syntax error: {0}")]
    SyntaxError(String),
    #[error("invalid attribute line: {0}")]
    InvalidAttributeLine(String),
    #[error("required line {0}= is missing")]
    MissingLine(char),
}

pub type SDPResult<T> = Result<T, SDPError>;
