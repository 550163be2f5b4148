use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RtpError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("rtp packet too short: {0} bytes")]
    ShortPacket(usize),
    #[error("unsupported rtp version: {0}")]
    UnsupportedVersion(u8),
    #[error("bad padding size: {0}")]
    BadPaddingSize(usize),
    #[error("header extension too long: {0} bytes")]
    ExtensionTooLong(usize),
    #[error("too many csrc")]
    TooManyCSRC,
}

pub type RtpResult<T> = Result<T, RtpError>;
