use std::io;

use codec_aac::{consts::MAX_ACCESS_UNIT_SIZE, errors::AacError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RtpMpeg4Error {
    #[error("io error: {0}")]
    IoError(#[from] io::Error),
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("payload is too short")]
    ShortPayload,
    #[error("invalid AU-headers-length")]
    AuHeadersInvalidLength,
    #[error("AU-index different than zero is not supported: {0}")]
    AuIndexNotZero(u64),
    #[error("AU-index-delta different than zero is not supported: {0}")]
    AuIndexDeltaNotZero(u64),
    #[error("a fragmented packet can only contain one AU, got {0}")]
    FragMultipleAu(usize),
    #[error("AU size ({0}) is too big, maximum is {max}", max = MAX_ACCESS_UNIT_SIZE)]
    AuTooBig(usize),
    #[error("multiple AUs in ADTS mode are not supported, got {0}")]
    AdtsMultipleAu(usize),
    #[error("multiple ADTS packets are not supported, got {0}")]
    MultipleAdts(usize),
    #[error("unable to decode ADTS: {0}")]
    Adts(#[from] AacError),
}

pub type RtpMpeg4Result<T> = Result<T, RtpMpeg4Error>;
