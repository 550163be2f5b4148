use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AacError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("wrong sync word: {0:#x}")]
    WrongSyncWord(u16),
    #[error("adts frame is too short: {0} bytes left")]
    ShortFrame(usize),
    #[error("adts crc is not supported")]
    CrcNotSupported,
    #[error("unsupported audio object type: {0}")]
    UnsupportedObjectType(u8),
    #[error("unsupported sample rate: {0}")]
    UnsupportedSampleRate(u32),
    #[error("invalid sampling frequency index: {0}")]
    InvalidSamplingFrequencyIndex(u8),
    #[error("invalid channel configuration: {0}")]
    InvalidChannelConfiguration(u8),
    #[error("adts buffer fullness {0:#x} is not supported")]
    UnsupportedBufferFullness(u16),
    #[error("multiple raw data blocks in one adts frame are not supported: {0}")]
    MultipleRawDataBlocks(u8),
    #[error("invalid adts frame length: {length}, {remaining} bytes remaining")]
    InvalidFrameLength { length: usize, remaining: usize },
}

pub type AacResult<T> = Result<T, AacError>;
