use std::io;

use sdp_formats::errors::SDPError;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("transport header value is missing")]
    ValueMissing,
    #[error("transport header has {0} values, expected exactly one")]
    MultipleValues(usize),
    #[error("protocol not found in transport header: {0}")]
    ProtocolNotFound(String),
    #[error("invalid interleaved ports: {0}")]
    PortsInvalid(String),
    #[error("invalid transport mode: {0}")]
    InvalidMode(String),
}

#[derive(Debug, Error)]
pub enum RtspMessageError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("format error: {0}")]
    FormatError(#[from] std::fmt::Error),
    #[error("Unknown method: {0:?}")]
    UnknownMethod(Option<String>),
    #[error("Unknown uri: {0:?}")]
    UnknownUri(Option<Url>),
    #[error("Unknown header: {0:?}")]
    UnknownHeader(Option<String>),
    #[error("Unknown status code: {0:?}")]
    UnknownStatusCode(Option<u16>),
    #[error("Unknown rtsp version: {0:?}")]
    UnknownRtspVersion(Option<String>),
    #[error("Missing Content-Type header for a message with a body")]
    MissingContentType,
    #[error("Invalid Content-Length: {0}")]
    InvalidContentLength(String),
    #[error("Invalid message format: {0}")]
    InvalidRtspMessageFormat(String),
    #[error("Message exceeds {0} bytes")]
    MessageTooLarge(usize),
    #[error("Invalid Url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Invalid interleaved $ sign: {0}")]
    InvalidInterleavedSign(u8),
    #[error("Invalid interleaved data length: {0}")]
    InvalidInterleavedDataLength(usize),
    #[error("Invalid session header: {0}")]
    InvalidSessionHeader(String),
    #[error("Invalid transport header: {0}")]
    Transport(#[from] TransportError),
    #[error("Invalid sdp: {0}")]
    Sdp(#[from] SDPError),
    #[error("Invalid sdp control attribute: {0}")]
    InvalidSdpControlAttribute(String),
}

pub type RtspMessageResult<T> = Result<T, RtspMessageError>;
