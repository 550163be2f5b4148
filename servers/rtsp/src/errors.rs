use std::time::Duration;

use rtp_formats::{codec::RtpDepacketizeError, errors::RtpError};
use rtsp_formats::{
    consts::status::RtspStatus,
    errors::{RtspMessageError, TransportError},
};
use sdp_formats::errors::SDPError;
use thiserror::Error;

use crate::session::RtspSessionState;

#[derive(Debug, Error)]
pub enum RtspServerError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("rtsp message error: {0}")]
    RtspMessageError(#[from] RtspMessageError),
    #[error("invalid transport: {0}")]
    InvalidTransport(#[from] TransportError),
    #[error("rtp error: {0}")]
    RtpError(#[from] RtpError),
    #[error("depacketize failed: {0}")]
    DepacketizeError(#[from] RtpDepacketizeError),
    #[error("invalid sdp: {0}")]
    InvalidSdp(#[from] SDPError),
    #[error("CSeq is missing")]
    CSeqMissing,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("session not found")]
    SessionNotFound,
    #[error("{method} is not valid in state {state}")]
    InvalidState {
        method: String,
        state: RtspSessionState,
    },
    #[error("stream is closed")]
    StreamClosed,
    #[error("can't setup tracks with different paths")]
    DifferentPaths,
    #[error("track {0} has already been setup")]
    AlreadySetup(usize),
    #[error("track {0} does not exist")]
    TrackNotFound(usize),
    #[error("can't setup tracks with different transport modes")]
    ModeMismatch,
    #[error("interleaved channels are missing from the transport header")]
    InterleavedMissing,
    #[error("interleaved channel {0} is already in use")]
    InterleavedChannelInUse(u8),
    #[error("session is bound to another connection")]
    TwoConnOneSession,
    #[error("connection already owns a session")]
    OneConnTwoSessions,
    #[error("method not implemented: {0}")]
    NotImplemented(String),
    #[error("rejected by handler with {0}: {1}")]
    HandlerRejected(RtspStatus, String),
    #[error("no message received within {0:?}")]
    ReadTimeout(Duration),
    #[error("session idle for {0:?}")]
    SessionTimeout(Duration),
    #[error("write did not complete within {0:?}")]
    WriteTimeout(Duration),
    #[error("connection closed by peer")]
    ConnectionClosed,
    #[error("terminated")]
    Terminated,
}

impl RtspServerError {
    /// Status answered to the client when this error fails a request.
    pub fn status(&self) -> RtspStatus {
        match self {
            Self::SessionNotFound => RtspStatus::SessionNotFound,
            Self::InvalidState { .. } => RtspStatus::MethodNotValidInThisState,
            Self::InterleavedMissing => RtspStatus::UnsupportedTransport,
            Self::NotImplemented(_) => RtspStatus::NotImplemented,
            Self::HandlerRejected(status, _) => *status,
            Self::IoError(_)
            | Self::RtpError(_)
            | Self::ReadTimeout(_)
            | Self::SessionTimeout(_)
            | Self::WriteTimeout(_)
            | Self::ConnectionClosed
            | Self::Terminated => RtspStatus::InternalServerError,
            _ => RtspStatus::BadRequest,
        }
    }
}

pub type RtspServerResult<T> = Result<T, RtspServerError>;
