pub mod config;
pub mod connection;
pub mod errors;
pub mod handler;
pub mod middleware;
pub mod registry;
pub mod server;
pub mod session;
pub mod stream;
pub mod track;

use rtsp_formats::{consts::status::RtspStatus, response::RtspResponse};

pub const SERVER_AGENT: &str = "nvr_rtsp/rtsp";

/// Response without headers, the middlewares add CSeq, Server and Date.
#[inline(always)]
pub fn rtsp_server_simple_response(status: RtspStatus) -> RtspResponse {
    RtspResponse::builder(status).build()
}
