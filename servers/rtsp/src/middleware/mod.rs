use rtsp_formats::{request::RtspRequest, response::RtspResponse};

use crate::errors::RtspServerResult;

pub mod response_header_appender;

/// Hooks run around every request handled by a connection.
pub trait RtspMiddleware: Send + Sync {
    fn pre_request(&self, request: RtspRequest) -> RtspServerResult<RtspRequest> {
        Ok(request)
    }

    fn pre_response(
        &self,
        request: &RtspRequest,
        response: RtspResponse,
    ) -> RtspServerResult<RtspResponse> {
        let _ = request;
        Ok(response)
    }
}
