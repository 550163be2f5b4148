use rtsp_formats::{header::RtspHeader, request::RtspRequest, response::RtspResponse};

use super::RtspMiddleware;
use crate::{SERVER_AGENT, errors::RtspServerResult};

const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

#[derive(Debug, Default)]
pub struct ResponseHeaderAppender;

impl RtspMiddleware for ResponseHeaderAppender {
    fn pre_response(
        &self,
        request: &RtspRequest,
        mut response: RtspResponse,
    ) -> RtspServerResult<RtspResponse> {
        let headers = response.headers_mut();
        // echoed as sent, clients compare the raw value
        if let Some(cseq) = request.headers().get_unique(RtspHeader::CSeq) {
            headers.set(RtspHeader::CSeq, cseq.trim());
        }
        headers.set(RtspHeader::Server, SERVER_AGENT);
        headers.set(
            RtspHeader::Date,
            chrono::Utc::now().format(DATE_FORMAT).to_string(),
        );
        response.set_version(request.version().clone());
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use rtsp_formats::{
        consts::{status::RtspStatus, version::RtspVersion},
        header::RtspHeader,
        request::RtspRequest,
    };

    use super::ResponseHeaderAppender;
    use crate::{SERVER_AGENT, middleware::RtspMiddleware, rtsp_server_simple_response};

    #[test]
    fn test_append_headers() {
        let request: RtspRequest = "OPTIONS rtsp://localhost:8554/teststream RTSP/1.0\r\nCSeq: 0042\r\n\r\n"
            .parse()
            .unwrap();
        let response = ResponseHeaderAppender
            .pre_response(&request, rtsp_server_simple_response(RtspStatus::OK))
            .unwrap();
        let headers = response.headers();
        assert_eq!(headers.get_unique(RtspHeader::CSeq).unwrap(), "0042");
        assert_eq!(headers.get_unique(RtspHeader::Server).unwrap(), SERVER_AGENT);
        assert!(headers.get_unique(RtspHeader::Date).unwrap().ends_with("GMT"));
        assert_eq!(*response.version(), RtspVersion::V1);
    }
}
