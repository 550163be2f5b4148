#[cfg(test)]
mod tests {
    use std::io::{self, Read};

    use utils::traits::reader::{ReadFrom, TryReadFrom};

    use crate::{
        consts::{status::RtspStatus, version::RtspVersion},
        header::RtspHeader,
        response::RtspResponse,
    };

    #[test]
    fn options() {
        let response = RtspResponse::builder(RtspStatus::OK)
            .header(RtspHeader::CSeq, "1")
            .header(
                RtspHeader::Public,
                "OPTIONS, SETUP, PLAY, RECORD, TEARDOWN, GET_PARAMETER",
            )
            .header(RtspHeader::Server, "nvr_rtsp")
            .build();
        let text = "RTSP/1.0 200 OK\r\n\
CSeq: 1\r\n\
Public: OPTIONS, SETUP, PLAY, RECORD, TEARDOWN, GET_PARAMETER\r\n\
Server: nvr_rtsp\r\n\r\n";
        assert_eq!(text, format!("{}", response));
        let parsed = RtspResponse::read_from(&mut text.as_bytes());
        assert!(parsed.is_ok());
        assert_eq!(text, format!("{}", parsed.unwrap()));
    }

    #[test]
    fn setup() {
        let text = "RTSP/1.0 200 OK\r\n\
CSeq: 3\r\n\
Session: 0193b1c4;timeout=60\r\n\
Transport: RTP/AVP/TCP;interleaved=0-1;mode=play\r\n\r\n";
        let response: RtspResponse = text.parse().unwrap();
        assert_eq!(response.status(), RtspStatus::OK);
        assert_eq!(response.version(), &RtspVersion::V1);
        assert_eq!(response.headers().session().unwrap().unwrap().id, "0193b1c4");
        assert_eq!(
            response.headers().transport().unwrap().interleaved,
            Some((0, 1))
        );
    }

    #[test]
    fn error_statuses() {
        let text = "RTSP/1.0 454 Session Not Found\r\nCSeq: 5\r\n\r\n";
        let response: RtspResponse = text.parse().unwrap();
        assert_eq!(response.status(), RtspStatus::SessionNotFound);
        assert_eq!(format!("{}", response), text);

        let text = "RTSP/1.0 461 Unsupported transport\r\nCSeq: 5\r\n\r\n";
        let response: RtspResponse = text.parse().unwrap();
        assert_eq!(response.status(), RtspStatus::UnsupportedTransport);

        assert!("RTSP/1.0 299 Whatever\r\n\r\n".parse::<RtspResponse>().is_err());
        assert!("RTSP/1.0 abc OK\r\n\r\n".parse::<RtspResponse>().is_err());
    }

    #[test]
    fn with_body() {
        let body = "v=0\r\no=- 0 0 IN IP4 127.0.0.1\r\ns=Stream\r\n";
        let response = RtspResponse::builder(RtspStatus::OK)
            .header(RtspHeader::CSeq, "2")
            .body("application/sdp", body)
            .build();
        let text = format!("{}", response);
        assert!(text.contains("Content-Type: application/sdp\r\n"));
        assert!(text.contains(&format!("Content-Length: {}\r\n", body.len())));

        let mut cursor = io::Cursor::new(text.as_bytes());
        let parsed = RtspResponse::try_read_from(cursor.by_ref()).unwrap().unwrap();
        assert_eq!(parsed.body().unwrap(), body);
        assert_eq!(cursor.position() as usize, text.len());

        let truncated = &text[..text.len() - 4];
        let mut cursor = io::Cursor::new(truncated.as_bytes());
        assert!(RtspResponse::try_read_from(cursor.by_ref()).unwrap().is_none());
    }

    #[test]
    fn builder_replaces_headers() {
        let response = RtspResponse::builder(RtspStatus::NotFound)
            .version(RtspVersion::V1)
            .header(RtspHeader::CSeq, "1")
            .header(RtspHeader::CSeq, "2")
            .build();
        assert_eq!(response.headers().get(RtspHeader::CSeq), vec!["2"]);
        assert!(response.body().is_none());
        assert!(!response.headers().contains(RtspHeader::ContentLength));
        let rebuilt = response
            .into_builder()
            .body("application/sdp", "v=0\r\n")
            .build();
        assert_eq!(rebuilt.status(), RtspStatus::NotFound);
        assert_eq!(rebuilt.headers().get(RtspHeader::CSeq), vec!["2"]);
        assert_eq!(rebuilt.headers().content_length().unwrap(), Some(5));
        assert_eq!(
            format!("{}", RtspResponse::with_status(RtspStatus::NotFound)),
            "RTSP/1.0 404 Not Found\r\n\r\n"
        );
    }
}
