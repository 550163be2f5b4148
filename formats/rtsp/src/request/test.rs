#[cfg(test)]
mod tests {
    use std::io::{self, Read};

    use url::Url;
    use utils::traits::reader::{ReadFrom, TryReadFrom};

    use crate::{
        consts::{methods::RtspMethod, version::RtspVersion},
        header::RtspHeader,
        request::RtspRequest,
    };

    #[test]
    fn options() {
        let request = RtspRequest::builder()
            .method(RtspMethod::OPTIONS)
            .uri("rtsp://camera.local:8554/teststream".parse::<Url>().unwrap())
            .header(RtspHeader::CSeq, "1")
            .header(RtspHeader::UserAgent, "LibVLC/3.0.20")
            .build();
        assert!(request.is_ok());

        let text = "OPTIONS rtsp://camera.local:8554/teststream RTSP/1.0\r\n\
CSeq: 1\r\n\
User-Agent: LibVLC/3.0.20\r\n\r\n";

        assert_eq!(format!("{}", request.unwrap()), text);
        let parsed = RtspRequest::read_from(&mut text.as_bytes());
        assert!(parsed.is_ok());
        assert_eq!(text, format!("{}", parsed.unwrap()));
    }

    #[test]
    fn setup_record() {
        let text = "SETUP rtsp://localhost:8554/teststream/trackID=0 RTSP/1.0\r\n\
cseq: 3\r\n\
transport: RTP/AVP/TCP;unicast;interleaved=0-1;mode=record\r\n\r\n";
        let request: RtspRequest = text.parse().unwrap();
        assert_eq!(request.method(), &RtspMethod::SETUP);
        assert_eq!(request.version(), &RtspVersion::V1);
        assert_eq!(request.uri().path(), "/teststream/trackID=0");
        assert_eq!(request.headers().cseq().unwrap().unwrap(), 3);

        let transport = request.headers().transport().unwrap();
        assert_eq!(transport.interleaved, Some((0, 1)));
        assert!(request.body().is_none());
    }

    #[test]
    fn get_parameter_with_body() {
        let body = "packets_received\r\njitter\r\n";
        let request = RtspRequest::builder()
            .method(RtspMethod::GET_PARAMETER)
            .uri("rtsp://example.com/fizzle/foo".parse::<Url>().unwrap())
            .header(RtspHeader::CSeq, "431")
            .header(RtspHeader::Session, "OccldOFFq23KwjYpAnBbUr")
            .header(RtspHeader::ContentType, "text/parameters")
            .body(body.to_owned())
            .build()
            .unwrap();
        let text = format!(
            "GET_PARAMETER rtsp://example.com/fizzle/foo RTSP/1.0\r\n\
CSeq: 431\r\n\
Session: OccldOFFq23KwjYpAnBbUr\r\n\
Content-Type: text/parameters\r\n\
Content-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );
        assert_eq!(text, format!("{}", request));

        let parsed = RtspRequest::read_from(&mut text.as_bytes()).unwrap();
        assert_eq!(parsed.body().unwrap(), body);
        assert_eq!(text, format!("{}", parsed));
    }

    #[test]
    fn body_incomplete() {
        let text = "GET_PARAMETER rtsp://example.com/fizzle/foo RTSP/1.0\r\n\
CSeq: 431\r\n\
Content-Type: text/parameters\r\n\
Content-Length: 24\r\n\r\n\
packets_received\r\njitt";

        let mut cursor = io::Cursor::new(text.as_bytes());
        let parsed = RtspRequest::try_read_from(cursor.by_ref());
        assert!(parsed.unwrap().is_none());
    }

    #[test]
    fn first_line_incomplete() {
        let mut cursor = io::Cursor::new("TEARDOWN rtsp://exam".as_bytes());
        assert!(RtspRequest::try_read_from(cursor.by_ref()).unwrap().is_none());
    }

    #[test]
    fn extension_method() {
        let text = "FLUSH rtsp://localhost/stream RTSP/1.0\r\nCSeq: 9\r\n\r\n";
        let request: RtspRequest = text.parse().unwrap();
        assert_eq!(request.method(), &RtspMethod::Other("FLUSH".to_owned()));
        assert_eq!(format!("{}", request), text);
    }

    #[test]
    fn malformed() {
        assert!("SETUP\r\n\r\n".parse::<RtspRequest>().is_err());
        assert!("PLAY not-a-url RTSP/1.0\r\n\r\n".parse::<RtspRequest>().is_err());
        assert!("PLAY rtsp://h/s HTTP/1.1\r\n\r\n".parse::<RtspRequest>().is_err());
        assert!(
            "PLAY rtsp://h/s RTSP/1.0\r\nContent-Length: x\r\n\r\n"
                .parse::<RtspRequest>()
                .is_err()
        );
    }

    #[test]
    fn builder_rejects_body_without_content_type() {
        let request = RtspRequest::builder()
            .method(RtspMethod::SET_PARAMETER)
            .uri("rtsp://example.com/foo".parse::<Url>().unwrap())
            .body("a: b".to_owned())
            .build();
        assert!(request.is_err());

        let request = RtspRequest::builder()
            .method(RtspMethod::OPTIONS)
            .uri("http://example.com/foo".parse::<Url>().unwrap())
            .build();
        assert!(request.is_err());
    }
}
