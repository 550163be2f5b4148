#[cfg(test)]
mod tests {
    use std::io;

    use utils::traits::reader::TryReadFrom;

    use crate::header::{RtspHeader, RtspHeaders, session::SessionHeader};

    #[test]
    fn test_header_names_are_case_insensitive() {
        assert_eq!("cseq".parse::<RtspHeader>().unwrap(), RtspHeader::CSeq);
        assert_eq!("TRANSPORT".parse::<RtspHeader>().unwrap(), RtspHeader::Transport);
        assert_eq!("Rtp-Info".parse::<RtspHeader>().unwrap(), RtspHeader::RtpInfo);

        let custom = "X-Accept-Dynamic-Rate".parse::<RtspHeader>().unwrap();
        assert_eq!(custom, RtspHeader::Other("x-accept-dynamic-rate".to_owned()));
        assert_eq!(custom.to_string(), "X-Accept-Dynamic-Rate");

        assert!("".parse::<RtspHeader>().is_err());
        assert!("Bad Name".parse::<RtspHeader>().is_err());
    }

    #[test]
    fn test_read_headers() {
        let text = "cseq: 3\r\nSession: 12345678;timeout=60\r\nX-Custom: a:b\r\n\r\nrest";
        let mut cursor = io::Cursor::new(text.as_bytes());
        let headers = RtspHeaders::try_read_from(&mut cursor).unwrap().unwrap();
        assert_eq!(&text[cursor.position() as usize..], "rest");

        assert_eq!(headers.cseq().unwrap().unwrap(), 3);
        assert_eq!(
            headers.session().unwrap().unwrap(),
            SessionHeader::new("12345678", Some(60))
        );
        assert_eq!(
            headers.get_unique(RtspHeader::Other("X-Custom".to_owned())),
            Some(&"a:b".to_owned())
        );
        assert_eq!(headers.content_length().unwrap(), None);
    }

    #[test]
    fn test_read_headers_incomplete() {
        let text = "CSeq: 3\r\nSession: 1234";
        let mut cursor = io::Cursor::new(text.as_bytes());
        assert!(RtspHeaders::try_read_from(&mut cursor).unwrap().is_none());

        let text = "CSeq: 3\r\n";
        let mut cursor = io::Cursor::new(text.as_bytes());
        assert!(RtspHeaders::try_read_from(&mut cursor).unwrap().is_none());
    }

    #[test]
    fn test_invalid_header_line() {
        let text = "CSeq 3\r\n\r\n";
        let mut cursor = io::Cursor::new(text.as_bytes());
        assert!(RtspHeaders::try_read_from(&mut cursor).is_err());
    }

    #[test]
    fn test_set_replaces_all() {
        let mut headers = RtspHeaders::default();
        headers.push(RtspHeader::CSeq, "1");
        headers.push(RtspHeader::Other("cseq".to_owned()), "2");
        headers.set(RtspHeader::CSeq, "5");
        assert_eq!(headers.get(RtspHeader::CSeq), vec!["5"]);
        assert!(headers.cseq().unwrap().is_ok());

        headers.set(RtspHeader::CSeq, "five");
        assert!(headers.cseq().unwrap().is_err());
        headers.remove(RtspHeader::CSeq);
        assert!(headers.cseq().is_none());
    }

    #[test]
    fn test_session_header() {
        assert_eq!(
            "ABC".parse::<SessionHeader>().unwrap(),
            SessionHeader::new("ABC", None)
        );
        assert_eq!(
            SessionHeader::new("ABC", Some(30)).to_string(),
            "ABC;timeout=30"
        );
        assert!("".parse::<SessionHeader>().is_err());
        assert!("ABC;timeout=soon".parse::<SessionHeader>().is_err());
    }
}
