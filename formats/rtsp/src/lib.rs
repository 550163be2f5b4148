use std::{
    fmt,
    io::{self, Read},
};

use errors::RtspMessageError;
use interleaved::{DOLLAR_SIGN, RtspInterleavedPacket};
use request::{RtspRequest, reader::parse_request_line};
use response::{RtspResponse, reader::parse_status_line};
use tokio_util::{
    bytes::{Buf, BufMut, BytesMut},
    codec::{Decoder, Encoder},
};
use utils::traits::{
    reader::{ReadFrom, TryReadFrom, TryReadRemainingFrom},
    writer::WriteTo,
};

use crate::util::TextReader;

pub mod consts;
pub mod errors;
pub mod header;
pub mod interleaved;
pub mod path;
pub mod request;
pub mod response;
pub mod sdp_extension;
mod util;

/// Upper bound for bytes buffered while waiting for one message to complete.
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

const RTSP_VERSION_PREFIX: &str = "RTSP/";

#[derive(Debug, Clone)]
pub enum RtspMessage {
    Request(RtspRequest),
    Response(RtspResponse),
    Interleaved(RtspInterleavedPacket),
}

impl<R: io::BufRead> ReadFrom<R> for RtspMessage {
    type Error = RtspMessageError;
    fn read_from(reader: &mut R) -> Result<Self, Self::Error> {
        let buffer = reader.fill_buf()?;
        let (res, position) = {
            let mut cursor = io::Cursor::new(&buffer);
            (
                Self::try_read_from(&mut cursor)?.ok_or_else(|| {
                    RtspMessageError::InvalidRtspMessageFormat(
                        "rtsp message is incomplete".to_string(),
                    )
                }),
                cursor.position(),
            )
        };
        if res.is_ok() {
            reader.consume(position as usize);
        }
        res
    }
}

impl<R: AsRef<[u8]>> TryReadFrom<R> for RtspMessage {
    type Error = RtspMessageError;
    fn try_read_from(reader: &mut io::Cursor<R>) -> Result<Option<Self>, Self::Error> {
        TextReader::new(reader.by_ref()).skip_empty_lines()?;
        if !reader.has_remaining() {
            return Ok(None);
        }

        if reader.chunk()[0] == DOLLAR_SIGN {
            return RtspInterleavedPacket::try_read_from(reader)
                .map(|packet| packet.map(Self::Interleaved));
        }

        let Some(first_line) = TextReader::new(reader.by_ref()).try_read_line()? else {
            return Ok(None);
        };
        if first_line.starts_with(RTSP_VERSION_PREFIX) {
            return RtspResponse::try_read_remaining_from(parse_status_line(&first_line)?, reader)
                .map(|res| res.map(Self::Response));
        }
        RtspRequest::try_read_remaining_from(parse_request_line(&first_line)?, reader)
            .map(|req| req.map(Self::Request))
    }
}

impl<W: io::Write> WriteTo<W> for RtspMessage {
    type Error = RtspMessageError;
    fn write_to(&self, writer: &mut W) -> Result<(), Self::Error> {
        match self {
            Self::Request(req) => req.write_to(writer),
            Self::Response(res) => res.write_to(writer),
            Self::Interleaved(interleaved) => interleaved.write_to(writer),
        }
    }
}

impl fmt::Display for RtspMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(req) => write!(f, "{}", req),
            Self::Response(res) => write!(f, "{}", res),
            Self::Interleaved(interleaved) => write!(
                f,
                "${} <{} bytes>",
                interleaved.channel_id,
                interleaved.payload.len()
            ),
        }
    }
}

/// Codec for an RTSP connection carrying text messages and `$` frames.
#[derive(Debug, Default)]
pub struct RtspMessageFramed;

impl Encoder<RtspMessage> for RtspMessageFramed {
    type Error = RtspMessageError;

    fn encode(&mut self, item: RtspMessage, dst: &mut BytesMut) -> Result<(), Self::Error> {
        item.write_to(&mut dst.writer())
    }
}

impl Decoder for RtspMessageFramed {
    type Error = RtspMessageError;
    type Item = RtspMessage;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let (res, position) = {
            let mut cursor = io::Cursor::new(&src[..]);
            let res = RtspMessage::try_read_from(&mut cursor)?;
            (res, cursor.position())
        };
        match res {
            Some(message) => {
                src.advance(position as usize);
                Ok(Some(message))
            }
            None if src.len() > MAX_MESSAGE_SIZE => {
                Err(RtspMessageError::MessageTooLarge(MAX_MESSAGE_SIZE))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio_util::{
        bytes::BytesMut,
        codec::{Decoder, Encoder},
    };

    use crate::{
        RtspMessage, RtspMessageFramed, consts::methods::RtspMethod,
        interleaved::RtspInterleavedPacket,
    };

    #[test]
    fn test_decode_mixed_stream() {
        let mut src = BytesMut::new();
        src.extend_from_slice(b"OPTIONS rtsp://localhost:8554/stream RTSP/1.0\r\nCSeq: 1\r\n\r\n");
        src.extend_from_slice(&[0x24, 0x00, 0x00, 0x02, 0xAA, 0xBB]);
        src.extend_from_slice(b"RTSP/1.0 200 OK\r\nCSeq: 7\r\n\r\n");

        let mut codec = RtspMessageFramed;
        let Some(RtspMessage::Request(request)) = codec.decode(&mut src).unwrap() else {
            panic!("expected a request");
        };
        assert_eq!(request.method(), &RtspMethod::OPTIONS);

        let Some(RtspMessage::Interleaved(packet)) = codec.decode(&mut src).unwrap() else {
            panic!("expected an interleaved frame");
        };
        assert_eq!(packet.channel_id, 0);
        assert_eq!(&packet.payload[..], &[0xAA, 0xBB]);

        let Some(RtspMessage::Response(response)) = codec.decode(&mut src).unwrap() else {
            panic!("expected a response");
        };
        assert_eq!(response.headers().cseq().unwrap().unwrap(), 7);
        assert!(src.is_empty());
        assert!(codec.decode(&mut src).unwrap().is_none());
    }

    #[test]
    fn test_decode_partial_keeps_buffer() {
        let text = b"SETUP rtsp://localhost:8554/stream/trackID=0 RTSP/1.0\r\nCSeq: 2\r\n\r\n";
        let mut codec = RtspMessageFramed;
        let mut src = BytesMut::new();
        for (i, byte) in text.iter().enumerate() {
            src.extend_from_slice(&[*byte]);
            let decoded = codec.decode(&mut src).unwrap();
            if i + 1 < text.len() {
                assert!(decoded.is_none());
                assert_eq!(src.len(), i + 1);
            } else {
                assert!(matches!(decoded, Some(RtspMessage::Request(_))));
            }
        }
        assert!(src.is_empty());
    }

    #[test]
    fn test_encode_interleaved_is_binary() {
        let mut dst = BytesMut::new();
        let packet = RtspInterleavedPacket::builder()
            .channel(3)
            .payload(vec![0xFF_u8, 0x00, 0x80])
            .build();
        RtspMessageFramed
            .encode(RtspMessage::Interleaved(packet), &mut dst)
            .unwrap();
        assert_eq!(&dst[..], &[0x24, 0x03, 0x00, 0x03, 0xFF, 0x00, 0x80]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let mut src = BytesMut::from(&b"hello\r\n\r\n"[..]);
        assert!(RtspMessageFramed.decode(&mut src).is_err());
    }
}
