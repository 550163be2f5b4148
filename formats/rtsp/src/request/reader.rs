use std::{
    io::{self, Read},
    str::FromStr,
};

use url::Url;
use utils::traits::reader::{ReadFrom, TryReadFrom, TryReadRemainingFrom};

use crate::{
    consts::{methods::RtspMethod, version::RtspVersion},
    errors::RtspMessageError,
    header::RtspHeaders,
    util::{TextReader, try_read_body},
};

use super::RtspRequest;

/// `<method> <uri> <version>`
pub type RequestLine = (RtspMethod, Url, RtspVersion);

pub fn parse_request_line(line: &str) -> Result<RequestLine, RtspMessageError> {
    let parts: Vec<_> = line.split_whitespace().collect();
    let [method, uri, version] = parts.as_slice() else {
        return Err(RtspMessageError::InvalidRtspMessageFormat(format!(
            "invalid request line: {}",
            line.trim()
        )));
    };
    Ok((method.parse()?, uri.parse()?, version.parse()?))
}

impl<R: io::BufRead> ReadFrom<R> for RtspRequest {
    type Error = RtspMessageError;
    fn read_from(reader: &mut R) -> Result<Self, Self::Error> {
        let buffer = reader.fill_buf()?;
        let (res, position) = {
            let mut cursor = io::Cursor::new(&buffer);
            (
                Self::try_read_from(&mut cursor)?.ok_or_else(|| {
                    RtspMessageError::InvalidRtspMessageFormat(format!(
                        "rtsp request is not complete: {}",
                        String::from_utf8_lossy(buffer)
                    ))
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

impl FromStr for RtspRequest {
    type Err = RtspMessageError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::read_from(&mut s.as_bytes())
    }
}

impl<R: AsRef<[u8]>> TryReadRemainingFrom<RequestLine, R> for RtspRequest {
    type Error = RtspMessageError;
    fn try_read_remaining_from(
        header: RequestLine,
        reader: &mut io::Cursor<R>,
    ) -> Result<Option<Self>, Self::Error> {
        let Some(headers) = RtspHeaders::try_read_from(reader.by_ref())? else {
            return Ok(None);
        };
        let Some(body) = try_read_body(&headers, reader)? else {
            return Ok(None);
        };

        let (method, uri, version) = header;
        Ok(Some(Self {
            method,
            uri,
            version,
            headers,
            body,
        }))
    }
}

impl<R: AsRef<[u8]>> TryReadFrom<R> for RtspRequest {
    type Error = RtspMessageError;
    fn try_read_from(reader: &mut io::Cursor<R>) -> Result<Option<Self>, Self::Error> {
        let mut text_reader = TextReader::new(reader.by_ref());
        text_reader.skip_empty_lines()?;
        let Some(first_line) = text_reader.try_read_line()? else {
            return Ok(None);
        };
        Self::try_read_remaining_from(parse_request_line(&first_line)?, reader)
    }
}
