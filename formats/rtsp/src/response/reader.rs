use std::{
    io::{self, Read},
    str::FromStr,
};

use utils::traits::reader::{ReadFrom, TryReadFrom, TryReadRemainingFrom};

use super::RtspResponse;
use crate::{
    consts::{status::RtspStatus, version::RtspVersion},
    errors::RtspMessageError,
    header::RtspHeaders,
    util::{TextReader, try_read_body},
};

/// `<version> <code> <reason>`, the reason phrase is not kept
pub type StatusLine = (RtspVersion, RtspStatus);

pub fn parse_status_line(line: &str) -> Result<StatusLine, RtspMessageError> {
    let mut parts = line.split_whitespace();
    let (Some(version), Some(code)) = (parts.next(), parts.next()) else {
        return Err(RtspMessageError::InvalidRtspMessageFormat(format!(
            "invalid status line: {}",
            line.trim()
        )));
    };
    let status: RtspStatus = code
        .parse::<u16>()
        .map_err(|_| {
            RtspMessageError::InvalidRtspMessageFormat(format!("invalid status code: {}", code))
        })?
        .try_into()?;
    Ok((version.parse()?, status))
}

impl<R: io::BufRead> ReadFrom<R> for RtspResponse {
    type Error = RtspMessageError;
    fn read_from(reader: &mut R) -> Result<Self, Self::Error> {
        let buffer = reader.fill_buf()?;
        let (res, position) = {
            let mut cursor = io::Cursor::new(&buffer);
            (
                Self::try_read_from(&mut cursor)?.ok_or_else(|| {
                    RtspMessageError::InvalidRtspMessageFormat(format!(
                        "rtsp response is not complete: {}",
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

impl FromStr for RtspResponse {
    type Err = RtspMessageError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::read_from(&mut s.as_bytes())
    }
}

impl<R: AsRef<[u8]>> TryReadRemainingFrom<StatusLine, R> for RtspResponse {
    type Error = RtspMessageError;
    fn try_read_remaining_from(
        header: StatusLine,
        reader: &mut io::Cursor<R>,
    ) -> Result<Option<Self>, Self::Error> {
        let Some(headers) = RtspHeaders::try_read_from(reader.by_ref())? else {
            return Ok(None);
        };
        let Some(body) = try_read_body(&headers, reader)? else {
            return Ok(None);
        };

        let (version, status) = header;
        Ok(Some(Self {
            status,
            version,
            headers,
            body,
        }))
    }
}

impl<R: AsRef<[u8]>> TryReadFrom<R> for RtspResponse {
    type Error = RtspMessageError;
    fn try_read_from(reader: &mut io::Cursor<R>) -> Result<Option<Self>, Self::Error> {
        let mut text_reader = TextReader::new(reader.by_ref());
        text_reader.skip_empty_lines()?;
        let Some(first_line) = text_reader.try_read_line()? else {
            return Ok(None);
        };
        Self::try_read_remaining_from(parse_status_line(&first_line)?, reader)
    }
}
