use std::io::{self, Read};

use tokio_util::bytes::Buf;

use crate::{
    consts::common::{CR, CRLF_STR, LF},
    errors::RtspMessageResult,
    header::RtspHeaders,
};

pub struct TextReader<R: io::BufRead> {
    inner: R,
}

impl<R: io::BufRead> TextReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// `None` until a full line, LF included, is buffered
    pub fn try_read_line(&mut self) -> io::Result<Option<String>> {
        if !self.inner.fill_buf()?.contains(&LF) {
            return Ok(None);
        }
        let mut line = String::new();
        self.inner.read_line(&mut line)?;
        Ok(Some(line))
    }

    fn skip_all(&mut self, skip: &[u8]) -> io::Result<usize> {
        let mut skipped = 0;
        while self.inner.fill_buf()?.starts_with(skip) {
            self.inner.consume(skip.len());
            skipped += skip.len();
        }
        Ok(skipped)
    }

    pub fn skip_empty_lines(&mut self) -> io::Result<usize> {
        let mut skipped = 0;
        loop {
            let skipped_this_round = self.skip_all(CRLF_STR.as_bytes())?
                + self.skip_all(&[CR])?
                + self.skip_all(&[LF])?;
            if skipped_this_round == 0 {
                break;
            }
            skipped += skipped_this_round;
        }
        Ok(skipped)
    }
}

/// Reads the body announced by `Content-Length`, `Ok(None)` while it is incomplete.
pub fn try_read_body<R: AsRef<[u8]>>(
    headers: &RtspHeaders,
    reader: &mut io::Cursor<R>,
) -> RtspMessageResult<Option<Option<String>>> {
    let Some(length) = headers.content_length()? else {
        return Ok(Some(None));
    };
    if length == 0 {
        return Ok(Some(None));
    }
    if reader.remaining() < length {
        return Ok(None);
    }
    let mut body = vec![0_u8; length];
    reader.read_exact(&mut body)?;
    Ok(Some(Some(String::from_utf8_lossy(&body).into_owned())))
}
