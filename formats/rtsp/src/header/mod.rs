pub mod session;
pub mod transport;
#[cfg(test)]
mod test;

use std::{
    fmt,
    io::{self, Read},
    str::FromStr,
};

use session::SessionHeader;
use tokio_util::bytes::Buf;
use transport::TransportHeader;
use utils::traits::reader::{ReadFrom, TryReadFrom};

use crate::{
    consts::common::{COLON_STR, CRLF_STR},
    errors::{RtspMessageError, RtspMessageResult, TransportError},
    util::TextReader,
};

macro_rules! rtsp_headers {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Header names compare case-insensitively, unknown names are kept verbatim.
        #[derive(Debug, Clone)]
        pub enum RtspHeader {
            $($variant,)*
            Other(String),
        }

        impl RtspHeader {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $name,)*
                    Self::Other(name) => name.as_str(),
                }
            }
        }

        impl FromStr for RtspHeader {
            type Err = RtspMessageError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                if s.is_empty() || s.contains(char::is_whitespace) {
                    return Err(RtspMessageError::UnknownHeader(Some(s.to_owned())));
                }
                $(if s.eq_ignore_ascii_case($name) {
                    return Ok(Self::$variant);
                })*
                Ok(Self::Other(s.to_owned()))
            }
        }
    };
}

rtsp_headers! {
    Accept => "Accept",
    AcceptEncoding => "Accept-Encoding",
    AcceptLanguage => "Accept-Language",
    Allow => "Allow",
    Authorization => "Authorization",
    Bandwidth => "Bandwidth",
    Blocksize => "Blocksize",
    CacheControl => "Cache-Control",
    Conference => "Conference",
    Connection => "Connection",
    ContentBase => "Content-Base",
    ContentEncoding => "Content-Encoding",
    ContentLanguage => "Content-Language",
    ContentLength => "Content-Length",
    ContentLocation => "Content-Location",
    ContentType => "Content-Type",
    CSeq => "CSeq",
    Date => "Date",
    Expires => "Expires",
    From => "From",
    IfModifiedSince => "If-Modified-Since",
    LastModified => "Last-Modified",
    Location => "Location",
    ProxyAuthenticate => "Proxy-Authenticate",
    ProxyRequire => "Proxy-Require",
    Public => "Public",
    Range => "Range",
    Referer => "Referer",
    Require => "Require",
    RetryAfter => "Retry-After",
    RtpInfo => "RTP-Info",
    Scale => "Scale",
    Server => "Server",
    Session => "Session",
    Speed => "Speed",
    Supported => "Supported",
    Timestamp => "Timestamp",
    Transport => "Transport",
    Unsupported => "Unsupported",
    UserAgent => "User-Agent",
    Via => "Via",
    WWWAuthenticate => "WWW-Authenticate",
}

impl PartialEq for RtspHeader {
    fn eq(&self, other: &Self) -> bool {
        self.as_str().eq_ignore_ascii_case(other.as_str())
    }
}

impl Eq for RtspHeader {}

impl fmt::Display for RtspHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered header list, repeated keys are kept in arrival order.
#[derive(Debug, Default, Clone)]
pub struct RtspHeaders(Vec<(RtspHeader, String)>);

impl RtspHeaders {
    pub fn new(items: Vec<(RtspHeader, String)>) -> Self {
        Self(items)
    }

    pub fn push<S: Into<String>>(&mut self, key: RtspHeader, value: S) {
        self.0.push((key, value.into()));
    }

    pub fn append(&mut self, mut items: Vec<(RtspHeader, String)>) {
        self.0.append(&mut items);
    }

    pub fn get(&self, key: RtspHeader) -> Vec<&String> {
        self.0
            .iter()
            .filter(|(k, _)| k.eq(&key))
            .map(|(_, value)| value)
            .collect()
    }

    pub fn get_unique(&self, key: RtspHeader) -> Option<&String> {
        self.get(key).first().copied()
    }

    pub fn contains(&self, key: RtspHeader) -> bool {
        self.0.iter().any(|(k, _)| k.eq(&key))
    }

    pub fn remove(&mut self, key: RtspHeader) {
        self.0.retain(|(k, _)| k.ne(&key));
    }

    pub fn entries(&self) -> &Vec<(RtspHeader, String)> {
        &self.0
    }

    pub fn set<S: Into<String>>(&mut self, key: RtspHeader, value: S) {
        self.remove(key.clone());
        self.push(key, value);
    }

    /// `None` when the header is absent, an error when it is not a number
    pub fn cseq(&self) -> Option<RtspMessageResult<u32>> {
        self.get_unique(RtspHeader::CSeq).map(|cseq| {
            cseq.trim().parse().map_err(|_| {
                RtspMessageError::InvalidRtspMessageFormat(format!("invalid CSeq: {}", cseq))
            })
        })
    }

    pub fn content_length(&self) -> RtspMessageResult<Option<usize>> {
        self.get_unique(RtspHeader::ContentLength)
            .map(|length| {
                length
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| RtspMessageError::InvalidContentLength(length.clone()))
            })
            .transpose()
    }

    pub fn session(&self) -> Option<RtspMessageResult<SessionHeader>> {
        self.get_unique(RtspHeader::Session)
            .map(|session| session.parse())
    }

    /// All `Transport` values are handed to the codec, which insists on exactly one.
    pub fn transport(&self) -> Result<TransportHeader, TransportError> {
        let values: Vec<&str> = self
            .get(RtspHeader::Transport)
            .into_iter()
            .map(String::as_str)
            .collect();
        TransportHeader::unmarshal(values.as_slice())
    }
}

impl fmt::Display for RtspHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.entries()
            .iter()
            .try_for_each(|(key, value)| write!(f, "{}: {}{}", key, value, CRLF_STR))
    }
}

impl<R: io::BufRead> ReadFrom<R> for RtspHeaders {
    type Error = RtspMessageError;
    fn read_from(reader: &mut R) -> Result<Self, Self::Error> {
        let buffer = reader.fill_buf()?.to_vec();
        let mut cursor = io::Cursor::new(&buffer);
        if let Some(headers) = Self::try_read_from(cursor.by_ref())? {
            reader.consume(cursor.position() as usize);
            return Ok(headers);
        }
        Err(RtspMessageError::InvalidRtspMessageFormat(format!(
            "the message is incomplete: {}",
            String::from_utf8_lossy(&buffer),
        )))
    }
}

impl<R: AsRef<[u8]>> TryReadFrom<R> for RtspHeaders {
    type Error = RtspMessageError;
    fn try_read_from(reader: &mut io::Cursor<R>) -> Result<Option<Self>, Self::Error> {
        if !reader.has_remaining() {
            return Ok(None);
        }
        let mut text_reader = TextReader::new(reader.by_ref());
        let mut headers: Vec<(RtspHeader, String)> = vec![];
        loop {
            // at least the terminating CRLF should be there
            let Some(line) = text_reader.try_read_line()? else {
                return Ok(None);
            };

            let trimmed_line = line.trim();
            if trimmed_line.is_empty() {
                break;
            }
            let Some((key, value)) = trimmed_line.split_once(COLON_STR) else {
                return Err(RtspMessageError::InvalidRtspMessageFormat(format!(
                    "invalid header line: {}",
                    trimmed_line
                )));
            };

            headers.push((key.parse::<RtspHeader>()?, value.trim().to_owned()));
        }

        Ok(Some(Self(headers)))
    }
}
