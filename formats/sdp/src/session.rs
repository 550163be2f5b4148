use std::fmt;

use itertools::Itertools;
use url::Url;

use crate::{
    CRLF,
    attributes::{SDPAttribute, fmtp::FormatParameters, rtpmap::RtpMap},
};

/// 5.2. Origin ("o=")
/// o=<username> <sess-id> <sess-version> <nettype> <addrtype> <unicast-address>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SDPOrigin {
    pub user_name: String,
    pub session_id: u64,
    pub session_version: u64,
    pub net_type: String,
    pub addr_type: String,
    pub unicast_address: String,
}

impl Default for SDPOrigin {
    fn default() -> Self {
        Self {
            user_name: "-".to_owned(),
            session_id: 0,
            session_version: 0,
            net_type: "IN".to_owned(),
            addr_type: "IP4".to_owned(),
            unicast_address: "127.0.0.1".to_owned(),
        }
    }
}

impl fmt::Display for SDPOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.user_name,
            self.session_id,
            self.session_version,
            self.net_type,
            self.addr_type,
            self.unicast_address
        )
    }
}

/// 5.7. Connection Information ("c=")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SDPConnectionInformation {
    pub net_type: String,
    pub addr_type: String,
    /// address with the optional `/ttl` and `/range` suffixes as written
    pub address: String,
}

impl fmt::Display for SDPConnectionInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.net_type, self.addr_type, self.address)
    }
}

/// 5.9. Time Active ("t="), `0 0` for an unbounded session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SDPTimeInformation {
    pub start_time: u64,
    pub stop_time: u64,
}

impl fmt::Display for SDPTimeInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.start_time, self.stop_time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SDPMediaType {
    Audio,
    Video,
    Application,
    Other(String),
}

impl From<&str> for SDPMediaType {
    fn from(value: &str) -> Self {
        match value {
            "audio" => Self::Audio,
            "video" => Self::Video,
            "application" => Self::Application,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for SDPMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audio => f.write_str("audio"),
            Self::Video => f.write_str("video"),
            Self::Application => f.write_str("application"),
            Self::Other(other) => f.write_str(other),
        }
    }
}

/// 5.14. Media Descriptions ("m=")
/// m=<media> <port> <proto> <fmt> ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SDPMediaLine {
    pub media_type: SDPMediaType,
    pub port: u16,
    pub protocol: String,
    pub formats: Vec<String>,
}

impl fmt::Display for SDPMediaLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.media_type,
            self.port,
            self.protocol,
            self.formats.iter().join(" ")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SDPMediaDescription {
    pub media_line: SDPMediaLine,
    pub media_title: Option<String>,
    pub connection_information: Option<SDPConnectionInformation>,
    pub attributes: Vec<SDPAttribute>,
}

impl SDPMediaDescription {
    pub fn new(media_line: SDPMediaLine) -> Self {
        Self {
            media_line,
            media_title: None,
            connection_information: None,
            attributes: Vec::new(),
        }
    }

    /// First format number of the media line.
    pub fn payload_type(&self) -> Option<u8> {
        self.media_line.formats.first()?.parse().ok()
    }

    pub fn rtpmap(&self) -> Option<&RtpMap> {
        self.attributes.iter().find_map(|attribute| match attribute {
            SDPAttribute::RtpMap(rtpmap) => Some(rtpmap),
            _ => None,
        })
    }

    pub fn fmtp(&self) -> Option<&FormatParameters> {
        self.attributes.iter().find_map(|attribute| match attribute {
            SDPAttribute::Fmtp(fmtp) => Some(fmtp),
            _ => None,
        })
    }

    /// Value of the first text attribute called `name`, `Some("")` for a flag.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find_map(|attribute| match attribute {
            SDPAttribute::Trivial(attribute) if attribute.name == name => {
                Some(attribute.value.as_deref().unwrap_or_default())
            }
            _ => None,
        })
    }
}

impl fmt::Display for SDPMediaDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m={}{}", self.media_line, CRLF)?;
        if let Some(title) = &self.media_title {
            write!(f, "i={}{}", title, CRLF)?;
        }
        if let Some(connection) = &self.connection_information {
            write!(f, "c={}{}", connection, CRLF)?;
        }
        self.attributes
            .iter()
            .try_for_each(|attribute| write!(f, "a={}{}", attribute, CRLF))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescription {
    pub version: u8,
    pub origin: SDPOrigin,
    pub session_name: String,
    pub session_information: Option<String>,
    pub uri: Option<Url>,
    pub connection_information: Option<SDPConnectionInformation>,
    pub time_information: Vec<SDPTimeInformation>,
    pub attributes: Vec<SDPAttribute>,
    pub media_descriptions: Vec<SDPMediaDescription>,
}

impl Default for SessionDescription {
    fn default() -> Self {
        Self {
            version: 0,
            origin: SDPOrigin::default(),
            session_name: "Stream".to_owned(),
            session_information: None,
            uri: None,
            connection_information: None,
            time_information: vec![SDPTimeInformation::default()],
            attributes: Vec::new(),
            media_descriptions: Vec::new(),
        }
    }
}

impl fmt::Display for SessionDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v={}{}", self.version, CRLF)?;
        write!(f, "o={}{}", self.origin, CRLF)?;
        write!(f, "s={}{}", self.session_name, CRLF)?;
        if let Some(information) = &self.session_information {
            write!(f, "i={}{}", information, CRLF)?;
        }
        if let Some(uri) = &self.uri {
            write!(f, "u={}{}", uri, CRLF)?;
        }
        if let Some(connection) = &self.connection_information {
            write!(f, "c={}{}", connection, CRLF)?;
        }
        for time in &self.time_information {
            write!(f, "t={}{}", time, CRLF)?;
        }
        for attribute in &self.attributes {
            write!(f, "a={}{}", attribute, CRLF)?;
        }
        self.media_descriptions
            .iter()
            .try_for_each(|media| write!(f, "{}", media))
    }
}
