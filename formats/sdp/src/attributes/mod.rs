pub mod fmtp;
pub mod rtpmap;

use std::{fmt, str::FromStr};

use fmtp::FormatParameters;
use rtpmap::RtpMap;

use crate::errors::SDPError;

/// `a=<name>` or `a=<name>:<value>` kept as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SDPTrivialAttribute {
    pub name: String,
    pub value: Option<String>,
}

impl SDPTrivialAttribute {
    pub fn new<S: Into<String>>(name: S, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl fmt::Display for SDPTrivialAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(value) = &self.value {
            write!(f, ":{}", value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SDPAttribute {
    RtpMap(RtpMap),
    Fmtp(FormatParameters),
    Trivial(SDPTrivialAttribute),
}

impl SDPAttribute {
    pub fn name(&self) -> &str {
        match self {
            Self::RtpMap(_) => "rtpmap",
            Self::Fmtp(_) => "fmtp",
            Self::Trivial(attribute) => &attribute.name,
        }
    }
}

impl FromStr for SDPAttribute {
    type Err = SDPError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = match s.split_once(':') {
            Some((name, value)) => (name, Some(value)),
            None => (s, None),
        };
        match (name, value) {
            ("rtpmap", Some(value)) => Ok(Self::RtpMap(value.parse()?)),
            ("fmtp", Some(value)) => Ok(Self::Fmtp(value.parse()?)),
            ("", _) => Err(SDPError::InvalidAttributeLine(s.to_owned())),
            (name, value) => Ok(Self::Trivial(SDPTrivialAttribute::new(
                name,
                value.map(str::to_owned),
            ))),
        }
    }
}

impl fmt::Display for SDPAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RtpMap(rtpmap) => write!(f, "rtpmap:{}", rtpmap),
            Self::Fmtp(fmtp) => write!(f, "fmtp:{}", fmtp),
            Self::Trivial(attribute) => write!(f, "{}", attribute),
        }
    }
}

impl From<SDPTrivialAttribute> for SDPAttribute {
    fn from(value: SDPTrivialAttribute) -> Self {
        Self::Trivial(value)
    }
}
