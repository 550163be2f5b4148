use std::{fmt, str::FromStr};

use sdp_formats::attributes::SDPTrivialAttribute;
use url::Url;

use crate::errors::{RtspMessageError, RtspMessageResult};

pub const CONTROL: &str = "control";

/// `a=control:<url>`, relative urls resolve against the content base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RtspSDPControl {
    Absolute(Url),
    Relative(String),
    Asterisk,
}

impl RtspSDPControl {
    /// Url a client addresses this control with.
    pub fn resolve(&self, base: &Url) -> RtspMessageResult<Url> {
        match self {
            Self::Absolute(url) => Ok(url.clone()),
            Self::Asterisk => Ok(base.clone()),
            Self::Relative(path) => {
                let mut base = base.clone();
                if !base.path().ends_with('/') {
                    let path = format!("{}/", base.path());
                    base.set_path(&path);
                }
                Ok(base.join(path)?)
            }
        }
    }
}

impl FromStr for RtspSDPControl {
    type Err = RtspMessageError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(RtspMessageError::InvalidSdpControlAttribute(
                "the value part of attribute is empty".to_owned(),
            )),
            "*" => Ok(Self::Asterisk),
            s if s.contains("://") => Ok(Self::Absolute(s.parse()?)),
            s => Ok(Self::Relative(s.to_owned())),
        }
    }
}

impl fmt::Display for RtspSDPControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(url) => write!(f, "{}", url),
            Self::Relative(path) => f.write_str(path),
            Self::Asterisk => f.write_str("*"),
        }
    }
}

impl From<&RtspSDPControl> for SDPTrivialAttribute {
    fn from(value: &RtspSDPControl) -> Self {
        SDPTrivialAttribute::new(CONTROL, Some(value.to_string()))
    }
}

impl TryFrom<&SDPTrivialAttribute> for RtspSDPControl {
    type Error = RtspMessageError;
    fn try_from(value: &SDPTrivialAttribute) -> Result<Self, Self::Error> {
        if value.name != CONTROL {
            return Err(RtspMessageError::InvalidSdpControlAttribute(format!(
                "attribute name is not control: {}",
                value.name
            )));
        }
        value.value.as_deref().unwrap_or_default().parse()
    }
}
