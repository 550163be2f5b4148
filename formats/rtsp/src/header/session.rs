use std::{fmt, str::FromStr};

use crate::errors::RtspMessageError;

/// `Session: <id>[;timeout=<seconds>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHeader {
    pub id: String,
    pub timeout: Option<u64>,
}

impl SessionHeader {
    pub fn new<S: Into<String>>(id: S, timeout: Option<u64>) -> Self {
        Self {
            id: id.into(),
            timeout,
        }
    }
}

impl FromStr for SessionHeader {
    type Err = RtspMessageError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(';').map(str::trim);
        let id = parts.next().unwrap_or_default();
        if id.is_empty() {
            return Err(RtspMessageError::InvalidSessionHeader(s.to_owned()));
        }

        let mut timeout = None;
        for part in parts {
            if let Some((key, value)) = part.split_once('=')
                && key.trim().eq_ignore_ascii_case("timeout")
            {
                timeout = Some(
                    value
                        .trim()
                        .parse()
                        .map_err(|_| RtspMessageError::InvalidSessionHeader(s.to_owned()))?,
                );
            }
        }

        Ok(Self {
            id: id.to_owned(),
            timeout,
        })
    }
}

impl fmt::Display for SessionHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)?;
        if let Some(timeout) = self.timeout {
            write!(f, ";timeout={}", timeout)?;
        }
        Ok(())
    }
}
