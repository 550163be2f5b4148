use std::{fmt, str::FromStr};

use crate::errors::SDPError;

/// `a=rtpmap:<payload type> <encoding name>/<clock rate>[/<encoding parameters>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpMap {
    pub payload_type: u8,
    pub encoding_name: String,
    pub clock_rate: u32,
    /// channel count for audio
    pub encoding_params: Option<u8>,
}

fn invalid(what: &str, value: &str) -> SDPError {
    SDPError::InvalidAttributeLine(format!("invalid rtpmap {}: {}", what, value))
}

impl FromStr for RtpMap {
    type Err = SDPError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (payload_type, encoding) = s
            .trim()
            .split_once(' ')
            .ok_or_else(|| invalid("line", s))?;
        let payload_type = payload_type
            .parse()
            .map_err(|_| invalid("payload type", payload_type))?;

        let mut fields = encoding.trim().split('/');
        let encoding_name = fields
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| invalid("encoding", encoding))?;
        let clock_rate = fields
            .next()
            .and_then(|rate| rate.parse().ok())
            .ok_or_else(|| invalid("clock rate", encoding))?;
        let encoding_params = fields
            .next()
            .map(|params| params.parse().map_err(|_| invalid("encoding params", params)))
            .transpose()?;
        if fields.next().is_some() {
            return Err(invalid("encoding", encoding));
        }

        Ok(Self {
            payload_type,
            encoding_name: encoding_name.to_owned(),
            clock_rate,
            encoding_params,
        })
    }
}

impl fmt::Display for RtpMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{}",
            self.payload_type, self.encoding_name, self.clock_rate
        )?;
        if let Some(params) = self.encoding_params {
            write!(f, "/{}", params)?;
        }
        Ok(())
    }
}
