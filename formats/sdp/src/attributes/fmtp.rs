use std::{fmt, str::FromStr};

use itertools::Itertools;

use crate::errors::SDPError;

/// `a=fmtp:<payload type> key=value; key=value`
///
/// Keys are kept in order, lookups ignore case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatParameters {
    pub payload_type: u8,
    pub params: Vec<(String, String)>,
}

impl FormatParameters {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

impl FromStr for FormatParameters {
    type Err = SDPError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (payload_type, params) = s.split_once(' ').unwrap_or((s, ""));
        let payload_type = payload_type.parse().map_err(|_| {
            SDPError::InvalidAttributeLine(format!("invalid fmtp payload type: {}", payload_type))
        })?;

        let params = params
            .split(';')
            .map(str::trim)
            .filter(|param| !param.is_empty())
            .map(|param| {
                param
                    .split_once('=')
                    .map(|(k, v)| (k.trim().to_owned(), v.trim().to_owned()))
                    .ok_or_else(|| {
                        SDPError::InvalidAttributeLine(format!("invalid fmtp parameter: {}", param))
                    })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self {
            payload_type,
            params,
        })
    }
}

impl fmt::Display for FormatParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.payload_type,
            self.params
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .join("; ")
        )
    }
}
