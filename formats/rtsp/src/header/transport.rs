//! `Transport` header for RTP over the RTSP connection (RFC 2326 12.39),
//! limited to `RTP/AVP/TCP` with interleaved channels.

use std::{fmt, str::FromStr};

use utils::bytes::hex_to_bytes;

use crate::errors::TransportError;

pub const TRANSPORT_PROTOCOL_TCP: &str = "RTP/AVP/TCP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportMode {
    Play,
    Record,
}

impl FromStr for TransportMode {
    type Err = TransportError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = s.trim().to_ascii_lowercase();
        match mode.trim_matches('"') {
            "play" => Ok(Self::Play),
            // "receive" is the pre RFC 2326 spelling still sent by old publishers
            "record" | "receive" => Ok(Self::Record),
            _ => Err(TransportError::InvalidMode(s.to_owned())),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Play => f.write_str("play"),
            Self::Record => f.write_str("record"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransportHeader {
    /// RTP and RTCP channel ids
    pub interleaved: Option<(u8, u8)>,
    pub ssrc: Option<u32>,
    pub mode: Option<TransportMode>,
}

impl TransportHeader {
    pub fn unmarshal<S: AsRef<str>>(values: &[S]) -> Result<Self, TransportError> {
        match values {
            [] => Err(TransportError::ValueMissing),
            [value] => Self::unmarshal_value(value.as_ref()),
            _ => Err(TransportError::MultipleValues(values.len())),
        }
    }

    fn unmarshal_value(value: &str) -> Result<Self, TransportError> {
        let mut protocol_found = false;
        let mut result = Self::default();
        for (key, v) in split_key_values(value) {
            match key {
                TRANSPORT_PROTOCOL_TCP => protocol_found = true,
                "interleaved" => result.interleaved = Some(parse_ports(v)?),
                "ssrc" => result.ssrc = parse_ssrc(v),
                "mode" => result.mode = Some(v.parse()?),
                _ => {}
            }
        }

        if !protocol_found {
            return Err(TransportError::ProtocolNotFound(value.to_owned()));
        }
        Ok(result)
    }

    pub fn marshal(&self) -> String {
        let mut parts = vec![TRANSPORT_PROTOCOL_TCP.to_owned()];
        if let Some((rtp, rtcp)) = self.interleaved {
            parts.push(format!("interleaved={}-{}", rtp, rtcp));
        }
        if let Some(ssrc) = self.ssrc {
            parts.push(format!("ssrc={:08X}", ssrc));
        }
        if let Some(mode) = self.mode {
            parts.push(format!("mode={}", mode));
        }
        parts.join(";")
    }
}

impl FromStr for TransportHeader {
    type Err = TransportError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::unmarshal(&[s])
    }
}

impl fmt::Display for TransportHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.marshal())
    }
}

/// Splits `a;b=c;d="e;f"` into trimmed pairs, separators inside quotes are kept.
fn split_key_values(value: &str) -> Vec<(&str, &str)> {
    let mut parts = vec![];
    let mut start = 0;
    let mut quoted = false;
    for (i, c) in value.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ';' if !quoted => {
                parts.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((key, v)) => (key.trim(), v.trim()),
            None => (part, ""),
        })
        .collect()
}

fn parse_ports(value: &str) -> Result<(u8, u8), TransportError> {
    let invalid = || TransportError::PortsInvalid(value.to_owned());
    let parse = |s: &str| s.trim().parse::<u8>().map_err(|_| invalid());
    match value.split('-').collect::<Vec<_>>().as_slice() {
        [rtp, rtcp] => Ok((parse(rtp)?, parse(rtcp)?)),
        [rtp] => {
            let rtp = parse(rtp)?;
            Ok((rtp, rtp.checked_add(1).ok_or_else(invalid)?))
        }
        _ => Err(invalid()),
    }
}

/// Lenient: anything that is not at most 4 bytes of hex is dropped.
fn parse_ssrc(value: &str) -> Option<u32> {
    let value = value.trim_start();
    let padded = if !value.len().is_multiple_of(2) {
        format!("0{}", value)
    } else {
        value.to_owned()
    };
    let bytes = hex_to_bytes(&padded)?;
    if bytes.len() > 4 {
        return None;
    }
    let mut be = [0_u8; 4];
    be[4 - bytes.len()..].copy_from_slice(&bytes);
    Some(u32::from_be_bytes(be))
}
