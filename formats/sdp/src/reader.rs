use std::str::FromStr;

use crate::{
    LF,
    errors::{SDPError, SDPResult},
    session::{
        SDPConnectionInformation, SDPMediaDescription, SDPMediaLine, SDPOrigin,
        SDPTimeInformation, SessionDescription,
    },
};

fn syntax_error(line: &str) -> SDPError {
    SDPError::SyntaxError(format!("invalid line: {}", line))
}

fn parse_number<T: FromStr>(value: &str, line: &str) -> SDPResult<T> {
    value.parse().map_err(|_| syntax_error(line))
}

fn parse_origin(value: &str, line: &str) -> SDPResult<SDPOrigin> {
    let fields: Vec<_> = value.split_whitespace().collect();
    let [user_name, session_id, session_version, net_type, addr_type, unicast_address] =
        fields[..]
    else {
        return Err(syntax_error(line));
    };
    Ok(SDPOrigin {
        user_name: user_name.to_owned(),
        session_id: parse_number(session_id, line)?,
        session_version: parse_number(session_version, line)?,
        net_type: net_type.to_owned(),
        addr_type: addr_type.to_owned(),
        unicast_address: unicast_address.to_owned(),
    })
}

fn parse_connection(value: &str, line: &str) -> SDPResult<SDPConnectionInformation> {
    let fields: Vec<_> = value.split_whitespace().collect();
    let [net_type, addr_type, address] = fields[..] else {
        return Err(syntax_error(line));
    };
    Ok(SDPConnectionInformation {
        net_type: net_type.to_owned(),
        addr_type: addr_type.to_owned(),
        address: address.to_owned(),
    })
}

fn parse_time(value: &str, line: &str) -> SDPResult<SDPTimeInformation> {
    let (start, stop) = value.trim().split_once(' ').ok_or_else(|| syntax_error(line))?;
    Ok(SDPTimeInformation {
        start_time: parse_number(start, line)?,
        stop_time: parse_number(stop.trim(), line)?,
    })
}

fn parse_media_line(value: &str, line: &str) -> SDPResult<SDPMediaLine> {
    let mut fields = value.split_whitespace();
    let (Some(media_type), Some(port), Some(protocol)) =
        (fields.next(), fields.next(), fields.next())
    else {
        return Err(syntax_error(line));
    };
    // `<port>/<number of ports>` is accepted, only the base port is kept
    let port = port.split_once('/').map_or(port, |(port, _)| port);
    Ok(SDPMediaLine {
        media_type: media_type.into(),
        port: parse_number(port, line)?,
        protocol: protocol.to_owned(),
        formats: fields.map(str::to_owned).collect(),
    })
}

/// Lines may end with CRLF or a bare LF, unknown line types are skipped.
impl FromStr for SessionDescription {
    type Err = SDPError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut version = None;
        let mut origin = None;
        let mut session_name = None;
        let mut session = SessionDescription {
            time_information: Vec::new(),
            ..Default::default()
        };

        for line in s.split(LF).map(|line| line.trim_end_matches('\r')) {
            if line.trim().is_empty() {
                continue;
            }
            let (kind, value) = line.split_once('=').ok_or_else(|| syntax_error(line))?;
            let mut chars = kind.chars();
            let (Some(kind), None) = (chars.next(), chars.next()) else {
                return Err(syntax_error(line));
            };
            if version.is_none() && kind != 'v' {
                return Err(SDPError::MissingLine('v'));
            }

            if kind == 'm' {
                session
                    .media_descriptions
                    .push(SDPMediaDescription::new(parse_media_line(value, line)?));
                continue;
            }
            if let Some(media) = session.media_descriptions.last_mut() {
                match kind {
                    'i' => media.media_title = Some(value.to_owned()),
                    'c' => media.connection_information = Some(parse_connection(value, line)?),
                    'a' => media.attributes.push(value.parse()?),
                    _ => tracing::trace!("skipping media level sdp line: {}", line),
                }
                continue;
            }

            match kind {
                'v' => version = Some(parse_number(value.trim(), line)?),
                'o' => origin = Some(parse_origin(value, line)?),
                's' => session_name = Some(value.to_owned()),
                'i' => session.session_information = Some(value.to_owned()),
                'u' => session.uri = Some(value.trim().parse()?),
                'c' => session.connection_information = Some(parse_connection(value, line)?),
                't' => session.time_information.push(parse_time(value, line)?),
                'a' => session.attributes.push(value.parse()?),
                _ => tracing::trace!("skipping session level sdp line: {}", line),
            }
        }

        session.version = version.ok_or(SDPError::MissingLine('v'))?;
        session.origin = origin.ok_or(SDPError::MissingLine('o'))?;
        session.session_name = session_name.ok_or(SDPError::MissingLine('s'))?;
        Ok(session)
    }
}
