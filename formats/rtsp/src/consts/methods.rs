//! @see: RFC 2326 Table 2, RFC 7826 Table 7

use std::{fmt, str::FromStr};

use crate::errors::RtspMessageError;

macro_rules! rtsp_methods {
    ($($variant:ident => $name:literal),* $(,)?) => {
        pub mod method_names {
            $(pub const $variant: &str = $name;)*
        }

        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum RtspMethod {
            $($variant,)*
            /// an extension method token
            Other(String),
        }

        impl RtspMethod {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => method_names::$variant,)*
                    Self::Other(name) => name.as_str(),
                }
            }
        }

        impl FromStr for RtspMethod {
            type Err = RtspMessageError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)*
                    token if is_token(token) => Ok(Self::Other(token.to_owned())),
                    _ => Err(RtspMessageError::UnknownMethod(Some(s.to_owned()))),
                }
            }
        }
    };
}

rtsp_methods! {
    OPTIONS => "OPTIONS",
    DESCRIBE => "DESCRIBE",
    ANNOUNCE => "ANNOUNCE",
    SETUP => "SETUP",
    PLAY => "PLAY",
    PAUSE => "PAUSE",
    RECORD => "RECORD",
    TEARDOWN => "TEARDOWN",
    GET_PARAMETER => "GET_PARAMETER",
    SET_PARAMETER => "SET_PARAMETER",
    REDIRECT => "REDIRECT",
    PLAY_NOTIFY => "PLAY_NOTIFY",
}

/// RFC 2616 token, restricted to what request lines actually carry
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
}

impl fmt::Display for RtspMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
