//! @see: RFC 2326 7.1.1, RFC 7826 Table 4
use std::fmt;

use crate::errors::RtspMessageError;

macro_rules! rtsp_statuses {
    ($($variant:ident = $code:literal => $description:literal),* $(,)?) => {
        #[repr(u16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum RtspStatus {
            $($variant = $code,)*
        }

        impl RtspStatus {
            pub fn description(&self) -> &'static str {
                match self {
                    $(Self::$variant => $description,)*
                }
            }
        }

        impl TryFrom<u16> for RtspStatus {
            type Error = RtspMessageError;
            fn try_from(value: u16) -> Result<Self, Self::Error> {
                match value {
                    $($code => Ok(Self::$variant),)*
                    _ => Err(RtspMessageError::UnknownStatusCode(Some(value))),
                }
            }
        }
    };
}

rtsp_statuses! {
    Continue = 100 => "Continue",
    OK = 200 => "OK",
    Created = 201 => "Created",
    MovedPermanently = 301 => "Moved Permanently",
    Found = 302 => "Found",
    SeeOther = 303 => "See Other",
    NotModified = 304 => "Not Modified",
    UseProxy = 305 => "Use Proxy",
    BadRequest = 400 => "Bad Request",
    Unauthorized = 401 => "Unauthorized",
    PaymentRequired = 402 => "Payment Required",
    Forbidden = 403 => "Forbidden",
    NotFound = 404 => "Not Found",
    MethodNotAllowed = 405 => "Method Not Allowed",
    NotAcceptable = 406 => "Not Acceptable",
    ProxyAuthenticationRequired = 407 => "Proxy Authentication Required",
    RequestTimeout = 408 => "Request Timeout",
    Gone = 410 => "Gone",
    LengthRequired = 411 => "Length Required",
    PreconditionFailed = 412 => "Precondition Failed",
    RequestMessageBodyTooLarge = 413 => "Request Message Body Too Large",
    RequestUriTooLong = 414 => "Request-URI Too Long",
    UnsupportedMediaType = 415 => "Unsupported Media Type",
    ParameterNotUnderstood = 451 => "Parameter Not Understood",
    ConferenceNotFound = 452 => "Conference Not Found",
    NotEnoughBandwidth = 453 => "Not Enough Bandwidth",
    SessionNotFound = 454 => "Session Not Found",
    MethodNotValidInThisState = 455 => "Method Not Valid in This State",
    HeaderFieldNotValidForResource = 456 => "Header Field Not Valid for Resource",
    InvalidRange = 457 => "Invalid Range",
    ParameterIsReadOnly = 458 => "Parameter Is Read-Only",
    AggregateOperationNotAllowed = 459 => "Aggregate Operation Not Allowed",
    OnlyAggregateOperationAllowed = 460 => "Only Aggregate Operation Allowed",
    UnsupportedTransport = 461 => "Unsupported Transport",
    DestinationUnreachable = 462 => "Destination Unreachable",
    InternalServerError = 500 => "Internal Server Error",
    NotImplemented = 501 => "Not Implemented",
    BadGateway = 502 => "Bad Gateway",
    ServiceUnavailable = 503 => "Service Unavailable",
    GatewayTimeout = 504 => "Gateway Timeout",
    RtspVersionNotSupported = 505 => "RTSP Version Not Supported",
    OptionNotSupported = 551 => "Option Not Supported",
}

impl From<RtspStatus> for u16 {
    fn from(value: RtspStatus) -> Self {
        value as u16
    }
}

impl RtspStatus {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&u16::from(*self))
    }
}

impl fmt::Display for RtspStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", u16::from(*self), self.description())
    }
}
