pub mod builder;
pub mod reader;
#[cfg(test)]
mod test;
use std::{fmt, io};

use url::Url;
use utils::traits::writer::WriteTo;

use crate::{
    consts::{common::CRLF_STR, methods::RtspMethod, version::RtspVersion},
    errors::RtspMessageError,
    header::RtspHeaders,
};

use builder::RtspRequestBuilder;

#[derive(Debug, Clone)]
pub struct RtspRequest {
    pub(crate) method: RtspMethod,
    pub(crate) uri: Url,
    pub(crate) version: RtspVersion,
    pub(crate) headers: RtspHeaders,
    pub(crate) body: Option<String>,
}

impl RtspRequest {
    pub fn builder() -> RtspRequestBuilder {
        RtspRequestBuilder::new()
    }

    pub fn method(&self) -> &RtspMethod {
        &self.method
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn version(&self) -> &RtspVersion {
        &self.version
    }

    pub fn headers(&self) -> &RtspHeaders {
        &self.headers
    }

    pub fn body(&self) -> Option<&String> {
        self.body.as_ref()
    }
}

impl fmt::Display for RtspRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}{}",
            self.method, self.uri, self.version, CRLF_STR
        )?;
        write!(f, "{}{}", self.headers, CRLF_STR)?;
        if let Some(body) = &self.body {
            f.write_str(body)?;
        }
        Ok(())
    }
}

impl<W: io::Write> WriteTo<W> for RtspRequest {
    type Error = RtspMessageError;
    fn write_to(&self, writer: &mut W) -> Result<(), Self::Error> {
        write!(writer, "{}", self)?;
        Ok(())
    }
}
