pub mod builder;
pub mod reader;
#[cfg(test)]
mod test;
use std::{fmt, io};

use builder::RtspResponseBuilder;
use utils::traits::writer::WriteTo;

use crate::{
    consts::{common::CRLF_STR, status::RtspStatus, version::RtspVersion},
    errors::RtspMessageError,
    header::RtspHeaders,
};

#[derive(Debug, Clone)]
pub struct RtspResponse {
    status: RtspStatus,
    version: RtspVersion,
    headers: RtspHeaders,
    body: Option<String>,
}

impl RtspResponse {
    pub fn builder(status: RtspStatus) -> RtspResponseBuilder {
        RtspResponseBuilder::new(status)
    }

    /// Empty response with the default version.
    pub fn with_status(status: RtspStatus) -> Self {
        Self::builder(status).build()
    }

    /// Builder carrying this status, version and headers, the body is dropped.
    pub fn into_builder(self) -> RtspResponseBuilder {
        RtspResponseBuilder::new(self.status)
            .version(self.version)
            .headers(self.headers)
    }

    pub fn status(&self) -> RtspStatus {
        self.status
    }

    pub fn version(&self) -> &RtspVersion {
        &self.version
    }

    pub fn set_version(&mut self, version: RtspVersion) {
        self.version = version;
    }

    pub fn headers(&self) -> &RtspHeaders {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut RtspHeaders {
        &mut self.headers
    }

    pub fn body(&self) -> Option<&String> {
        self.body.as_ref()
    }
}

impl fmt::Display for RtspResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.version, self.status, CRLF_STR)?;
        write!(f, "{}{}", self.headers, CRLF_STR)?;
        if let Some(body) = &self.body {
            f.write_str(body)?;
        }
        Ok(())
    }
}

impl<W: io::Write> WriteTo<W> for RtspResponse {
    type Error = RtspMessageError;
    fn write_to(&self, writer: &mut W) -> Result<(), Self::Error> {
        write!(writer, "{}", self)?;
        Ok(())
    }
}
