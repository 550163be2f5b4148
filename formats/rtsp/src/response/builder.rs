use crate::{
    consts::{status::RtspStatus, version::RtspVersion},
    header::{RtspHeader, RtspHeaders},
};

use super::RtspResponse;

/// Response under construction, the status is fixed up front so building cannot fail.
#[derive(Debug)]
pub struct RtspResponseBuilder {
    status: RtspStatus,
    version: RtspVersion,
    headers: RtspHeaders,
    body: Option<String>,
}

impl RtspResponseBuilder {
    pub(super) fn new(status: RtspStatus) -> Self {
        Self {
            status,
            version: RtspVersion::default(),
            headers: RtspHeaders::default(),
            body: None,
        }
    }

    pub fn version(mut self, version: RtspVersion) -> Self {
        self.version = version;
        self
    }

    pub fn headers(mut self, headers: RtspHeaders) -> Self {
        self.headers = headers;
        self
    }

    /// Replaces any earlier value of `key`.
    pub fn header<S: Into<String>>(mut self, key: RtspHeader, value: S) -> Self {
        self.headers.set(key, value);
        self
    }

    /// Attaches a body of the given media type.
    pub fn body<S: Into<String>>(mut self, content_type: &str, body: S) -> Self {
        self.headers.set(RtspHeader::ContentType, content_type);
        self.body = Some(body.into());
        self
    }

    pub fn build(mut self) -> RtspResponse {
        if let Some(body) = &self.body {
            self.headers
                .set(RtspHeader::ContentLength, body.len().to_string());
        }
        RtspResponse {
            status: self.status,
            version: self.version,
            headers: self.headers,
            body: self.body,
        }
    }
}
