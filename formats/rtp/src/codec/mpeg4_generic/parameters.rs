use crate::codec::mpeg4_generic::errors::{RtpMpeg4Error, RtpMpeg4Result};

/// Field widths of the RFC 3640 AU-header plus the stream clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtpMpeg4AudioParams {
    pub sample_rate: u32,
    /// bits of AU-size
    pub size_length: u8,
    /// bits of AU-Index, first AU-header only
    pub index_length: u8,
    /// bits of AU-Index-delta, subsequent AU-headers
    pub index_delta_length: u8,
}

impl Default for RtpMpeg4AudioParams {
    /// AAC-hbr mode
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            size_length: 13,
            index_length: 3,
            index_delta_length: 3,
        }
    }
}

impl RtpMpeg4AudioParams {
    pub fn validate(&self) -> RtpMpeg4Result<()> {
        if self.sample_rate == 0 {
            return Err(RtpMpeg4Error::InvalidParameters(
                "sample rate must not be zero".to_owned(),
            ));
        }
        if self.size_length == 0 || self.size_length > 32 {
            return Err(RtpMpeg4Error::InvalidParameters(format!(
                "size length out of range: {}",
                self.size_length
            )));
        }
        if self.index_length > 32 || self.index_delta_length > 32 {
            return Err(RtpMpeg4Error::InvalidParameters(format!(
                "index length out of range: {}, {}",
                self.index_length, self.index_delta_length
            )));
        }
        Ok(())
    }
}
