use std::io::{self, Cursor};

use builder::RtpTrivialPacketBuilder;
use tokio_util::bytes::{Buf, Bytes};
use utils::traits::{
    dynamic_sized_packet::DynamicSizedPacket,
    reader::{ReadFrom, TryReadFrom},
    writer::WriteTo,
};

use crate::{
    errors::{RtpError, RtpResult},
    header::{RTP_FIXED_HEADER_SIZE, RtpHeader},
};

pub mod builder;

#[cfg(test)]
mod test;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpTrivialPacket {
    pub header: RtpHeader,
    pub payload: Bytes,
}

impl RtpTrivialPacket {
    pub fn builder() -> RtpTrivialPacketBuilder {
        Default::default()
    }

    pub fn new(header: RtpHeader, payload: Bytes) -> Self {
        Self { header, payload }
    }

    /// Parses one whole datagram or interleaved frame body.
    pub fn parse<R: AsRef<[u8]>>(bytes: R) -> RtpResult<Self> {
        let length = bytes.as_ref().len();
        Self::try_read_from(&mut Cursor::new(bytes))?.ok_or(RtpError::ShortPacket(length))
    }
}

impl DynamicSizedPacket for RtpTrivialPacket {
    fn get_packet_bytes_count(&self) -> usize {
        self.header.get_packet_bytes_count() + self.payload.len()
    }
}

impl<R: AsRef<[u8]>> TryReadFrom<R> for RtpTrivialPacket {
    type Error = RtpError;
    fn try_read_from(reader: &mut Cursor<R>) -> Result<Option<Self>, Self::Error> {
        if reader.remaining() < RTP_FIXED_HEADER_SIZE {
            return Ok(None);
        }
        let header = match RtpHeader::read_from(reader) {
            Ok(header) => header,
            Err(RtpError::Io(err)) if err.kind() == io::ErrorKind::UnexpectedEof => {
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        let payload_size = reader.remaining();
        let payload = reader.copy_to_bytes(payload_size);
        if !header.padding {
            return Ok(Some(Self { header, payload }));
        }

        let padding_size = payload.last().copied().unwrap_or(0) as usize;
        if padding_size == 0 || padding_size > payload_size {
            return Err(RtpError::BadPaddingSize(padding_size));
        }

        Ok(Some(Self {
            header,
            payload: payload.slice(..payload_size - padding_size),
        }))
    }
}

/// Padding is stripped on read, so packets are always written without it.
impl<W: io::Write> WriteTo<W> for RtpTrivialPacket {
    type Error = RtpError;
    fn write_to(&self, writer: &mut W) -> Result<(), Self::Error> {
        if self.header.padding {
            let header = RtpHeader {
                padding: false,
                ..self.header.clone()
            };
            header.write_to(writer)?;
        } else {
            self.header.write_to(writer)?;
        }
        writer.write_all(&self.payload)?;
        Ok(())
    }
}
